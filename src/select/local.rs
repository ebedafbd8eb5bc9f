//! Selectors over files in the working directory.
use super::candidate::{Candidate, CandidateSet};
use super::error::{ResourceKind, SelectError, SelectResult};
use super::paths::{discover_dockerfiles, discover_static_sources, StaticSourceWalk};
use super::resolver::{Choice, SelectRequest, Selector};
use crate::fs::FileSystem;
use crate::prompt::{PromptConfig, Validator};
use serde::Serialize;
use std::path::Path;

pub const DOCKERFILE_CUSTOM_OPTION: &str = "Enter custom path for your Dockerfile";
pub const DOCKERFILE_IMAGE_OPTION: &str = "Use an existing image instead";
pub const STATIC_SOURCE_CUSTOM_OPTION: &str = "Enter custom path";

const DOCKERFILE_PATH_PROMPT: &str = "Which Dockerfile would you like to use?";
const DOCKERFILE_PATH_HELP: &str = "Path to a Dockerfile, relative to the working directory.";
const STATIC_PATH_PROMPT: &str = "What is the path to the file or directory to upload?";
const STATIC_PATH_HELP: &str = "Leave empty to finish adding paths.";

/// How a workload's image is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DockerfileChoice {
    /// Build from the Dockerfile at this path.
    Path(String),
    /// The caller should ask for an existing image instead of building one.
    Image,
}

pub struct LocalFileSelector<'a> {
    base: &'a Selector<'a>,
    fs: &'a dyn FileSystem,
}

impl<'a> LocalFileSelector<'a> {
    pub fn new(base: &'a Selector<'a>, fs: &'a dyn FileSystem) -> Self {
        Self { base, fs }
    }

    /// Choose a Dockerfile under `root`.
    ///
    /// With nothing discovered the user types a path instead.
    pub fn dockerfile(
        &self,
        message: &str,
        help: &str,
        root: &Path,
    ) -> SelectResult<DockerfileChoice> {
        let found = discover_dockerfiles(self.fs, root)?;
        if found.is_empty() {
            tracing::info!(root = %root.display(), "no Dockerfiles found, asking for a path");
            return self.custom_dockerfile();
        }

        let candidates: CandidateSet<String> = found.into_iter().map(Candidate::named).collect();
        let req = SelectRequest::new(ResourceKind::Dockerfile, root.display().to_string(), message)
            .help(help)
            .extra_option(DOCKERFILE_CUSTOM_OPTION)
            .extra_option(DOCKERFILE_IMAGE_OPTION)
            .config(PromptConfig::with_final_message("Dockerfile:"));
        match self.base.choose(&req, candidates)? {
            Choice::Candidate(candidate) => Ok(DockerfileChoice::Path(candidate.value)),
            Choice::Extra(option) if option == DOCKERFILE_IMAGE_OPTION => {
                Ok(DockerfileChoice::Image)
            }
            Choice::Extra(_) => self.custom_dockerfile(),
        }
    }

    /// Choose files and directories to upload as static assets.
    ///
    /// The custom option asks for extra paths one at a time until an empty
    /// answer. Discovered paths come first, then custom ones in entry order.
    pub fn static_sources(
        &self,
        message: &str,
        help: &str,
        walk: &StaticSourceWalk,
    ) -> SelectResult<Vec<String>> {
        let found = discover_static_sources(self.fs, walk)?;
        let candidates: CandidateSet<String> = found.into_iter().map(Candidate::named).collect();
        let scope = walk.root.display().to_string();
        let req = SelectRequest::new(ResourceKind::StaticSource, scope, message)
            .help(help)
            .extra_option(STATIC_SOURCE_CUSTOM_OPTION)
            .config(PromptConfig::with_final_message("Sources:"));
        let (picked, extras) = if candidates.is_empty() {
            (Vec::new(), vec![STATIC_SOURCE_CUSTOM_OPTION.to_string()])
        } else {
            self.base.select_many(&req, candidates, &[])?
        };

        let mut sources: Vec<String> =
            picked.into_iter().map(|candidate| candidate.value).collect();
        if extras.iter().any(|option| option == STATIC_SOURCE_CUSTOM_OPTION) {
            loop {
                let path = self
                    .base
                    .prompter()
                    .get_text(STATIC_PATH_PROMPT, STATIC_PATH_HELP, None, &PromptConfig::default())
                    .map_err(|source| {
                        SelectError::prompt("get custom static source path", source)
                    })?;
                let path = path.trim();
                if path.is_empty() {
                    break;
                }
                if !sources.iter().any(|known| known == path) {
                    sources.push(path.to_string());
                }
            }
        }
        Ok(sources)
    }

    fn custom_dockerfile(&self) -> SelectResult<DockerfileChoice> {
        let validator: &Validator = &validate_dockerfile_path;
        let path = self
            .base
            .prompter()
            .get_text(
                DOCKERFILE_PATH_PROMPT,
                DOCKERFILE_PATH_HELP,
                Some(validator),
                &PromptConfig::with_final_message("Dockerfile:"),
            )
            .map_err(|source| SelectError::prompt("get custom Dockerfile path", source))?;
        Ok(DockerfileChoice::Path(path.trim().to_string()))
    }
}

fn validate_dockerfile_path(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("path must not be empty".to_string());
    }
    if value.ends_with('/') {
        return Err("path must point to a file, not a directory".to_string());
    }
    Ok(())
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
