//! Local workspace collaborator.
//!
//! A workspace is a project directory holding a `berth/` directory of JSON
//! manifests. Reading it never touches the network.
//!
//! ```text
//! berth/.workspace                       {"application": "demo"}
//! berth/<workload>/manifest.json         {"name": "api", "type": "Backend Service"}
//! berth/environments/<env>/manifest.json
//! berth/pipelines/<name>/manifest.json   {"name": "release"}
//! berth/pipeline.json                    legacy single pipeline
//! ```
use crate::model::{LocalWorkload, PipelineManifest, WorkloadType, WorkspaceSummary};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the workspace configuration directory.
pub const WORKSPACE_DIR_NAME: &str = "berth";

const SUMMARY_FILE: &str = ".workspace";
const MANIFEST_FILE: &str = "manifest.json";
const ENVIRONMENTS_DIR: &str = "environments";
const PIPELINES_DIR: &str = "pipelines";
const LEGACY_PIPELINE_FILE: &str = "pipeline.json";
const MAX_SEARCH_PARENTS: usize = 5;

/// Declared resources in a local workspace.
pub trait Workspace {
    fn summary(&self) -> Result<WorkspaceSummary>;
    fn list_workloads(&self) -> Result<Vec<LocalWorkload>>;
    fn list_environments(&self) -> Result<Vec<String>>;
    fn list_pipelines(&self) -> Result<Vec<PipelineManifest>>;
}

#[derive(Deserialize)]
struct WorkloadManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    workload_type: Option<WorkloadType>,
}

#[derive(Deserialize)]
struct PipelineManifestFile {
    #[serde(default)]
    name: Option<String>,
}

/// Workspace read from disk.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    project_root: PathBuf,
}

impl FsWorkspace {
    /// Open the workspace whose config directory is `<project_root>/berth`.
    pub fn open(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Find the nearest workspace at or above `start`.
    pub fn discover(start: &Path) -> Result<Self> {
        let mut dir = Some(start);
        for _ in 0..=MAX_SEARCH_PARENTS {
            let Some(current) = dir else {
                break;
            };
            if current.join(WORKSPACE_DIR_NAME).is_dir() {
                tracing::debug!(root = %current.display(), "found workspace");
                return Ok(Self::open(current));
            }
            dir = current.parent();
        }
        Err(anyhow!(
            "no {WORKSPACE_DIR_NAME}/ directory found at or above {}",
            start.display()
        ))
    }

    /// Project directory containing the config directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Absolute path of the config directory.
    pub fn config_dir(&self) -> PathBuf {
        self.project_root.join(WORKSPACE_DIR_NAME)
    }

    fn subdirs(dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }
}

impl Workspace for FsWorkspace {
    fn summary(&self) -> Result<WorkspaceSummary> {
        let path = self.config_dir().join(SUMMARY_FILE);
        if !path.is_file() {
            return Err(anyhow!(
                "workspace at {} is not associated with an application",
                self.project_root.display()
            ));
        }
        Self::read_json(&path)
    }

    fn list_workloads(&self) -> Result<Vec<LocalWorkload>> {
        let config_dir = self.config_dir();
        let mut workloads = Vec::new();
        for dir_name in Self::subdirs(&config_dir)? {
            if dir_name == ENVIRONMENTS_DIR || dir_name == PIPELINES_DIR {
                continue;
            }
            let manifest_path = config_dir.join(&dir_name).join(MANIFEST_FILE);
            if !manifest_path.is_file() {
                continue;
            }
            let manifest: WorkloadManifest = Self::read_json(&manifest_path)?;
            workloads.push(LocalWorkload {
                name: manifest.name.unwrap_or(dir_name),
                workload_type: manifest.workload_type,
            });
        }
        Ok(workloads)
    }

    fn list_environments(&self) -> Result<Vec<String>> {
        let envs_dir = self.config_dir().join(ENVIRONMENTS_DIR);
        let names = Self::subdirs(&envs_dir)?
            .into_iter()
            .filter(|name| envs_dir.join(name).join(MANIFEST_FILE).is_file())
            .collect();
        Ok(names)
    }

    fn list_pipelines(&self) -> Result<Vec<PipelineManifest>> {
        let config_dir = self.config_dir();
        let mut pipelines = Vec::new();
        let legacy_path = config_dir.join(LEGACY_PIPELINE_FILE);
        if legacy_path.is_file() {
            let manifest: PipelineManifestFile = Self::read_json(&legacy_path)?;
            let name = manifest
                .name
                .ok_or_else(|| anyhow!("{} must set a pipeline name", legacy_path.display()))?;
            pipelines.push(PipelineManifest {
                name,
                path: legacy_path,
            });
        }
        let pipelines_dir = config_dir.join(PIPELINES_DIR);
        for dir_name in Self::subdirs(&pipelines_dir)? {
            let path = pipelines_dir.join(&dir_name).join(MANIFEST_FILE);
            if !path.is_file() {
                continue;
            }
            let manifest: PipelineManifestFile = Self::read_json(&path)?;
            pipelines.push(PipelineManifest {
                name: manifest.name.unwrap_or(dir_name),
                path,
            });
        }
        Ok(pipelines)
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
