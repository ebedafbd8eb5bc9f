//! Shared choice logic behind every resource selector.
//!
//! [`Selector`] owns the only calls into the prompt collaborator. Resource
//! selectors hold a reference to one and delegate to it.
use super::candidate::{Candidate, CandidateSet, Qualify};
use super::error::{ResourceKind, SelectError, SelectResult};
use crate::prompt::{PromptConfig, Prompter};
use std::collections::BTreeSet;

/// Sentinel offered in every cascading round.
pub const DEFAULT_STOP_LABEL: &str = "[No additional selections]";

/// Inputs for one single-choice resolution.
#[derive(Debug, Clone)]
pub struct SelectRequest {
    pub message: String,
    pub help: String,
    /// Names the resource in errors and logs.
    pub kind: ResourceKind,
    /// Where candidates were searched, e.g. `application demo`.
    pub scope: String,
    /// Fixed options appended after the candidates. Any extra forces a prompt.
    pub extra_options: Vec<String>,
    pub qualify: Qualify,
    pub config: PromptConfig,
}

impl SelectRequest {
    pub fn new(kind: ResourceKind, scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: String::new(),
            kind,
            scope: scope.into(),
            extra_options: Vec::new(),
            qualify: Qualify::Duplicates,
            config: PromptConfig::default(),
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn extra_option(mut self, option: impl Into<String>) -> Self {
        self.extra_options.push(option.into());
        self
    }

    pub fn qualify(mut self, qualify: Qualify) -> Self {
        self.qualify = qualify;
        self
    }

    pub fn config(mut self, config: PromptConfig) -> Self {
        self.config = config;
        self
    }

    fn action(&self) -> String {
        format!("select {}", self.kind.singular())
    }
}

/// Inputs for a cascading multi-choice resolution.
pub struct CascadeRequest<'p> {
    /// Prompt text for a round, given the 1-based round number.
    pub message: Box<dyn Fn(usize) -> String + 'p>,
    pub help: String,
    pub kind: ResourceKind,
    pub scope: String,
    /// Option that ends the selection early.
    pub stop_label: String,
    /// Keep prompting while a single real candidate remains. When false the
    /// last candidate is taken without asking.
    pub confirm_last: bool,
    pub qualify: Qualify,
    pub config: PromptConfig,
}

impl<'p> CascadeRequest<'p> {
    pub fn new(
        kind: ResourceKind,
        scope: impl Into<String>,
        message: impl Fn(usize) -> String + 'p,
    ) -> Self {
        Self {
            message: Box::new(message),
            help: String::new(),
            kind,
            scope: scope.into(),
            stop_label: DEFAULT_STOP_LABEL.to_string(),
            confirm_last: true,
            qualify: Qualify::Duplicates,
            config: PromptConfig::default(),
        }
    }
}

/// Outcome of a single-choice resolution with fixed extra options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Candidate(Candidate<T>),
    Extra(String),
}

/// Base resolver delegating interactive choice to a [`Prompter`].
#[derive(Clone, Copy)]
pub struct Selector<'a> {
    prompt: &'a dyn Prompter,
}

impl<'a> Selector<'a> {
    pub fn new(prompt: &'a dyn Prompter) -> Self {
        Self { prompt }
    }

    pub fn prompter(&self) -> &'a dyn Prompter {
        self.prompt
    }

    /// Choose one candidate or one of the request's extra options.
    ///
    /// Zero options is a not-found error. A single candidate with no extras is
    /// returned without prompting. A candidate label equal to another label or
    /// to an extra option fails with [`SelectError::DuplicateOption`].
    pub fn choose<T>(
        &self,
        req: &SelectRequest,
        candidates: CandidateSet<T>,
    ) -> SelectResult<Choice<T>> {
        if candidates.is_empty() && req.extra_options.is_empty() {
            return Err(SelectError::not_found(req.kind, req.scope.clone()));
        }
        if candidates.len() == 1 && req.extra_options.is_empty() {
            let label = candidates.labels(req.qualify).remove(0);
            tracing::info!("found only one {}: {label}", req.kind);
            let only = candidates.into_vec().remove(0);
            return Ok(Choice::Candidate(only));
        }

        let options = offered_options(&candidates, req.qualify, &req.extra_options)?;
        tracing::debug!(kind = %req.kind, count = options.len(), "prompting for selection");
        let chosen = self
            .prompt
            .select_one(&req.message, &req.help, &options, &req.config)
            .map_err(|source| SelectError::prompt(req.action(), source))?;

        if req.extra_options.contains(&chosen) {
            return Ok(Choice::Extra(chosen));
        }
        let idx = candidates.position_of(&chosen, req.qualify)?;
        Ok(Choice::Candidate(candidates.into_vec().remove(idx)))
    }

    /// Choose exactly one candidate.
    pub fn select_one<T>(
        &self,
        req: &SelectRequest,
        candidates: CandidateSet<T>,
    ) -> SelectResult<Candidate<T>> {
        match self.choose(req, candidates)? {
            Choice::Candidate(candidate) => Ok(candidate),
            Choice::Extra(label) => Err(SelectError::UnknownChoice { label }),
        }
    }

    /// Repeatedly choose from a shrinking pool until the stop option is picked
    /// or no candidates remain. Results are in selection order.
    pub fn select_cascading<T>(
        &self,
        req: &CascadeRequest<'_>,
        candidates: CandidateSet<T>,
    ) -> SelectResult<Vec<Candidate<T>>> {
        if candidates.is_empty() {
            return Err(SelectError::not_found(req.kind, req.scope.clone()));
        }
        let mut remaining = candidates;
        let mut selected = Vec::new();
        let mut round = 1;
        while !remaining.is_empty() {
            if remaining.len() == 1 && !req.confirm_last {
                selected.push(remaining.remove(0));
                break;
            }
            let options =
                offered_options(&remaining, req.qualify, std::slice::from_ref(&req.stop_label))?;
            let message = (req.message)(round);
            let chosen = self
                .prompt
                .select_one(&message, &req.help, &options, &req.config)
                .map_err(|source| {
                    SelectError::prompt(format!("select {}", req.kind.plural()), source)
                })?;
            if chosen == req.stop_label {
                break;
            }
            let idx = remaining.position_of(&chosen, req.qualify)?;
            selected.push(remaining.remove(idx));
            round += 1;
        }
        tracing::debug!(kind = %req.kind, count = selected.len(), "cascading selection complete");
        Ok(selected)
    }

    /// Choose any number of candidates in a single multi-select prompt.
    ///
    /// Extra options chosen by the user are returned separately, after the
    /// candidates, in prompt order.
    pub fn select_many<T>(
        &self,
        req: &SelectRequest,
        candidates: CandidateSet<T>,
        preselected: &[String],
    ) -> SelectResult<(Vec<Candidate<T>>, Vec<String>)> {
        if candidates.is_empty() && req.extra_options.is_empty() {
            return Err(SelectError::not_found(req.kind, req.scope.clone()));
        }
        let options = offered_options(&candidates, req.qualify, &req.extra_options)?;
        let chosen = self
            .prompt
            .select_many(&req.message, &req.help, &options, preselected, &req.config)
            .map_err(|source| {
                SelectError::prompt(format!("select {}", req.kind.plural()), source)
            })?;

        let mut picked_idx = Vec::new();
        let mut extras = Vec::new();
        for label in chosen {
            if req.extra_options.contains(&label) {
                extras.push(label);
                continue;
            }
            let idx = candidates.position_of(&label, req.qualify)?;
            if !picked_idx.contains(&idx) {
                picked_idx.push(idx);
            }
        }
        let mut slots: Vec<Option<Candidate<T>>> =
            candidates.into_vec().into_iter().map(Some).collect();
        let picked = picked_idx
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect();
        Ok((picked, extras))
    }
}

/// Candidate labels followed by `extras`, refusing any label offered twice.
///
/// A repeated option could only ever map back to its first occurrence, so the
/// other item would be unreachable.
fn offered_options<T>(
    candidates: &CandidateSet<T>,
    qualify: Qualify,
    extras: &[String],
) -> SelectResult<Vec<String>> {
    let mut options = candidates.labels(qualify);
    options.extend(extras.iter().cloned());
    let mut seen = BTreeSet::new();
    for option in &options {
        if !seen.insert(option.as_str()) {
            return Err(SelectError::DuplicateOption {
                label: option.clone(),
            });
        }
    }
    Ok(options)
}

/// English ordinal for cascading round prompts.
pub fn ordinal(n: usize) -> String {
    match n {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        4 => "fourth".to_string(),
        5 => "fifth".to_string(),
        6 => "sixth".to_string(),
        7 => "seventh".to_string(),
        8 => "eighth".to_string(),
        9 => "ninth".to_string(),
        10 => "tenth".to_string(),
        _ => {
            let suffix = match (n % 10, n % 100) {
                (1, 11) | (2, 12) | (3, 13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
