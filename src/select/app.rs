//! Selectors backed only by the store: applications, environments, and
//! initialized workloads.
use super::candidate::{Candidate, CandidateSet};
use super::error::{ResourceKind, SelectResult, StageContext};
use super::resolver::{ordinal, CascadeRequest, Choice, SelectRequest, Selector};
use crate::model::{Application, Environment, KindFilter, Workload};
use crate::prompt::PromptConfig;
use crate::store::Store;

/// Stop option for the multi-environment selector.
pub const NO_MORE_ENVIRONMENTS: &str = "[No additional environments]";

pub struct AppSelector<'a> {
    base: &'a Selector<'a>,
    store: &'a dyn Store,
}

impl<'a> AppSelector<'a> {
    pub fn new(base: &'a Selector<'a>, store: &'a dyn Store) -> Self {
        Self { base, store }
    }

    /// Choose an application, or one of `extra_options` such as "create new".
    pub fn application(
        &self,
        message: &str,
        help: &str,
        extra_options: &[&str],
    ) -> SelectResult<Choice<Application>> {
        let apps = self
            .store
            .list_applications()
            .stage(|| "list applications")?;
        tracing::debug!(count = apps.len(), "listed applications");
        let candidates: CandidateSet<Application> = apps
            .into_iter()
            .map(|app| Candidate::new(app.name.clone(), app))
            .collect();
        let mut req = SelectRequest::new(ResourceKind::Application, "this account", message)
            .help(help)
            .config(PromptConfig::with_final_message("Application:"));
        for option in extra_options {
            req = req.extra_option(*option);
        }
        self.base.choose(&req, candidates)
    }

    /// Choose one environment of `app`, or one of `extra_options`.
    pub fn environment(
        &self,
        message: &str,
        help: &str,
        app: &str,
        extra_options: &[&str],
    ) -> SelectResult<Choice<Environment>> {
        let candidates = self.environment_candidates(app)?;
        let mut req = SelectRequest::new(
            ResourceKind::Environment,
            format!("application {app}"),
            message,
        )
        .help(help)
        .config(PromptConfig::with_final_message("Environment:"));
        for option in extra_options {
            req = req.extra_option(*option);
        }
        self.base.choose(&req, candidates)
    }

    /// Choose an ordered list of environments, one per round.
    ///
    /// `message` receives the ordinal of the round ("first", "second", ...).
    pub fn environments(
        &self,
        message: &dyn Fn(&str) -> String,
        help: &str,
        app: &str,
    ) -> SelectResult<Vec<Environment>> {
        let candidates = self.environment_candidates(app)?;
        let mut req = CascadeRequest::new(
            ResourceKind::Environment,
            format!("application {app}"),
            |round| message(&ordinal(round)),
        );
        req.help = help.to_string();
        req.stop_label = NO_MORE_ENVIRONMENTS.to_string();
        let picked = self.base.select_cascading(&req, candidates)?;
        Ok(picked.into_iter().map(|candidate| candidate.value).collect())
    }

    /// Choose a workload initialized in `app`, narrowed to `kinds`.
    pub fn workload(
        &self,
        message: &str,
        help: &str,
        app: &str,
        kinds: KindFilter,
    ) -> SelectResult<Workload> {
        let workloads = self
            .store
            .list_workloads(app)
            .stage(|| format!("list workloads in application {app}"))?;
        let allowed = kinds.allowed_types();
        let candidates: CandidateSet<Workload> = workloads
            .into_iter()
            .filter(|workload| allowed.contains(&workload.workload_type))
            .map(|workload| Candidate::new(workload.name.clone(), workload))
            .collect();
        let req = SelectRequest::new(workload_kind(kinds), format!("application {app}"), message)
            .help(help)
            .config(PromptConfig::with_final_message(final_message(kinds)));
        Ok(self.base.select_one(&req, candidates)?.value)
    }

    fn environment_candidates(&self, app: &str) -> SelectResult<CandidateSet<Environment>> {
        let envs = self
            .store
            .list_environments(app)
            .stage(|| "list environments")?;
        tracing::debug!(app, count = envs.len(), "listed environments");
        Ok(envs
            .into_iter()
            .map(|env| Candidate::new(env.name.clone(), env))
            .collect())
    }
}

pub(crate) fn workload_kind(kinds: KindFilter) -> ResourceKind {
    match kinds {
        KindFilter::Services => ResourceKind::Service,
        KindFilter::Jobs => ResourceKind::Job,
        KindFilter::Any => ResourceKind::Workload,
    }
}

pub(crate) fn final_message(kinds: KindFilter) -> &'static str {
    match kinds {
        KindFilter::Services => "Service name:",
        KindFilter::Jobs => "Job name:",
        KindFilter::Any => "Name:",
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
