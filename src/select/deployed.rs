//! Workloads deployed to one or more environments.
use super::app::{final_message, workload_kind};
use super::candidate::{Candidate, CandidateSet, Qualify};
use super::error::{ResourceKind, SelectError, SelectResult, StageContext};
use super::filter::{apply_filters, has_type, Filter};
use super::resolver::{SelectRequest, Selector};
use crate::model::{DeployedWorkload, KindFilter, WorkloadKind, WorkloadType};
use crate::prompt::PromptConfig;
use crate::store::{DeployStore, Store};
use std::collections::BTreeMap;

/// Options for resolving a deployed workload.
///
/// With both `env` and `name` set, listing is skipped and the deployment is
/// verified directly; caller filters do not run on that path. A single kind
/// costs exactly one check. `KindFilter::Any` checks services first and only
/// checks jobs when the service check comes back false.
#[derive(Default)]
pub struct DeployedQuery<'f> {
    /// Restrict candidates to one environment.
    pub env: Option<String>,
    /// Restrict candidates to one workload name.
    pub name: Option<String>,
    pub kinds: KindFilter,
    /// Type allow-list; empty admits every type.
    pub types: Vec<WorkloadType>,
    pub filters: Vec<Filter<'f, DeployedWorkload>>,
}

impl<'f> DeployedQuery<'f> {
    pub fn new(kinds: KindFilter) -> Self {
        Self {
            kinds,
            ..Self::default()
        }
    }

    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn types(mut self, types: &[WorkloadType]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn filter(mut self, filter: Filter<'f, DeployedWorkload>) -> Self {
        self.filters.push(filter);
        self
    }
}

pub struct DeploySelector<'a> {
    base: &'a Selector<'a>,
    store: &'a dyn Store,
    deploy: &'a dyn DeployStore,
}

impl<'a> DeploySelector<'a> {
    pub fn new(base: &'a Selector<'a>, store: &'a dyn Store, deploy: &'a dyn DeployStore) -> Self {
        Self {
            base,
            store,
            deploy,
        }
    }

    /// Resolve a workload of `app` together with the environment it runs in.
    pub fn deployed_workload(
        &self,
        message: &str,
        help: &str,
        app: &str,
        query: DeployedQuery<'_>,
    ) -> SelectResult<DeployedWorkload> {
        if let (Some(env), Some(name)) = (query.env.as_deref(), query.name.as_deref()) {
            return self.verify(app, env, name, query.kinds);
        }

        let envs = match &query.env {
            Some(env) => vec![env.clone()],
            None => self
                .store
                .list_environments(app)
                .stage(|| "list environments")?
                .into_iter()
                .map(|env| env.name)
                .collect(),
        };
        let types: BTreeMap<String, WorkloadType> = self
            .store
            .list_workloads(app)
            .stage(|| "list workloads")?
            .into_iter()
            .map(|workload| (workload.name, workload.workload_type))
            .collect();

        let mut deployed = Vec::new();
        for env in &envs {
            if query.kinds.admits(WorkloadKind::Service) {
                let names = self
                    .deploy
                    .list_deployed_services(app, env)
                    .stage(|| format!("list deployed services in environment {env}"))?;
                tracing::debug!(
                    app,
                    env = env.as_str(),
                    count = names.len(),
                    "listed deployed services"
                );
                deployed.extend(annotate(names, env, WorkloadKind::Service, &types));
            }
            if query.kinds.admits(WorkloadKind::Job) {
                let names = self
                    .deploy
                    .list_deployed_jobs(app, env)
                    .stage(|| format!("list deployed jobs in environment {env}"))?;
                tracing::debug!(
                    app,
                    env = env.as_str(),
                    count = names.len(),
                    "listed deployed jobs"
                );
                deployed.extend(annotate(names, env, WorkloadKind::Job, &types));
            }
        }

        if let Some(name) = &query.name {
            deployed.retain(|workload| &workload.name == name);
        }
        if !query.types.is_empty() {
            deployed = apply_filters(deployed, &[has_type(&query.types)])?;
        }
        let deployed = apply_filters(deployed, &query.filters)?;

        let candidates: CandidateSet<DeployedWorkload> = deployed
            .into_iter()
            .map(|workload| {
                Candidate::qualified(workload.name.clone(), workload.env.clone(), workload)
            })
            .collect();
        let scope = match &query.env {
            Some(env) => format!("environment {env} of application {app}"),
            None => format!("application {app}"),
        };
        let req = SelectRequest::new(deployed_kind(query.kinds), scope, message)
            .help(help)
            .qualify(Qualify::Always)
            .config(PromptConfig::with_final_message(final_message(query.kinds)));
        Ok(self.base.select_one(&req, candidates)?.value)
    }

    /// Check one (env, name) pair directly. Services are checked before jobs.
    fn verify(
        &self,
        app: &str,
        env: &str,
        name: &str,
        kinds: KindFilter,
    ) -> SelectResult<DeployedWorkload> {
        let kind = workload_kind(kinds);
        let check_failed = |source| SelectError::VerificationCheck {
            kind,
            name: name.to_string(),
            env: env.to_string(),
            source,
        };
        let found = |kind| DeployedWorkload {
            name: name.to_string(),
            env: env.to_string(),
            kind,
            workload_type: None,
        };
        if kinds.admits(WorkloadKind::Service)
            && self
                .deploy
                .is_service_deployed(app, env, name)
                .map_err(check_failed)?
        {
            tracing::debug!(app, env, name, "verified deployed service");
            return Ok(found(WorkloadKind::Service));
        }
        if kinds.admits(WorkloadKind::Job)
            && self
                .deploy
                .is_job_deployed(app, env, name)
                .map_err(check_failed)?
        {
            tracing::debug!(app, env, name, "verified deployed job");
            return Ok(found(WorkloadKind::Job));
        }
        Err(SelectError::NotDeployed {
            kind,
            name: name.to_string(),
            env: env.to_string(),
        })
    }
}

fn annotate(
    names: Vec<String>,
    env: &str,
    kind: WorkloadKind,
    types: &BTreeMap<String, WorkloadType>,
) -> Vec<DeployedWorkload> {
    names
        .into_iter()
        .map(|name| DeployedWorkload {
            workload_type: types.get(&name).copied(),
            name,
            env: env.to_string(),
            kind,
        })
        .collect()
}

fn deployed_kind(kinds: KindFilter) -> ResourceKind {
    match kinds {
        KindFilter::Services => ResourceKind::DeployedService,
        KindFilter::Jobs => ResourceKind::DeployedJob,
        KindFilter::Any => ResourceKind::DeployedWorkload,
    }
}

#[cfg(test)]
#[path = "deployed_tests.rs"]
mod tests;
