//! Workloads and environments declared in the local workspace.
use super::app::{final_message, workload_kind};
use super::candidate::{Candidate, CandidateSet};
use super::error::{ResourceKind, SelectResult, StageContext};
use super::filter::{apply_filters, Filter};
use super::reconcile::{index_by, intersect};
use super::resolver::{SelectRequest, Selector};
use crate::model::{Environment, KindFilter, LocalWorkload};
use crate::prompt::PromptConfig;
use crate::store::Store;
use crate::workspace::Workspace;

/// Which declared workloads are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eligibility {
    /// Any workload with a manifest in the workspace. The store is not consulted.
    #[default]
    Declared,
    /// Declared workloads that are also initialized in the store. The store's
    /// type replaces the manifest's.
    Initialized,
}

/// Options for resolving a workspace workload.
#[derive(Default)]
pub struct LocalQuery<'f> {
    pub kinds: KindFilter,
    pub eligibility: Eligibility,
    pub filters: Vec<Filter<'f, LocalWorkload>>,
}

impl<'f> LocalQuery<'f> {
    pub fn new(kinds: KindFilter, eligibility: Eligibility) -> Self {
        Self {
            kinds,
            eligibility,
            filters: Vec::new(),
        }
    }

    pub fn filter(mut self, filter: Filter<'f, LocalWorkload>) -> Self {
        self.filters.push(filter);
        self
    }
}

pub struct WorkspaceSelector<'a> {
    base: &'a Selector<'a>,
    ws: &'a dyn Workspace,
    store: &'a dyn Store,
}

impl<'a> WorkspaceSelector<'a> {
    pub fn new(base: &'a Selector<'a>, ws: &'a dyn Workspace, store: &'a dyn Store) -> Self {
        Self { base, ws, store }
    }

    /// Resolve a workload declared in the workspace.
    pub fn local_workload(
        &self,
        message: &str,
        help: &str,
        query: LocalQuery<'_>,
    ) -> SelectResult<LocalWorkload> {
        let declared = self
            .ws
            .list_workloads()
            .stage(|| "retrieve workloads from workspace")?;
        tracing::debug!(count = declared.len(), "listed workspace workloads");

        let (workloads, scope) = match query.eligibility {
            Eligibility::Declared => (declared, "workspace".to_string()),
            Eligibility::Initialized => {
                let app = self.ws.summary().stage(|| "read workspace summary")?.application;
                let initialized: Vec<LocalWorkload> = self
                    .store
                    .list_workloads(&app)
                    .stage(|| "retrieve workloads from store")?
                    .into_iter()
                    .map(|workload| LocalWorkload {
                        name: workload.name,
                        workload_type: Some(workload.workload_type),
                    })
                    .collect();
                let baseline = index_by(&declared, |workload| workload.name.clone());
                let mut reconciled =
                    intersect(&baseline, &initialized, |workload| workload.name.clone());
                let ordered = declared
                    .iter()
                    .filter_map(|workload| reconciled.remove(&workload.name))
                    .collect();
                (ordered, format!("workspace or application {app}"))
            }
        };

        let allowed = query.kinds.allowed_types();
        let workloads: Vec<LocalWorkload> = workloads
            .into_iter()
            .filter(|workload| match workload.workload_type {
                Some(ty) => allowed.contains(&ty),
                None => query.kinds == KindFilter::Any,
            })
            .collect();
        let workloads = apply_filters(workloads, &query.filters)?;

        let candidates: CandidateSet<LocalWorkload> = workloads
            .into_iter()
            .map(|workload| Candidate::new(workload.name.clone(), workload))
            .collect();
        let req = SelectRequest::new(workload_kind(query.kinds), scope, message)
            .help(help)
            .config(PromptConfig::with_final_message(final_message(query.kinds)));
        Ok(self.base.select_one(&req, candidates)?.value)
    }

    /// Resolve an environment that has a workspace manifest and is initialized
    /// in the store.
    pub fn local_environment(&self, message: &str, help: &str) -> SelectResult<Environment> {
        let app = self.ws.summary().stage(|| "read workspace summary")?.application;
        let declared = self
            .ws
            .list_environments()
            .stage(|| "retrieve environments from workspace")?;
        let initialized = self
            .store
            .list_environments(&app)
            .stage(|| "list environments")?;
        tracing::debug!(
            app = app.as_str(),
            declared = declared.len(),
            initialized = initialized.len(),
            "reconciling environments"
        );

        let baseline = index_by(&declared, |name| name.clone());
        let mut reconciled = intersect(&baseline, &initialized, |env| env.name.clone());
        let candidates: CandidateSet<Environment> = declared
            .iter()
            .filter_map(|name| reconciled.remove(name))
            .map(|env| Candidate::new(env.name.clone(), env))
            .collect();
        let req = SelectRequest::new(
            ResourceKind::Environment,
            format!("workspace or application {app}"),
            message,
        )
        .help(help)
        .config(PromptConfig::with_final_message("Environment:"));
        Ok(self.base.select_one(&req, candidates)?.value)
    }
}

#[cfg(test)]
#[path = "workload_tests.rs"]
mod tests;
