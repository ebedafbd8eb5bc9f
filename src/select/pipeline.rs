//! Pipelines declared in the workspace or deployed in the store.
use super::candidate::{Candidate, CandidateSet};
use super::error::{ResourceKind, SelectResult, StageContext};
use super::resolver::{SelectRequest, Selector};
use crate::model::{Pipeline, PipelineManifest};
use crate::prompt::PromptConfig;
use crate::store::DeployStore;
use crate::workspace::Workspace;

pub struct PipelineSelector<'a> {
    base: &'a Selector<'a>,
    ws: &'a dyn Workspace,
    deploy: &'a dyn DeployStore,
}

impl<'a> PipelineSelector<'a> {
    pub fn new(base: &'a Selector<'a>, ws: &'a dyn Workspace, deploy: &'a dyn DeployStore) -> Self {
        Self { base, ws, deploy }
    }

    /// Resolve a pipeline manifest, including a legacy `pipeline.json`.
    pub fn workspace_pipeline(&self, message: &str, help: &str) -> SelectResult<PipelineManifest> {
        let manifests = self
            .ws
            .list_pipelines()
            .stage(|| "list pipelines from workspace")?;
        let candidates: CandidateSet<PipelineManifest> = manifests
            .into_iter()
            .map(|manifest| Candidate::new(manifest.name.clone(), manifest))
            .collect();
        let req = SelectRequest::new(ResourceKind::Pipeline, "workspace", message)
            .help(help)
            .config(PromptConfig::with_final_message("Pipeline:"));
        Ok(self.base.select_one(&req, candidates)?.value)
    }

    /// Resolve a pipeline deployed for `app`.
    pub fn deployed_pipeline(
        &self,
        message: &str,
        help: &str,
        app: &str,
    ) -> SelectResult<Pipeline> {
        let pipelines = self
            .deploy
            .list_pipelines(app)
            .stage(|| format!("list deployed pipelines for application {app}"))?;
        tracing::debug!(app, count = pipelines.len(), "listed deployed pipelines");
        let candidates: CandidateSet<Pipeline> = pipelines
            .into_iter()
            .map(|pipeline| Candidate::new(pipeline.name.clone(), pipeline))
            .collect();
        let scope = format!("application {app}");
        let req = SelectRequest::new(ResourceKind::DeployedPipeline, scope, message)
            .help(help)
            .config(PromptConfig::with_final_message("Pipeline:"));
        Ok(self.base.select_one(&req, candidates)?.value)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
