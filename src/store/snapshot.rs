//! File-backed store used offline and in tests.
//!
//! The snapshot is re-read on every call so edits are picked up immediately.
use super::{DeployStore, Store};
use crate::model::{Application, Environment, Pipeline, Task, Topic, Workload, WorkloadType};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk snapshot layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub applications: Vec<AppRecord>,
    #[serde(default)]
    pub default_cluster_tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub workloads: Vec<WorkloadRecord>,
    #[serde(default)]
    pub environments: Vec<EnvRecord>,
    #[serde(default)]
    pub pipelines: Vec<PipelineRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub workload_type: WorkloadType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub prod: bool,
    #[serde(default)]
    pub deployed_services: Vec<String>,
    #[serde(default)]
    pub deployed_jobs: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub topics: Vec<TopicRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRecord {
    pub name: String,
    #[serde(default)]
    pub legacy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    pub name: String,
    pub workload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl StoreSnapshot {
    fn app(&self, app: &str) -> Result<&AppRecord> {
        self.applications
            .iter()
            .find(|record| record.name == app)
            .ok_or_else(|| anyhow!("application {app} not found"))
    }

    fn env(&self, app: &str, env: &str) -> Result<&EnvRecord> {
        self.app(app)?
            .environments
            .iter()
            .find(|record| record.name == env)
            .ok_or_else(|| anyhow!("environment {env} not found in application {app}"))
    }
}

/// Store backed by a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreSnapshot> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read store snapshot {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse store snapshot {}", self.path.display()))
    }
}

impl Store for SnapshotStore {
    fn list_applications(&self) -> Result<Vec<Application>> {
        let snapshot = self.load()?;
        Ok(snapshot
            .applications
            .iter()
            .map(|record| Application {
                name: record.name.clone(),
                domain: record.domain.clone(),
            })
            .collect())
    }

    fn list_environments(&self, app: &str) -> Result<Vec<Environment>> {
        let snapshot = self.load()?;
        Ok(snapshot
            .app(app)?
            .environments
            .iter()
            .map(|record| Environment {
                name: record.name.clone(),
                app: app.to_string(),
                region: record.region.clone(),
                prod: record.prod,
            })
            .collect())
    }

    fn list_workloads(&self, app: &str) -> Result<Vec<Workload>> {
        let snapshot = self.load()?;
        Ok(snapshot
            .app(app)?
            .workloads
            .iter()
            .map(|record| Workload {
                name: record.name.clone(),
                app: app.to_string(),
                workload_type: record.workload_type,
            })
            .collect())
    }
}

impl DeployStore for SnapshotStore {
    fn list_deployed_services(&self, app: &str, env: &str) -> Result<Vec<String>> {
        Ok(self.load()?.env(app, env)?.deployed_services.clone())
    }

    fn list_deployed_jobs(&self, app: &str, env: &str) -> Result<Vec<String>> {
        Ok(self.load()?.env(app, env)?.deployed_jobs.clone())
    }

    fn is_service_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool> {
        let snapshot = self.load()?;
        let env = snapshot.env(app, env)?;
        Ok(env.deployed_services.iter().any(|svc| svc == name))
    }

    fn is_job_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool> {
        let snapshot = self.load()?;
        let env = snapshot.env(app, env)?;
        Ok(env.deployed_jobs.iter().any(|job| job == name))
    }

    fn list_pipelines(&self, app: &str) -> Result<Vec<Pipeline>> {
        let snapshot = self.load()?;
        Ok(snapshot
            .app(app)?
            .pipelines
            .iter()
            .map(|record| Pipeline {
                name: record.name.clone(),
                app: app.to_string(),
                legacy: record.legacy,
            })
            .collect())
    }

    fn list_running_tasks(&self, app: &str, env: &str) -> Result<Vec<Task>> {
        Ok(self.load()?.env(app, env)?.tasks.clone())
    }

    fn list_default_cluster_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.load()?.default_cluster_tasks)
    }

    fn list_topics(&self, app: &str, env: &str) -> Result<Vec<Topic>> {
        let snapshot = self.load()?;
        let record = snapshot.env(app, env)?;
        Ok(record
            .topics
            .iter()
            .map(|topic| Topic {
                name: topic.name.clone(),
                workload: topic.workload.clone(),
                env: env.to_string(),
                arn: topic.arn.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
