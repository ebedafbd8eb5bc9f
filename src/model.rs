//! Typed records exchanged with the store, deployment target, and workspace.
//!
//! These mirror the JSON the collaborators speak so listings can be decoded
//! directly without an intermediate representation.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix applied to task groups started by the tool.
pub const TASK_GROUP_PREFIX: &str = "berth-";

/// Application registered in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Environment registered under an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub app: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub prod: bool,
}

/// Workload types the tool knows how to deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkloadType {
    #[serde(rename = "Load Balanced Web Service")]
    LoadBalancedWebService,
    #[serde(rename = "Backend Service")]
    BackendService,
    #[serde(rename = "Worker Service")]
    WorkerService,
    #[serde(rename = "Request-Driven Web Service")]
    RequestDrivenWebService,
    #[serde(rename = "Static Site")]
    StaticSite,
    #[serde(rename = "Scheduled Job")]
    ScheduledJob,
}

impl WorkloadType {
    pub const SERVICES: &'static [WorkloadType] = &[
        WorkloadType::LoadBalancedWebService,
        WorkloadType::BackendService,
        WorkloadType::WorkerService,
        WorkloadType::RequestDrivenWebService,
        WorkloadType::StaticSite,
    ];
    pub const JOBS: &'static [WorkloadType] = &[WorkloadType::ScheduledJob];
    pub const ALL: &'static [WorkloadType] = &[
        WorkloadType::LoadBalancedWebService,
        WorkloadType::BackendService,
        WorkloadType::WorkerService,
        WorkloadType::RequestDrivenWebService,
        WorkloadType::StaticSite,
        WorkloadType::ScheduledJob,
    ];

    /// Return the display name used in manifests and store records.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadType::LoadBalancedWebService => "Load Balanced Web Service",
            WorkloadType::BackendService => "Backend Service",
            WorkloadType::WorkerService => "Worker Service",
            WorkloadType::RequestDrivenWebService => "Request-Driven Web Service",
            WorkloadType::StaticSite => "Static Site",
            WorkloadType::ScheduledJob => "Scheduled Job",
        }
    }

    pub fn kind(&self) -> WorkloadKind {
        if WorkloadType::JOBS.contains(self) {
            WorkloadKind::Job
        } else {
            WorkloadKind::Service
        }
    }
}

impl fmt::Display for WorkloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        WorkloadType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown workload type {wanted:?}"))
    }
}

/// Coarse split between long-running services and scheduled jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadKind {
    Service,
    Job,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Service => "service",
            WorkloadKind::Job => "job",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which workload kinds a query admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    Services,
    Jobs,
    #[default]
    Any,
}

impl KindFilter {
    /// Return the type allow-list for this filter.
    pub fn allowed_types(&self) -> &'static [WorkloadType] {
        match self {
            KindFilter::Services => WorkloadType::SERVICES,
            KindFilter::Jobs => WorkloadType::JOBS,
            KindFilter::Any => WorkloadType::ALL,
        }
    }

    pub fn admits(&self, kind: WorkloadKind) -> bool {
        match self {
            KindFilter::Services => kind == WorkloadKind::Service,
            KindFilter::Jobs => kind == WorkloadKind::Job,
            KindFilter::Any => true,
        }
    }
}

/// Workload initialized in the store for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub name: String,
    pub app: String,
    #[serde(rename = "type")]
    pub workload_type: WorkloadType,
}

/// Workload resolved against a specific environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedWorkload {
    pub name: String,
    pub env: String,
    pub kind: WorkloadKind,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workload_type: Option<WorkloadType>,
}

impl fmt::Display for DeployedWorkload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.env)
    }
}

/// Workload declared by a manifest in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalWorkload {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workload_type: Option<WorkloadType>,
}

/// Pipeline deployed in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    pub app: String,
    #[serde(default)]
    pub legacy: bool,
}

/// Pipeline manifest declared in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineManifest {
    pub name: String,
    pub path: PathBuf,
}

/// Running task reported by the deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub task_definition: String,
    #[serde(default)]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

impl Task {
    /// Return the first eight characters of the task id.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// Topic published by a workload in one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub workload: String,
    pub env: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl Topic {
    /// Environment-independent identity used to match a topic across environments.
    pub fn id(&self) -> String {
        format!("{}-{}", self.workload, self.name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.workload)
    }
}

/// Workspace-level facts, currently just the owning application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub application: String,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
