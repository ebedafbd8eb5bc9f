//! Error taxonomy for resource resolution.
use std::fmt;
use thiserror::Error;

/// Resource kinds the selectors resolve, used to name failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Application,
    Environment,
    Service,
    Job,
    Workload,
    DeployedService,
    DeployedJob,
    DeployedWorkload,
    Pipeline,
    DeployedPipeline,
    RunningTask,
    Topic,
    Dockerfile,
    StaticSource,
    Schedule,
}

impl ResourceKind {
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Application => "application",
            ResourceKind::Environment => "environment",
            ResourceKind::Service => "service",
            ResourceKind::Job => "job",
            ResourceKind::Workload => "workload",
            ResourceKind::DeployedService => "deployed service",
            ResourceKind::DeployedJob => "deployed job",
            ResourceKind::DeployedWorkload => "deployed workload",
            ResourceKind::Pipeline => "pipeline",
            ResourceKind::DeployedPipeline => "deployed pipeline",
            ResourceKind::RunningTask => "running task",
            ResourceKind::Topic => "topic",
            ResourceKind::Dockerfile => "Dockerfile",
            ResourceKind::StaticSource => "static source",
            ResourceKind::Schedule => "schedule",
        }
    }

    pub fn plural(&self) -> String {
        format!("{}s", self.singular())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Failure surfaced by a selector.
///
/// Every message names the operation and the resource kind so callers can
/// print it as-is.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no {} found in {scope}", .kind.plural())]
    NotFound { kind: ResourceKind, scope: String },

    #[error("{stage}: {source}")]
    Collaborator {
        stage: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{action}: {source}")]
    Prompt {
        action: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Filter(anyhow::Error),

    #[error("{kind} {name} is not deployed in environment {env}")]
    NotDeployed {
        kind: ResourceKind,
        name: String,
        env: String,
    },

    #[error("verify {kind} {name} is deployed in environment {env}: {source}")]
    VerificationCheck {
        kind: ResourceKind,
        name: String,
        env: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("choice {label:?} does not match any offered option")]
    UnknownChoice { label: String },

    #[error("option {label:?} would be offered more than once")]
    DuplicateOption { label: String },
}

impl SelectError {
    pub fn not_found(kind: ResourceKind, scope: impl Into<String>) -> Self {
        SelectError::NotFound {
            kind,
            scope: scope.into(),
        }
    }

    pub fn collaborator(stage: impl Into<String>, source: anyhow::Error) -> Self {
        SelectError::Collaborator {
            stage: stage.into(),
            source,
        }
    }

    pub fn prompt(action: impl Into<String>, source: anyhow::Error) -> Self {
        SelectError::Prompt {
            action: action.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SelectError::NotFound { .. })
    }

    /// True for failures of a targeted deployment check.
    pub fn is_verification(&self) -> bool {
        matches!(
            self,
            SelectError::NotDeployed { .. } | SelectError::VerificationCheck { .. }
        )
    }
}

pub type SelectResult<T> = std::result::Result<T, SelectError>;

/// Attach a stage label to a collaborator result.
pub(crate) trait StageContext<T> {
    fn stage<S, F>(self, stage: F) -> SelectResult<T>
    where
        S: Into<String>,
        F: FnOnce() -> S;
}

impl<T> StageContext<T> for anyhow::Result<T> {
    fn stage<S, F>(self, stage: F) -> SelectResult<T>
    where
        S: Into<String>,
        F: FnOnce() -> S,
    {
        self.map_err(|source| SelectError::collaborator(stage(), source))
    }
}
