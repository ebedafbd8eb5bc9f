//! Resource resolution: turn "which resource does the user mean" into one
//! concrete choice.
//!
//! Candidates are gathered fresh on every call from the workspace, the store,
//! the deployment target, or the filesystem, reconciled and filtered, and then
//! either returned directly or offered through the [`Prompter`]. Nothing is
//! cached between calls.
//!
//! [`Prompter`]: crate::prompt::Prompter
mod app;
mod candidate;
mod deployed;
mod error;
mod filter;
mod local;
mod paths;
mod pipeline;
mod reconcile;
mod resolver;
mod schedule;
mod task;
mod topic;
mod workload;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{AppSelector, NO_MORE_ENVIRONMENTS};
pub use candidate::{Candidate, CandidateSet, Qualify};
pub use deployed::{DeploySelector, DeployedQuery};
pub use error::{ResourceKind, SelectError, SelectResult};
pub use filter::{apply_filters, has_type, predicate, Filter};
pub use local::{
    DockerfileChoice, LocalFileSelector, DOCKERFILE_CUSTOM_OPTION, DOCKERFILE_IMAGE_OPTION,
    STATIC_SOURCE_CUSTOM_OPTION,
};
pub use paths::{discover_dockerfiles, discover_static_sources, is_dockerfile, StaticSourceWalk};
pub use pipeline::PipelineSelector;
pub use reconcile::{index_by, intersect};
pub use resolver::{ordinal, CascadeRequest, Choice, SelectRequest, Selector, DEFAULT_STOP_LABEL};
pub use schedule::{validate_cron, validate_rate, ScheduleSelector};
pub use task::{TaskQuery, TaskSelector, TaskSource};
pub use topic::TopicSelector;
pub use workload::{Eligibility, LocalQuery, WorkspaceSelector};
