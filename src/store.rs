//! Remote store and deployment target collaborators.
//!
//! The store is authoritative for what exists (applications, environments,
//! workloads); the deployment target reports what is actually running. Both
//! are read fresh on every call.
mod http;
mod snapshot;

pub use http::HttpStore;
pub use snapshot::{SnapshotStore, StoreSnapshot};

use crate::model::{Application, Environment, Pipeline, Task, Topic, Workload};
use anyhow::Result;

/// Authoritative registry of applications and their resources.
pub trait Store {
    fn list_applications(&self) -> Result<Vec<Application>>;
    fn list_environments(&self, app: &str) -> Result<Vec<Environment>>;
    fn list_workloads(&self, app: &str) -> Result<Vec<Workload>>;
}

/// Deployment status of workloads, pipelines, tasks and topics.
pub trait DeployStore {
    fn list_deployed_services(&self, app: &str, env: &str) -> Result<Vec<String>>;
    fn list_deployed_jobs(&self, app: &str, env: &str) -> Result<Vec<String>>;
    fn is_service_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool>;
    fn is_job_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool>;
    fn list_pipelines(&self, app: &str) -> Result<Vec<Pipeline>>;
    fn list_running_tasks(&self, app: &str, env: &str) -> Result<Vec<Task>>;
    fn list_default_cluster_tasks(&self) -> Result<Vec<Task>>;
    fn list_topics(&self, app: &str, env: &str) -> Result<Vec<Topic>>;
}

/// A backend that can answer both store and deployment queries.
pub trait Backend: Store + DeployStore {
    fn as_store(&self) -> &dyn Store;
    fn as_deploy(&self) -> &dyn DeployStore;
}

impl<T: Store + DeployStore> Backend for T {
    fn as_store(&self) -> &dyn Store {
        self
    }

    fn as_deploy(&self) -> &dyn DeployStore {
        self
    }
}

/// Open the backend named by a store location.
///
/// `http://` and `https://` locations use the HTTP API; anything else is a
/// snapshot file path.
pub fn open_backend(location: &str) -> Box<dyn Backend> {
    if location.starts_with("http://") || location.starts_with("https://") {
        tracing::debug!(endpoint = location, "using HTTP store");
        Box::new(HttpStore::new(location))
    } else {
        tracing::debug!(path = location, "using snapshot store");
        Box::new(SnapshotStore::new(location))
    }
}
