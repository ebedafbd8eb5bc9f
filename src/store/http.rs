//! HTTP client for a remote store API.
//!
//! Endpoints are plain JSON `GET`s rooted at the configured base URL:
//!
//! ```text
//! GET /apps
//! GET /apps/{app}/environments
//! GET /apps/{app}/workloads
//! GET /apps/{app}/pipelines
//! GET /apps/{app}/environments/{env}/services      deployed services
//! GET /apps/{app}/environments/{env}/services/{name}   200 or 404
//! GET /apps/{app}/environments/{env}/jobs
//! GET /apps/{app}/environments/{env}/jobs/{name}
//! GET /apps/{app}/environments/{env}/tasks
//! GET /apps/{app}/environments/{env}/topics
//! GET /tasks                                        default cluster
//! ```
use super::{DeployStore, Store};
use crate::model::{Application, Environment, Pipeline, Task, Topic, Workload};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Instant;

pub struct HttpStore {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments);
        let start = Instant::now();
        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .with_context(|| format!("GET {url}"))?;
        let value = response
            .body_mut()
            .read_json::<T>()
            .with_context(|| format!("decode response from {url}"))?;
        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis(),
            url = %url,
            "store request complete"
        );
        Ok(value)
    }

    fn exists(&self, segments: &[&str]) -> Result<bool> {
        let url = self.url(segments);
        match self.agent.get(url.as_str()).call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::StatusCode(404)) => Ok(false),
            Err(err) => Err(err).with_context(|| format!("GET {url}")),
        }
    }
}

impl Store for HttpStore {
    fn list_applications(&self) -> Result<Vec<Application>> {
        self.get_json(&["apps"])
    }

    fn list_environments(&self, app: &str) -> Result<Vec<Environment>> {
        self.get_json(&["apps", app, "environments"])
    }

    fn list_workloads(&self, app: &str) -> Result<Vec<Workload>> {
        self.get_json(&["apps", app, "workloads"])
    }
}

impl DeployStore for HttpStore {
    fn list_deployed_services(&self, app: &str, env: &str) -> Result<Vec<String>> {
        self.get_json(&["apps", app, "environments", env, "services"])
    }

    fn list_deployed_jobs(&self, app: &str, env: &str) -> Result<Vec<String>> {
        self.get_json(&["apps", app, "environments", env, "jobs"])
    }

    fn is_service_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool> {
        self.exists(&["apps", app, "environments", env, "services", name])
    }

    fn is_job_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool> {
        self.exists(&["apps", app, "environments", env, "jobs", name])
    }

    fn list_pipelines(&self, app: &str) -> Result<Vec<Pipeline>> {
        self.get_json(&["apps", app, "pipelines"])
    }

    fn list_running_tasks(&self, app: &str, env: &str) -> Result<Vec<Task>> {
        self.get_json(&["apps", app, "environments", env, "tasks"])
    }

    fn list_default_cluster_tasks(&self) -> Result<Vec<Task>> {
        self.get_json(&["tasks"])
    }

    fn list_topics(&self, app: &str, env: &str) -> Result<Vec<Topic>> {
        self.get_json(&["apps", app, "environments", env, "topics"])
    }
}
