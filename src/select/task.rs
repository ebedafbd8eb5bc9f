//! Running tasks in an application environment or the default cluster.
use super::candidate::{Candidate, CandidateSet, Qualify};
use super::error::{ResourceKind, SelectResult, StageContext};
use super::resolver::{SelectRequest, Selector};
use crate::model::{Task, TASK_GROUP_PREFIX};
use crate::prompt::PromptConfig;
use crate::store::DeployStore;
use std::collections::BTreeMap;

/// Where running tasks are listed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSource {
    AppEnv { app: String, env: String },
    DefaultCluster,
}

/// Options for resolving a running task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub source: TaskSource,
    /// Default cluster only: include tasks not started by this tool.
    pub include_all: bool,
}

impl TaskQuery {
    pub fn app_env(app: impl Into<String>, env: impl Into<String>) -> Self {
        Self {
            source: TaskSource::AppEnv {
                app: app.into(),
                env: env.into(),
            },
            include_all: false,
        }
    }

    pub fn default_cluster(include_all: bool) -> Self {
        Self {
            source: TaskSource::DefaultCluster,
            include_all,
        }
    }
}

pub struct TaskSelector<'a> {
    base: &'a Selector<'a>,
    deploy: &'a dyn DeployStore,
}

impl<'a> TaskSelector<'a> {
    pub fn new(base: &'a Selector<'a>, deploy: &'a dyn DeployStore) -> Self {
        Self { base, deploy }
    }

    pub fn running_task(&self, message: &str, help: &str, query: &TaskQuery) -> SelectResult<Task> {
        let (tasks, scope) = match &query.source {
            TaskSource::AppEnv { app, env } => {
                let tasks = self
                    .deploy
                    .list_running_tasks(app, env)
                    .stage(|| format!("list running tasks in environment {env}"))?;
                (tasks, format!("environment {env} of application {app}"))
            }
            TaskSource::DefaultCluster => {
                let mut tasks = self
                    .deploy
                    .list_default_cluster_tasks()
                    .stage(|| "list running tasks in default cluster")?;
                if !query.include_all {
                    tasks.retain(|task| task.group.starts_with(TASK_GROUP_PREFIX));
                }
                (tasks, "the default cluster".to_string())
            }
        };
        tracing::debug!(count = tasks.len(), "listed running tasks");

        let req = SelectRequest::new(ResourceKind::RunningTask, scope, message)
            .help(help)
            .qualify(Qualify::Always)
            .config(PromptConfig::with_final_message("Task:"));
        Ok(self.base.select_one(&req, task_candidates(tasks))?.value)
    }
}

/// Label tasks by short id, falling back to the full id where short ids collide.
fn task_candidates(tasks: Vec<Task>) -> CandidateSet<Task> {
    let mut short_ids: BTreeMap<String, usize> = BTreeMap::new();
    for task in &tasks {
        *short_ids.entry(task.short_id().to_string()).or_default() += 1;
    }
    tasks
        .into_iter()
        .map(|task| {
            let name = if short_ids.get(task.short_id()).is_some_and(|count| *count > 1) {
                task.id.clone()
            } else {
                task.short_id().to_string()
            };
            Candidate::qualified(name, task.task_definition.clone(), task)
        })
        .collect()
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
