//! Scripted collaborators shared by selector tests.
use crate::fs::{DirEntry, FileSystem};
use crate::model::{
    Application, Environment, LocalWorkload, Pipeline, PipelineManifest, Task, Topic, Workload,
    WorkloadType, WorkspaceSummary,
};
use crate::prompt::{PromptConfig, Prompter, Validator};
use crate::store::{DeployStore, Store};
use crate::workspace::Workspace;
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

/// Scripted answer for the next prompt call.
#[derive(Debug, Clone)]
pub(crate) enum Answer {
    One(String),
    Many(Vec<String>),
    Text(String),
    Confirm(bool),
    Fail(String),
}

/// One recorded prompt invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PromptCall {
    pub(crate) method: &'static str,
    pub(crate) message: String,
    pub(crate) options: Vec<String>,
    pub(crate) final_message: Option<String>,
}

/// Prompter that replays answers in order and records every call.
#[derive(Default)]
pub(crate) struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    calls: RefCell<Vec<PromptCall>>,
}

impl ScriptedPrompter {
    pub(crate) fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Prompter that fails the test if it is ever asked anything.
    pub(crate) fn silent() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<PromptCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(
        &self,
        method: &'static str,
        message: &str,
        options: &[String],
        config: &PromptConfig,
    ) {
        self.calls.borrow_mut().push(PromptCall {
            method,
            message: message.to_string(),
            options: options.to_vec(),
            final_message: config.final_message.clone(),
        });
    }

    fn next(&self, method: &str, message: &str) -> Answer {
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {method} prompt: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select_one(
        &self,
        message: &str,
        _help: &str,
        options: &[String],
        config: &PromptConfig,
    ) -> Result<String> {
        self.record("select_one", message, options, config);
        match self.next("select_one", message) {
            Answer::One(answer) => Ok(answer),
            Answer::Fail(reason) => Err(anyhow!(reason)),
            other => panic!("select_one got scripted {other:?}"),
        }
    }

    fn select_many(
        &self,
        message: &str,
        _help: &str,
        options: &[String],
        _preselected: &[String],
        config: &PromptConfig,
    ) -> Result<Vec<String>> {
        self.record("select_many", message, options, config);
        match self.next("select_many", message) {
            Answer::Many(answers) => Ok(answers),
            Answer::Fail(reason) => Err(anyhow!(reason)),
            other => panic!("select_many got scripted {other:?}"),
        }
    }

    fn get_text(
        &self,
        message: &str,
        _help: &str,
        validator: Option<&Validator>,
        config: &PromptConfig,
    ) -> Result<String> {
        self.record("get_text", message, &[], config);
        match self.next("get_text", message) {
            Answer::Text(answer) => {
                if let Some(validator) = validator {
                    validator(&answer).map_err(|reason| anyhow!(reason))?;
                }
                Ok(answer)
            }
            Answer::Fail(reason) => Err(anyhow!(reason)),
            other => panic!("get_text got scripted {other:?}"),
        }
    }

    fn confirm(&self, message: &str, _help: &str, config: &PromptConfig) -> Result<bool> {
        self.record("confirm", message, &[], config);
        match self.next("confirm", message) {
            Answer::Confirm(answer) => Ok(answer),
            Answer::Fail(reason) => Err(anyhow!(reason)),
            other => panic!("confirm got scripted {other:?}"),
        }
    }
}

pub(crate) fn one(answer: &str) -> Answer {
    Answer::One(answer.to_string())
}

pub(crate) fn many(answers: &[&str]) -> Answer {
    Answer::Many(answers.iter().map(|answer| answer.to_string()).collect())
}

pub(crate) fn text(answer: &str) -> Answer {
    Answer::Text(answer.to_string())
}

/// In-memory directory tree; directories listed in `unreadable` fail to read.
#[derive(Default)]
pub(crate) struct MemoryFs {
    dirs: BTreeMap<PathBuf, Vec<DirEntry>>,
    unreadable: Vec<PathBuf>,
}

impl MemoryFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub(crate) fn file(mut self, path: &str) -> Self {
        self.insert(Path::new(path), false);
        self
    }

    /// Add an empty directory, creating its parents.
    pub(crate) fn dir(mut self, path: &str) -> Self {
        self.insert(Path::new(path), true);
        self
    }

    pub(crate) fn unreadable(mut self, path: &str) -> Self {
        self.insert(Path::new(path), true);
        self.unreadable.push(PathBuf::from(path));
        self
    }

    fn insert(&mut self, path: &Path, is_dir: bool) {
        if is_dir {
            self.dirs.entry(path.to_path_buf()).or_default();
        }
        let Some(parent) = path.parent() else {
            return;
        };
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return;
        };
        let siblings = self.dirs.entry(parent.to_path_buf()).or_default();
        if !siblings.iter().any(|entry| entry.name == name) {
            siblings.push(DirEntry {
                name: name.to_string(),
                is_dir,
            });
        }
        if parent.as_os_str().is_empty() || parent == Path::new("/") {
            return;
        }
        self.insert(parent, true);
    }
}

impl FileSystem for MemoryFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        if self.unreadable.iter().any(|blocked| blocked == path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }
}

/// In-memory store and deployment target that records every call.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub(crate) apps: Vec<Application>,
    pub(crate) envs: Vec<Environment>,
    pub(crate) workloads: Vec<Workload>,
    pub(crate) deployed_services: BTreeMap<String, Vec<String>>,
    pub(crate) deployed_jobs: BTreeMap<String, Vec<String>>,
    pub(crate) pipelines: Vec<Pipeline>,
    pub(crate) tasks: BTreeMap<String, Vec<Task>>,
    pub(crate) default_tasks: Vec<Task>,
    pub(crate) topics: BTreeMap<String, Vec<Topic>>,
    /// Methods that fail with "<method> unavailable".
    pub(crate) failing: Vec<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn app(mut self, name: &str) -> Self {
        self.apps.push(Application {
            name: name.to_string(),
            domain: None,
        });
        self
    }

    pub(crate) fn env(mut self, app: &str, name: &str) -> Self {
        self.envs.push(Environment {
            name: name.to_string(),
            app: app.to_string(),
            region: None,
            prod: false,
        });
        self
    }

    pub(crate) fn workload(mut self, app: &str, name: &str, ty: WorkloadType) -> Self {
        self.workloads.push(Workload {
            name: name.to_string(),
            app: app.to_string(),
            workload_type: ty,
        });
        self
    }

    pub(crate) fn deployed_service(mut self, env: &str, name: &str) -> Self {
        self.deployed_services
            .entry(env.to_string())
            .or_default()
            .push(name.to_string());
        self
    }

    pub(crate) fn deployed_job(mut self, env: &str, name: &str) -> Self {
        self.deployed_jobs
            .entry(env.to_string())
            .or_default()
            .push(name.to_string());
        self
    }

    pub(crate) fn topic(mut self, env: &str, workload: &str, name: &str) -> Self {
        self.topics.entry(env.to_string()).or_default().push(Topic {
            name: name.to_string(),
            workload: workload.to_string(),
            env: env.to_string(),
            arn: None,
        });
        self
    }

    pub(crate) fn task(mut self, env: &str, id: &str, task_definition: &str) -> Self {
        self.tasks.entry(env.to_string()).or_default().push(Task {
            id: id.to_string(),
            task_definition: task_definition.to_string(),
            group: String::new(),
            started_at: None,
        });
        self
    }

    pub(crate) fn failing(mut self, method: &'static str) -> Self {
        self.failing.push(method);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of calls to `method`, ignoring arguments.
    pub(crate) fn count(&self, method: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.split('(').next() == Some(method))
            .count()
    }

    fn call(&self, method: &'static str, args: &[&str]) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("{method}({})", args.join(", ")));
        if self.failing.contains(&method) {
            return Err(anyhow!("{method} unavailable"));
        }
        Ok(())
    }
}

impl Store for FakeBackend {
    fn list_applications(&self) -> Result<Vec<Application>> {
        self.call("list_applications", &[])?;
        Ok(self.apps.clone())
    }

    fn list_environments(&self, app: &str) -> Result<Vec<Environment>> {
        self.call("list_environments", &[app])?;
        Ok(self.envs.iter().filter(|env| env.app == app).cloned().collect())
    }

    fn list_workloads(&self, app: &str) -> Result<Vec<Workload>> {
        self.call("list_workloads", &[app])?;
        Ok(self
            .workloads
            .iter()
            .filter(|workload| workload.app == app)
            .cloned()
            .collect())
    }
}

impl DeployStore for FakeBackend {
    fn list_deployed_services(&self, app: &str, env: &str) -> Result<Vec<String>> {
        self.call("list_deployed_services", &[app, env])?;
        Ok(self.deployed_services.get(env).cloned().unwrap_or_default())
    }

    fn list_deployed_jobs(&self, app: &str, env: &str) -> Result<Vec<String>> {
        self.call("list_deployed_jobs", &[app, env])?;
        Ok(self.deployed_jobs.get(env).cloned().unwrap_or_default())
    }

    fn is_service_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool> {
        self.call("is_service_deployed", &[app, env, name])?;
        Ok(self
            .deployed_services
            .get(env)
            .is_some_and(|names| names.iter().any(|svc| svc == name)))
    }

    fn is_job_deployed(&self, app: &str, env: &str, name: &str) -> Result<bool> {
        self.call("is_job_deployed", &[app, env, name])?;
        Ok(self
            .deployed_jobs
            .get(env)
            .is_some_and(|names| names.iter().any(|job| job == name)))
    }

    fn list_pipelines(&self, app: &str) -> Result<Vec<Pipeline>> {
        self.call("list_pipelines", &[app])?;
        Ok(self.pipelines.clone())
    }

    fn list_running_tasks(&self, app: &str, env: &str) -> Result<Vec<Task>> {
        self.call("list_running_tasks", &[app, env])?;
        Ok(self.tasks.get(env).cloned().unwrap_or_default())
    }

    fn list_default_cluster_tasks(&self) -> Result<Vec<Task>> {
        self.call("list_default_cluster_tasks", &[])?;
        Ok(self.default_tasks.clone())
    }

    fn list_topics(&self, app: &str, env: &str) -> Result<Vec<Topic>> {
        self.call("list_topics", &[app, env])?;
        Ok(self.topics.get(env).cloned().unwrap_or_default())
    }
}

/// In-memory workspace.
#[derive(Default)]
pub(crate) struct FakeWorkspace {
    pub(crate) application: Option<String>,
    pub(crate) workloads: Vec<LocalWorkload>,
    pub(crate) envs: Vec<String>,
    pub(crate) pipelines: Vec<PipelineManifest>,
    pub(crate) failing: Vec<&'static str>,
}

impl FakeWorkspace {
    pub(crate) fn for_app(app: &str) -> Self {
        Self {
            application: Some(app.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn workload(mut self, name: &str, ty: Option<WorkloadType>) -> Self {
        self.workloads.push(LocalWorkload {
            name: name.to_string(),
            workload_type: ty,
        });
        self
    }

    pub(crate) fn env(mut self, name: &str) -> Self {
        self.envs.push(name.to_string());
        self
    }

    pub(crate) fn pipeline(mut self, name: &str) -> Self {
        self.pipelines.push(PipelineManifest {
            name: name.to_string(),
            path: PathBuf::from(format!("berth/pipelines/{name}/manifest.json")),
        });
        self
    }

    pub(crate) fn failing(mut self, method: &'static str) -> Self {
        self.failing.push(method);
        self
    }

    fn check(&self, method: &'static str) -> Result<()> {
        if self.failing.contains(&method) {
            return Err(anyhow!("{method} unavailable"));
        }
        Ok(())
    }
}

impl Workspace for FakeWorkspace {
    fn summary(&self) -> Result<WorkspaceSummary> {
        self.check("summary")?;
        let application = self
            .application
            .clone()
            .ok_or_else(|| anyhow!("workspace is not associated with an application"))?;
        Ok(WorkspaceSummary { application })
    }

    fn list_workloads(&self) -> Result<Vec<LocalWorkload>> {
        self.check("list_workloads")?;
        Ok(self.workloads.clone())
    }

    fn list_environments(&self) -> Result<Vec<String>> {
        self.check("list_environments")?;
        Ok(self.envs.clone())
    }

    fn list_pipelines(&self) -> Result<Vec<PipelineManifest>> {
        self.check("list_pipelines")?;
        Ok(self.pipelines.clone())
    }
}
