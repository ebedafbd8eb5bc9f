//! Command handlers: wire collaborators into selectors and print the result.
//!
//! Resolved values go to stdout, as plain text or with `--json` as JSON.
//! Prompts and logs use stderr.
use crate::cli::{
    AppArgs, Command, DeployedArgs, DockerfileArgs, EnvArgs, EnvsArgs, GlobalArgs, InitArgs,
    KindArg, LocalWorkloadArgs, PipelineArgs, RootArgs, StaticSourcesArgs, TaskArgs, TopicsArgs,
    WorkloadArgs,
};
use crate::config::{self, BerthConfig};
use crate::fs::OsFileSystem;
use crate::model::{KindFilter, WorkloadType};
use crate::prompt::{PromptConfig, Prompter, TerminalPrompter};
use crate::select::{
    AppSelector, Choice, DeploySelector, DeployedQuery, DockerfileChoice, Eligibility,
    LocalFileSelector, LocalQuery, PipelineSelector, ScheduleSelector, Selector, StaticSourceWalk,
    TaskQuery, TaskSelector, TopicSelector, WorkspaceSelector,
};
use crate::store::{self, Backend, DeployStore, Store};
use crate::workspace::{FsWorkspace, Workspace};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::json;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Collaborators shared by every resolving command.
struct Session<'a> {
    global: &'a GlobalArgs,
    store: &'a dyn Store,
    deploy: &'a dyn DeployStore,
    base: Selector<'a>,
}

impl Session<'_> {
    fn workspace(&self) -> Result<FsWorkspace> {
        match &self.global.workspace {
            Some(dir) => Ok(FsWorkspace::open(dir.clone())),
            None => {
                let cwd = std::env::current_dir().context("read current directory")?;
                FsWorkspace::discover(&cwd)
            }
        }
    }

    /// Use `explicit`, or the application the workspace belongs to.
    fn app_name(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(app) = explicit {
            return Ok(app.to_string());
        }
        let ws = self
            .workspace()
            .context("find workspace (or pass --app)")?;
        Ok(ws.summary().context("read workspace summary")?.application)
    }
}

/// Dispatch one parsed command.
pub fn run(args: RootArgs) -> Result<()> {
    let global = args.global;
    let config_path = config::config_path(global.config.as_deref())?;
    if let Command::Init(init) = &args.command {
        let prompter = TerminalPrompter::new(None);
        let interactive = io::stderr().is_terminal() && io::stdin().is_terminal();
        return run_init(&config_path, init, interactive.then_some(&prompter as &dyn Prompter));
    }

    let config = config::load_config(&config_path)?;
    let backend = open_store(&global, &config)?;
    let prompter = TerminalPrompter::new(config.page_size);
    let session = Session {
        global: &global,
        store: backend.as_store(),
        deploy: backend.as_deploy(),
        base: Selector::new(&prompter),
    };

    let started = std::time::Instant::now();
    let result = match &args.command {
        Command::Init(_) => Ok(()),
        Command::App(args) => run_app(&session, args),
        Command::Env(args) => run_env(&session, args),
        Command::Envs(args) => run_envs(&session, args),
        Command::LocalEnv => run_local_env(&session),
        Command::Workload(args) => run_workload(&session, args),
        Command::LocalWorkload(args) => run_local_workload(&session, args),
        Command::Deployed(args) => run_deployed(&session, args),
        Command::Pipeline(args) => run_pipeline(&session, args),
        Command::Task(args) => run_task(&session, args),
        Command::Topics(args) => run_topics(&session, args),
        Command::Dockerfile(args) => run_dockerfile(&session, args),
        Command::StaticSources(args) => run_static_sources(&session, args),
        Command::Schedule => run_schedule(&session),
    };
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis(),
        ok = result.is_ok(),
        "command finished"
    );
    result
}

fn open_store(global: &GlobalArgs, config: &BerthConfig) -> Result<Box<dyn Backend>> {
    let location = config::resolve_store_location(
        global.store.as_deref(),
        config,
        std::env::var(config::STORE_ENV_VAR).ok(),
    )?;
    Ok(store::open_backend(&location))
}

/// Write the default config. An existing file is only replaced with `--force`
/// or after the user confirms.
pub fn run_init(path: &Path, args: &InitArgs, prompt: Option<&dyn Prompter>) -> Result<()> {
    if path.is_file() && !args.force {
        let confirmed = match prompt {
            Some(prompt) => prompt
                .confirm(
                    &format!("Overwrite the config at {}?", path.display()),
                    "",
                    &PromptConfig::default(),
                )
                .context("confirm config overwrite")?,
            None => false,
        };
        if !confirmed {
            return Err(anyhow!(
                "config already exists at {} (use --force to overwrite)",
                path.display()
            ));
        }
    }
    config::write_config(path, &config::default_config())?;
    println!("wrote {}", path.display());
    Ok(())
}

fn run_app(session: &Session<'_>, args: &AppArgs) -> Result<()> {
    let extras: Vec<&str> = args.extra.iter().map(String::as_str).collect();
    let choice = AppSelector::new(&session.base, session.store).application(
        "Which application?",
        "An application groups environments, services and jobs.",
        &extras,
    )?;
    match choice {
        Choice::Candidate(candidate) => emit(session, &candidate.value, &candidate.value.name),
        Choice::Extra(label) => emit(session, &json!({ "extra": label }), &label),
    }
}

fn run_env(session: &Session<'_>, args: &EnvArgs) -> Result<()> {
    let app = session.app_name(args.app.as_deref())?;
    let extras: Vec<&str> = args.extra.iter().map(String::as_str).collect();
    let choice = AppSelector::new(&session.base, session.store).environment(
        "Which environment?",
        "",
        &app,
        &extras,
    )?;
    match choice {
        Choice::Candidate(candidate) => emit(session, &candidate.value, &candidate.value.name),
        Choice::Extra(label) => emit(session, &json!({ "extra": label }), &label),
    }
}

fn run_envs(session: &Session<'_>, args: &EnvsArgs) -> Result<()> {
    let app = session.app_name(args.app.as_deref())?;
    let message = |nth: &str| format!("Which environment should be deployed to {nth}?");
    let envs = AppSelector::new(&session.base, session.store).environments(
        &message,
        "Environments are deployed in the order chosen.",
        &app,
    )?;
    let lines: Vec<&str> = envs.iter().map(|env| env.name.as_str()).collect();
    emit(session, &envs, &lines.join("\n"))
}

fn run_local_env(session: &Session<'_>) -> Result<()> {
    let ws = session.workspace()?;
    let env = WorkspaceSelector::new(&session.base, &ws, session.store)
        .local_environment("Which environment?", "")?;
    emit(session, &env, &env.name)
}

fn run_workload(session: &Session<'_>, args: &WorkloadArgs) -> Result<()> {
    let app = session.app_name(args.app.as_deref())?;
    let kinds = kind_filter(args.kind);
    let workload = AppSelector::new(&session.base, session.store).workload(
        &format!("Which {}?", noun(kinds)),
        "",
        &app,
        kinds,
    )?;
    emit(session, &workload, &workload.name)
}

fn run_local_workload(session: &Session<'_>, args: &LocalWorkloadArgs) -> Result<()> {
    let ws = session.workspace()?;
    let kinds = kind_filter(args.kind);
    let eligibility = if args.initialized {
        Eligibility::Initialized
    } else {
        Eligibility::Declared
    };
    let workload = WorkspaceSelector::new(&session.base, &ws, session.store).local_workload(
        &format!("Which {}?", noun(kinds)),
        "",
        LocalQuery::new(kinds, eligibility),
    )?;
    emit(session, &workload, &workload.name)
}

fn run_deployed(session: &Session<'_>, args: &DeployedArgs) -> Result<()> {
    let app = session.app_name(args.app.as_deref())?;
    let kinds = kind_filter(args.kind);
    let types = args
        .types
        .iter()
        .map(|value| WorkloadType::from_str(value).map_err(|err| anyhow!(err)))
        .collect::<Result<Vec<_>>>()?;
    let mut query = DeployedQuery::new(kinds).types(&types);
    query.env = args.env.clone();
    query.name = args.name.clone();
    let workload = DeploySelector::new(&session.base, session.store, session.deploy)
        .deployed_workload(&format!("Which deployed {}?", noun(kinds)), "", &app, query)?;
    emit(session, &workload, &workload.to_string())
}

fn run_pipeline(session: &Session<'_>, args: &PipelineArgs) -> Result<()> {
    let ws = session.workspace()?;
    let selector = PipelineSelector::new(&session.base, &ws, session.deploy);
    if args.deployed {
        let app = session.app_name(args.app.as_deref())?;
        let pipeline = selector.deployed_pipeline("Which deployed pipeline?", "", &app)?;
        return emit(session, &pipeline, &pipeline.name);
    }
    let manifest = selector.workspace_pipeline("Which pipeline?", "")?;
    emit(session, &manifest, &manifest.name)
}

fn run_task(session: &Session<'_>, args: &TaskArgs) -> Result<()> {
    let query = if args.default_cluster {
        TaskQuery::default_cluster(args.all)
    } else {
        let app = session.app_name(args.app.as_deref())?;
        let env = args
            .env
            .clone()
            .ok_or_else(|| anyhow!("--env is required unless --default-cluster is set"))?;
        TaskQuery::app_env(app, env)
    };
    let task = TaskSelector::new(&session.base, session.deploy).running_task(
        "Which task?",
        "",
        &query,
    )?;
    emit(session, &task, &task.id)
}

fn run_topics(session: &Session<'_>, args: &TopicsArgs) -> Result<()> {
    let app = session.app_name(args.app.as_deref())?;
    let topics = TopicSelector::new(&session.base, session.store, session.deploy).topics(
        "Which topics should the worker subscribe to?",
        "Only topics published in every environment are listed.",
        &app,
    )?;
    let lines: Vec<String> = topics.iter().map(|topic| topic.id()).collect();
    emit(session, &topics, &lines.join("\n"))
}

fn run_dockerfile(session: &Session<'_>, args: &DockerfileArgs) -> Result<()> {
    let root = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("read current directory")?,
    };
    let fs = OsFileSystem;
    let choice = LocalFileSelector::new(&session.base, &fs).dockerfile(
        "Which Dockerfile would you like to use?",
        "Dockerfiles found in this directory and one level below.",
        &root,
    )?;
    let text = match &choice {
        DockerfileChoice::Path(path) => path.clone(),
        DockerfileChoice::Image => "image".to_string(),
    };
    emit(session, &choice, &text)
}

fn run_static_sources(session: &Session<'_>, args: &StaticSourcesArgs) -> Result<()> {
    let ws = session.workspace()?;
    let root: PathBuf = ws.project_root().to_path_buf();
    let mut walk = StaticSourceWalk::new(root, ws.config_dir());
    walk.max_depth = args.max_depth;
    let fs = OsFileSystem;
    let sources = LocalFileSelector::new(&session.base, &fs).static_sources(
        "Which files and directories would you like to upload?",
        "Paths are relative to the project root.",
        &walk,
    )?;
    emit(session, &sources, &sources.join("\n"))
}

fn run_schedule(session: &Session<'_>) -> Result<()> {
    let schedule = ScheduleSelector::new(&session.base)
        .schedule("How would you like to schedule your job?", "")?;
    emit(session, &json!({ "schedule": schedule }), &schedule)
}

fn emit<T: Serialize + ?Sized>(session: &Session<'_>, value: &T, text: &str) -> Result<()> {
    if session.global.json {
        let text = serde_json::to_string_pretty(value).context("serialize result")?;
        println!("{text}");
    } else if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

fn kind_filter(kind: KindArg) -> KindFilter {
    match kind {
        KindArg::Services => KindFilter::Services,
        KindArg::Jobs => KindFilter::Jobs,
        KindArg::Any => KindFilter::Any,
    }
}

fn noun(kinds: KindFilter) -> &'static str {
    match kinds {
        KindFilter::Services => "service",
        KindFilter::Jobs => "job",
        KindFilter::Any => "workload",
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
