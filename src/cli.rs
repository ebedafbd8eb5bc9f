//! CLI argument parsing for the selector commands.
//!
//! Every command resolves one kind of resource and prints it. Flags only
//! supply collaborators and pre-selections; resolution policy lives in
//! `select`.
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "berth",
    version,
    about = "Resolve deployment resources from the workspace and the store",
    after_help = "Examples:\n  berth app\n  berth envs --app demo\n  berth deployed --app demo --env test --name api\n  berth local-workload --kind services --initialized\n  berth dockerfile --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Project directory containing the berth/ workspace (defaults to the nearest one)
    #[arg(long, value_name = "DIR", global = true)]
    pub workspace: Option<PathBuf>,

    /// Store location: a snapshot file or an http(s) base URL
    #[arg(long, value_name = "LOC", global = true)]
    pub store: Option<String>,

    /// Config file (defaults to <config dir>/berth/config.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Log collaborator calls and resolution steps
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Top-level commands, one per resource kind.
#[derive(Subcommand, Debug)]
pub enum Command {
    Init(InitArgs),
    App(AppArgs),
    Env(EnvArgs),
    Envs(EnvsArgs),
    LocalEnv,
    Workload(WorkloadArgs),
    LocalWorkload(LocalWorkloadArgs),
    Deployed(DeployedArgs),
    Pipeline(PipelineArgs),
    Task(TaskArgs),
    Topics(TopicsArgs),
    Dockerfile(DockerfileArgs),
    StaticSources(StaticSourcesArgs),
    Schedule,
}

/// Workload kinds accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindArg {
    Services,
    Jobs,
    #[default]
    Any,
}

#[derive(Parser, Debug)]
#[command(about = "Write the default config file")]
pub struct InitArgs {
    /// Overwrite an existing config.json
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Choose an application")]
pub struct AppArgs {
    /// Extra option offered after the applications (repeatable)
    #[arg(long = "extra", value_name = "LABEL")]
    pub extra: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Choose one environment of an application")]
pub struct EnvArgs {
    /// Application name (defaults to the workspace application)
    #[arg(long)]
    pub app: Option<String>,

    /// Extra option offered after the environments (repeatable)
    #[arg(long = "extra", value_name = "LABEL")]
    pub extra: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Choose an ordered list of environments")]
pub struct EnvsArgs {
    /// Application name (defaults to the workspace application)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Choose a workload initialized in the store")]
pub struct WorkloadArgs {
    /// Application name (defaults to the workspace application)
    #[arg(long)]
    pub app: Option<String>,

    #[arg(long, value_enum, default_value_t = KindArg::Any)]
    pub kind: KindArg,
}

#[derive(Parser, Debug)]
#[command(about = "Choose a workload declared in the workspace")]
pub struct LocalWorkloadArgs {
    #[arg(long, value_enum, default_value_t = KindArg::Any)]
    pub kind: KindArg,

    /// Only offer workloads also initialized in the store
    #[arg(long)]
    pub initialized: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Choose a deployed workload and its environment")]
pub struct DeployedArgs {
    /// Application name (defaults to the workspace application)
    #[arg(long)]
    pub app: Option<String>,

    /// Environment to look in; with --name the deployment is checked directly
    #[arg(long)]
    pub env: Option<String>,

    /// Workload name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_enum, default_value_t = KindArg::Any)]
    pub kind: KindArg,

    /// Workload type allow-list, e.g. "Backend Service" (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Choose a pipeline")]
pub struct PipelineArgs {
    /// Choose among pipelines deployed in the store instead of the workspace
    #[arg(long)]
    pub deployed: bool,

    /// Application name for --deployed (defaults to the workspace application)
    #[arg(long, requires = "deployed")]
    pub app: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Choose a running task")]
pub struct TaskArgs {
    /// Application name (defaults to the workspace application)
    #[arg(long, conflicts_with = "default_cluster")]
    pub app: Option<String>,

    /// Environment the tasks run in
    #[arg(long, conflicts_with = "default_cluster")]
    pub env: Option<String>,

    /// List tasks in the default cluster instead of an environment
    #[arg(long)]
    pub default_cluster: bool,

    /// Include default-cluster tasks not started by berth
    #[arg(long, requires = "default_cluster")]
    pub all: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Choose topics published in every environment")]
pub struct TopicsArgs {
    /// Application name (defaults to the workspace application)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Choose a Dockerfile or an existing image")]
pub struct DockerfileArgs {
    /// Directory to search (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Choose files and directories to upload")]
pub struct StaticSourcesArgs {
    /// Deepest directory level to list (unlimited by default)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}
