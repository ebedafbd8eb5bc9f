use berth::cli::RootArgs;
use berth::commands;
use berth::select::SelectError;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV_VAR: &str = "BERTH_LOG";

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_logging(args.global.verbose);

    match commands::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", error_chain_message(&err));
            exit_code(&err)
        }
    }
}

/// Install the stderr subscriber. `BERTH_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("berth=debug")
        } else {
            EnvFilter::new("berth=info")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

/// Join the cause chain, skipping causes a wrapper already printed inline.
fn error_chain_message(err: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

/// 2 when nothing matched, 3 when a targeted deployment check failed.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<SelectError>() {
        Some(select) if select.is_not_found() => ExitCode::from(2),
        Some(select) if select.is_verification() => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}
