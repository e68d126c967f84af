use std::env;

use anyhow::{Context, Result};

use super::{
    args::{Arguments, Command},
    commands::{CommandSummary, build::build, init::init},
    exit_status::ExitStatus,
};

/// Dispatch to the appropriate command handler.
pub fn run(Arguments { command }: Arguments) -> Result<CommandSummary> {
    match command {
        Some(Command::Build(cmd)) => build(cmd),
        Some(Command::Init) => {
            let cwd = env::current_dir().context("Failed to resolve the working directory")?;
            init(&cwd)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

pub fn exit_status(summary: &CommandSummary) -> ExitStatus {
    match summary {
        CommandSummary::Init(init) if !init.created => ExitStatus::Failure,
        _ => ExitStatus::Success,
    }
}
