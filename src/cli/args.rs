//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Render templates into one file per locale
//! - `init`: Initialize glot-render configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Template source files or glob patterns, rendered as one template (overrides config file)
    pub sources: Vec<String>,

    /// Destination pattern, `%` is replaced by the locale (overrides config file)
    #[arg(short = 'o', long)]
    pub dest: Option<String>,

    /// Directory of <locale>.json translation files (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Base directory for partials loaded with `render()` (overrides config file)
    #[arg(long)]
    pub partials_root: Option<PathBuf>,

    /// Set a template variable, can be specified multiple times: --set title=Docs
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub vars: Vec<(String, String)>,

    /// Render without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got \"{}\"", raw)),
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render templates into one output file per locale
    Build(BuildCommand),
    /// Initialize a new .glotrenderrc.json configuration file
    Init,
}
