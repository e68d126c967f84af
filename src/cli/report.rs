//! Report formatting and printing utilities.
//!
//! Separate from core logic so glot-render can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{BuildSummary, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::SUCCESS_MARK;

/// Print a command summary to stdout.
pub fn print(summary: &CommandSummary) {
    print_to(summary, &mut io::stdout().lock());
}

/// Print a command summary to a custom writer.
pub fn print_to<W: Write>(summary: &CommandSummary, writer: &mut W) {
    match summary {
        CommandSummary::Build(summary) => print_build_to(summary, writer),
        CommandSummary::Init(summary) => print_init_to(summary, writer),
    }
}

fn print_build_to<W: Write>(summary: &BuildSummary, writer: &mut W) {
    let locale_count = summary.outputs.len();
    let source_count = summary.sources.len();

    if summary.is_dry_run {
        for output in &summary.outputs {
            let _ = writeln!(
                writer,
                "  {} {} ({})",
                "would write".cyan(),
                output.dest,
                output.language
            );
        }
        let _ = writeln!(
            writer,
            "{} {}",
            "dry-run:".bold().yellow(),
            format!(
                "{} {} rendered from {} source {}, nothing written",
                locale_count,
                plural(locale_count, "locale", "locales"),
                source_count,
                plural(source_count, "file", "files")
            )
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Rendered {} {} for {} {}",
            summary.files_written,
            plural(summary.files_written, "file", "files"),
            locale_count,
            plural(locale_count, "locale", "locales")
        )
        .green()
    );
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
