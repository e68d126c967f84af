use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::glob;
use tracing::debug;

use super::super::args::BuildCommand;
use super::{BuildSummary, CommandSummary};
use crate::{
    config::{Config, is_glob_pattern, load_config},
    core::{FileWriter, OutputWriter, RenderOptions, TemplateSpec, render, scan_message_files},
};

pub fn build(cmd: BuildCommand) -> Result<CommandSummary> {
    let cwd = env::current_dir().context("Failed to resolve the working directory")?;
    let loaded = load_config(&cwd)?;
    debug!(from_file = loaded.from_file, "configuration loaded");
    let config = loaded.config;

    let patterns = if cmd.sources.is_empty() {
        &config.sources
    } else {
        &cmd.sources
    };
    let sources = expand_sources(patterns)?;
    let dest = cmd.dest.clone().unwrap_or_else(|| config.dest.clone());

    let options = render_options(&cmd, &config, &cwd)?;
    let outputs = render(&TemplateSpec::new(sources.iter().cloned()), &dest, options)?;

    let files_written = if cmd.dry_run {
        0
    } else {
        let mut writer = FileWriter::stdout();
        writer.write_all(&outputs)?;
        writer.written()
    };

    Ok(CommandSummary::Build(BuildSummary {
        outputs,
        files_written,
        sources,
        is_dry_run: cmd.dry_run,
    }))
}

fn render_options(cmd: &BuildCommand, config: &Config, cwd: &Path) -> Result<RenderOptions> {
    let mut data = config.data_options(cwd);
    for (key, value) in &cmd.vars {
        data.insert(key.clone(), value.clone());
    }

    let partials_root = cmd
        .partials_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.partials_root));

    let mut options = RenderOptions::new()
        .with_data(data)
        .with_cwd(partials_root);

    let messages_root = cmd
        .messages_root
        .clone()
        .or_else(|| config.messages_root.as_ref().map(PathBuf::from));
    if let Some(messages_root) = messages_root {
        let translations = scan_message_files(&messages_root)?;
        if translations.is_empty() {
            bail!(
                "No locale files found in '{}'.\n\
                 Hint: Add <locale>.json files or remove the 'messagesRoot' setting.",
                messages_root.display()
            );
        }
        options = options.with_translations(translations);
    }

    if config.trim_partials {
        options = options.with_on_render(|text, _: &Path| Ok(text.trim_end().to_string()));
    }

    Ok(options)
}

/// Expand source patterns in order. Glob patterns must match at least one
/// file; literal paths are kept as-is so missing files surface as render
/// errors.
fn expand_sources(patterns: &[String]) -> Result<Vec<PathBuf>> {
    if patterns.is_empty() {
        bail!("No template sources given. Pass them as arguments or set 'sources'.");
    }

    let mut paths = Vec::new();
    for pattern in patterns {
        if !is_glob_pattern(pattern) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let mut matched: Vec<PathBuf> = glob(pattern)
            .with_context(|| format!("Invalid glob pattern: \"{}\"", pattern))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        if matched.is_empty() {
            bail!("No source files match pattern: \"{}\"", pattern);
        }
        matched.sort();
        paths.extend(matched);
    }

    Ok(paths)
}
