use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{DEST_PLACEHOLDER, OptionValue, Options};

pub const CONFIG_FILE_NAME: &str = ".glotrenderrc.json";

/// `{"$env": "NAME"}` in `data` reads an environment variable lazily.
pub const ENV_DIRECTIVE: &str = "$env";

/// `{"$file": "path"}` in `data` reads a file lazily.
pub const FILE_DIRECTIVE: &str = "$file";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    #[serde(default = "default_dest")]
    pub dest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_root: Option<String>,
    #[serde(default = "default_partials_root")]
    pub partials_root: String,
    #[serde(default)]
    pub trim_partials: bool,
    #[serde(default)]
    pub data: Map<String, Value>,
}

fn default_sources() -> Vec<String> {
    vec!["templates/index.html".to_string()]
}

fn default_dest() -> String {
    format!("dist/{}.html", DEST_PLACEHOLDER)
}

fn default_partials_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            dest: default_dest(),
            messages_root: None,
            partials_root: default_partials_root(),
            trim_partials: false,
            data: Map::new(),
        }
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal file paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a source glob pattern is invalid, or if several
    /// locales would be rendered into a destination without a placeholder.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.sources {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'sources': \"{}\"", pattern)
                })?;
            }
        }

        if self.messages_root.is_some() && !self.dest.contains(DEST_PLACEHOLDER) {
            bail!(
                "'dest' must contain the '{}' placeholder when 'messagesRoot' is set: \"{}\"",
                DEST_PLACEHOLDER,
                self.dest
            );
        }

        Ok(())
    }

    /// Template data with `$env`/`$file` directives turned into lazy options.
    ///
    /// Relative `$file` paths are resolved against `base_dir`.
    pub fn data_options(&self, base_dir: &Path) -> Options {
        self.data
            .iter()
            .map(|(key, value)| (key.clone(), option_from_json(value.clone(), base_dir)))
            .collect()
    }
}

fn option_from_json(value: Value, base_dir: &Path) -> OptionValue {
    match value {
        Value::Object(map) => match lazy_directive(&map, base_dir) {
            Some(lazy) => lazy,
            None => OptionValue::Nested(
                map.into_iter()
                    .map(|(key, value)| (key, option_from_json(value, base_dir)))
                    .collect(),
            ),
        },
        other => OptionValue::Literal(other),
    }
}

fn lazy_directive(map: &Map<String, Value>, base_dir: &Path) -> Option<OptionValue> {
    if map.len() != 1 {
        return None;
    }

    if let Some(Value::String(name)) = map.get(ENV_DIRECTIVE) {
        let name = name.clone();
        return Some(OptionValue::lazy(move || {
            let value = env::var(&name)
                .with_context(|| format!("Environment variable `{}` is not set", name))?;
            Ok(OptionValue::from(value))
        }));
    }

    if let Some(Value::String(file)) = map.get(FILE_DIRECTIVE) {
        let path = base_dir.join(file);
        return Some(OptionValue::lazy(move || {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read data file: {}", path.display()))?;
            Ok(OptionValue::from(content))
        }));
    }

    None
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
