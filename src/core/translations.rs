use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde_json::Value;

/// Language identifier used when no translations are supplied.
pub const DEFAULT_LANGUAGE: &str = "default";

/// Translation key to translated string, for one language.
pub type TranslationTable = BTreeMap<String, String>;

/// Language identifier to [`TranslationTable`], in render order.
pub type TranslationSet = IndexMap<String, TranslationTable>;

/// The single `"default"` language with an empty table.
pub fn default_translation_set() -> TranslationSet {
    let mut set = TranslationSet::new();
    set.insert(DEFAULT_LANGUAGE.to_string(), TranslationTable::new());
    set
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "/path/to/messages/zh-CN.json" -> Some("zh-CN")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Parse one locale message file into a flat table of dotted keys.
pub fn parse_message_file(path: &Path) -> Result<TranslationTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    let mut table = TranslationTable::new();
    flatten_json(&json, String::new(), &mut table);
    Ok(table)
}

fn flatten_json(value: &Value, prefix: String, table: &mut TranslationTable) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, join_key(&prefix, key), table);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                flatten_json(val, join_key(&prefix, &index.to_string()), table);
            }
        }
        Value::String(s) if !prefix.is_empty() => {
            table.insert(prefix, s.clone());
        }
        // Numbers, booleans and nulls are not translations.
        _ => {}
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Load every `<locale>.json` file directly inside `message_dir`.
///
/// Locales are ordered by file name so the render order is stable across
/// platforms.
pub fn scan_message_files(message_dir: impl AsRef<Path>) -> Result<TranslationSet> {
    let message_dir = message_dir.as_ref();

    if !message_dir.exists() {
        bail!(
            "Messages directory '{}' does not exist.\n\
             Hint: Check your .glotrenderrc.json 'messagesRoot' setting.",
            message_dir.display()
        );
    }

    if !message_dir.is_dir() {
        bail!("'{}' is not a directory.", message_dir.display());
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(message_dir)
        .with_context(|| format!("Failed to read directory: {}", message_dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut set = TranslationSet::new();
    for path in paths {
        if let Some(locale) = extract_locale(&path) {
            let table = parse_message_file(&path)?;
            set.insert(locale, table);
        }
    }

    Ok(set)
}
