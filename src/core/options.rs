//! Template data with lazily evaluated entries.
//!
//! An [`Options`] tree maps keys to literal JSON values, nested option
//! trees, or thunks. [`evaluate`] walks the tree once and replaces every
//! thunk with the value it produces, so that dynamic values are computed
//! before any translation pass starts and are shared by all of them.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::RenderError;

/// A zero-argument function producing an option value on demand.
pub type Thunk = Arc<dyn Fn() -> anyhow::Result<OptionValue> + Send + Sync>;

#[derive(Clone)]
pub enum OptionValue {
    Literal(Value),
    Nested(Options),
    Thunk(Thunk),
}

impl OptionValue {
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<OptionValue> + Send + Sync + 'static,
    {
        Self::Thunk(Arc::new(f))
    }

    pub fn is_thunk(&self) -> bool {
        matches!(self, Self::Thunk(_))
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Nested(options) => f.debug_tuple("Nested").field(options).finish(),
            Self::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Nested(Options::from_json(map)),
            other => Self::Literal(other),
        }
    }
}

impl From<Options> for OptionValue {
    fn from(options: Options) -> Self {
        Self::Nested(options)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Literal(Value::String(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Literal(Value::Bool(value))
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

/// Ordered mapping from option key to [`OptionValue`].
#[derive(Clone, Debug, Default)]
pub struct Options {
    entries: IndexMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an option tree from a JSON object. Nested objects become
    /// nested trees; everything else (arrays included) stays literal.
    pub fn from_json(map: Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, OptionValue::from(value)))
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.entries.iter()
    }

    /// Convert an evaluated tree into the JSON object handed to templates.
    ///
    /// Fails with [`RenderError::UnevaluatedOption`] if a thunk is still
    /// present, i.e. [`evaluate`] has not run.
    pub fn to_json(&self) -> Result<Map<String, Value>, RenderError> {
        self.to_json_in("")
    }

    fn to_json_in(&self, prefix: &str) -> Result<Map<String, Value>, RenderError> {
        let mut map = Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            let path = key_path(prefix, key);
            let json = match value {
                OptionValue::Literal(value) => value.clone(),
                OptionValue::Nested(nested) => Value::Object(nested.to_json_in(&path)?),
                OptionValue::Thunk(_) => return Err(RenderError::UnevaluatedOption { key: path }),
            };
            map.insert(key.clone(), json);
        }
        Ok(map)
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Replace every thunk in `options` with the value it produces, in place.
///
/// Nested trees are walked recursively, including trees produced by a
/// thunk. The first failing thunk aborts the walk with
/// [`RenderError::OptionEvaluation`] naming its dotted key path.
pub fn evaluate(options: &mut Options) -> Result<&mut Options, RenderError> {
    evaluate_in(options, "")?;
    Ok(options)
}

fn evaluate_in(options: &mut Options, prefix: &str) -> Result<(), RenderError> {
    for (key, value) in options.entries.iter_mut() {
        resolve_value(value, &key_path(prefix, key))?;
    }
    Ok(())
}

fn resolve_value(value: &mut OptionValue, path: &str) -> Result<(), RenderError> {
    loop {
        match value {
            OptionValue::Literal(_) => return Ok(()),
            OptionValue::Nested(nested) => return evaluate_in(nested, path),
            OptionValue::Thunk(thunk) => {
                let produced = (**thunk)().map_err(|err| RenderError::OptionEvaluation {
                    key: path.to_string(),
                    message: format!("{err:#}"),
                })?;
                debug!(key = path, "evaluated lazy option");
                *value = produced;
            }
        }
    }
}

fn key_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
