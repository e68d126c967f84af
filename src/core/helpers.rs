//! Template helpers exposed to every render pass.
//!
//! - `render(filename)`: renders a partial from the pass's base directory
//!   against the same data and translations as the parent template.
//! - `translate(key)`: looks `key` up in the pass's translation table.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::{Map, Value};
use tracing::debug;

use super::{error::RenderError, source, translations::TranslationTable};

pub const RENDER_HELPER: &str = "render";
pub const TRANSLATE_HELPER: &str = "translate";

/// Name under which the active translation table is visible to templates.
pub const TRANSLATIONS_KEY: &str = "translations";

/// Partials nested deeper than this are assumed to include themselves.
pub const MAX_PARTIAL_DEPTH: usize = 16;

/// Post-load hook applied to partial text before it is interpolated.
pub type RenderHook = Arc<dyn Fn(String, &Path) -> anyhow::Result<String> + Send + Sync>;

/// Per-pass state behind the `render` and `translate` helpers.
pub struct HelperContext {
    context: minijinja::Value,
    translations: TranslationTable,
    cwd: PathBuf,
    on_render: Option<RenderHook>,
    depth: AtomicUsize,
}

/// Attach the helpers and the active translation table to a pass's data.
///
/// Data keys named like a helper are dropped so the helper always wins.
pub fn bind(
    mut data: Map<String, Value>,
    translations: TranslationTable,
    cwd: impl Into<PathBuf>,
    on_render: Option<RenderHook>,
) -> Arc<HelperContext> {
    for name in [RENDER_HELPER, TRANSLATE_HELPER] {
        if data.remove(name).is_some() {
            debug!(key = name, "data key shadowed by template helper");
        }
    }

    let table: Map<String, Value> = translations
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    data.insert(TRANSLATIONS_KEY.to_string(), Value::Object(table));

    Arc::new(HelperContext {
        context: minijinja::Value::from_serialize(&data),
        translations,
        cwd: cwd.into(),
        on_render,
        depth: AtomicUsize::new(0),
    })
}

impl HelperContext {
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }

    /// Look up `key`; a missing or empty entry is an error.
    pub fn translate(&self, key: &str) -> Result<&str, RenderError> {
        match self.translations.get(key) {
            Some(value) if !value.is_empty() => Ok(value.as_str()),
            _ => Err(RenderError::MissingTranslationKey {
                key: key.to_string(),
            }),
        }
    }

    /// Load `filename` relative to the base directory, run the `onRender`
    /// hook and interpolate it against this context.
    pub fn render_partial(self: &Arc<Self>, filename: &str) -> Result<String, RenderError> {
        let path = self.cwd.join(filename);

        let depth = self.depth.fetch_add(1, Ordering::SeqCst);
        let rendered = if depth >= MAX_PARTIAL_DEPTH {
            Err(RenderError::PartialRecursion {
                path: path.clone(),
                limit: MAX_PARTIAL_DEPTH,
            })
        } else {
            self.load_partial(&path)
                .and_then(|text| self.interpolate(&text))
        };
        self.depth.fetch_sub(1, Ordering::SeqCst);

        rendered
    }

    fn load_partial(&self, path: &Path) -> Result<String, RenderError> {
        let text = source::load(&[path])?;
        debug!(path = %path.display(), "rendering partial");

        match &self.on_render {
            Some(hook) => (**hook)(text, path).map_err(|err| RenderError::RenderHook {
                path: path.to_path_buf(),
                message: format!("{err:#}"),
            }),
            None => Ok(text),
        }
    }

    /// Render `source` with the helpers and this pass's data.
    pub fn interpolate(self: &Arc<Self>, source: &str) -> Result<String, RenderError> {
        self.environment()
            .render_str(source, &self.context)
            .map_err(RenderError::from_engine)
    }

    fn environment(self: &Arc<Self>) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let helpers = Arc::clone(self);
        env.add_function(RENDER_HELPER, move |filename: String| {
            helpers
                .render_partial(&filename)
                .map_err(RenderError::into_engine)
        });

        let helpers = Arc::clone(self);
        env.add_function(TRANSLATE_HELPER, move |key: String| {
            helpers
                .translate(&key)
                .map(str::to_string)
                .map_err(RenderError::into_engine)
        });

        env
    }
}
