//! Render orchestration: one pass per translation.
//!
//! Options are evaluated once, then every language in the translation set
//! gets its own copy of the resolved data, a freshly loaded template, the
//! helpers bound to its translation table and its own destination path.

use std::{fmt, path::PathBuf, sync::Arc};

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    error::RenderError,
    helpers::{RenderHook, bind},
    options::{Options, evaluate},
    source::TemplateSpec,
    translations::{TranslationSet, default_translation_set},
    writer::OutputWriter,
};

/// Character in a destination pattern replaced by the language identifier.
pub const DEST_PLACEHOLDER: char = '%';

/// Everything a render call needs besides the sources and destination.
#[derive(Clone, Default)]
pub struct RenderOptions {
    /// Values visible to templates, possibly lazy.
    pub data: Options,
    /// `None` renders once with the `"default"` language and no keys.
    pub translations: Option<TranslationSet>,
    /// Base directory for the `render` helper.
    pub cwd: PathBuf,
    pub on_render: Option<RenderHook>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Options) -> Self {
        self.data = data;
        self
    }

    pub fn with_translations(mut self, translations: TranslationSet) -> Self {
        self.translations = Some(translations);
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_on_render<F>(mut self, hook: F) -> Self
    where
        F: Fn(String, &std::path::Path) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.on_render = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("data", &self.data)
            .field("translations", &self.translations)
            .field("cwd", &self.cwd)
            .field("on_render", &self.on_render.is_some())
            .finish()
    }
}

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    pub language: String,
    pub dest: String,
    pub template: String,
}

/// Substitute the first placeholder in `pattern` with `language`.
pub fn destination(pattern: &str, language: &str) -> String {
    pattern.replacen(DEST_PLACEHOLDER, language, 1)
}

/// Render `spec` once per translation.
///
/// Outputs follow the translation set's order. Any failure aborts the whole
/// call; outputs rendered by earlier passes are dropped with it.
pub fn render(
    spec: &TemplateSpec,
    dest: &str,
    options: RenderOptions,
) -> Result<Vec<RenderOutput>, RenderError> {
    let RenderOptions {
        mut data,
        translations,
        cwd,
        on_render,
    } = options;

    evaluate(&mut data)?;
    let resolved = data.to_json()?;
    let translations = translations.unwrap_or_else(default_translation_set);

    if translations.len() > 1 && !dest.contains(DEST_PLACEHOLDER) {
        warn!(
            dest,
            languages = translations.len(),
            "destination has no `{}` placeholder; every language writes the same file",
            DEST_PLACEHOLDER
        );
    }

    let mut outputs = Vec::with_capacity(translations.len());
    for (language, table) in translations {
        let source = spec.load()?;
        let helpers = bind(resolved.clone(), table, cwd.clone(), on_render.clone());
        let dest = destination(dest, &language);

        debug!(language = %language, dest = %dest, "rendering translation pass");
        let template = helpers.interpolate(&source)?;

        outputs.push(RenderOutput {
            language,
            dest,
            template,
        });
    }

    Ok(outputs)
}

/// Render `spec` and hand every output to `writer`.
pub fn template<W: OutputWriter + ?Sized>(
    spec: &TemplateSpec,
    dest: &str,
    options: RenderOptions,
    writer: &mut W,
) -> Result<(), RenderError> {
    let outputs = render(spec, dest, options)?;
    writer.write_all(&outputs)
}
