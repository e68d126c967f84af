use std::{io, path::PathBuf, sync::Arc};

use thiserror::Error;

/// Errors raised while rendering templates.
///
/// Every variant is fatal to the enclosing `render`/`template` call. The
/// type is `Clone` so that an error raised inside a template helper can be
/// recovered intact after it has travelled through the template engine.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Source file `{}` not found.", .path.display())]
    MissingSourceFile { path: PathBuf },

    #[error("Failed to read source file `{}`", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("No translation found for key: {key}")]
    MissingTranslationKey { key: String },

    #[error("Failed to evaluate option `{key}`: {message}")]
    OptionEvaluation { key: String, message: String },

    #[error("Option `{key}` was not evaluated before rendering")]
    UnevaluatedOption { key: String },

    #[error("onRender hook failed for `{}`: {message}", .path.display())]
    RenderHook { path: PathBuf, message: String },

    #[error("Partial `{}` nested deeper than {limit} levels", .path.display())]
    PartialRecursion { path: PathBuf, limit: usize },

    #[error("Failed to render template")]
    Template {
        #[source]
        source: Arc<minijinja::Error>,
    },

    #[error("Failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
}

impl RenderError {
    pub(crate) fn read_source(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::ReadSource {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Recover the error raised by a template helper from an engine error.
    ///
    /// Helpers attach their `RenderError` as the source of the engine error;
    /// the first one found in the source chain wins. Plain engine errors
    /// (syntax, undefined variables) become `Template`.
    pub(crate) fn from_engine(err: minijinja::Error) -> Self {
        let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&err);
        while let Some(cause) = current {
            if let Some(render_err) = cause.downcast_ref::<RenderError>() {
                return render_err.clone();
            }
            current = cause.source();
        }
        Self::Template {
            source: Arc::new(err),
        }
    }

    /// Wrap this error so it can be returned from a template helper.
    pub(crate) fn into_engine(self) -> minijinja::Error {
        minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, self.to_string())
            .with_source(self)
    }
}
