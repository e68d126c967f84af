use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::error::RenderError;

/// One or more template source files, rendered as a single template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    paths: Vec<PathBuf>,
}

impl TemplateSpec {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Read and concatenate all sources into one template string.
    pub fn load(&self) -> Result<String, RenderError> {
        load(&self.paths)
    }
}

impl From<&str> for TemplateSpec {
    fn from(path: &str) -> Self {
        Self::new([path])
    }
}

impl From<PathBuf> for TemplateSpec {
    fn from(path: PathBuf) -> Self {
        Self::new([path])
    }
}

impl From<&Path> for TemplateSpec {
    fn from(path: &Path) -> Self {
        Self::new([path])
    }
}

impl From<Vec<PathBuf>> for TemplateSpec {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl From<&[&str]> for TemplateSpec {
    fn from(paths: &[&str]) -> Self {
        Self::new(paths.iter().copied())
    }
}

/// Load template sources as one logical template.
///
/// Every path is checked before anything is read, so a missing file fails
/// with [`RenderError::MissingSourceFile`] without touching the others.
/// Contents are joined with a single `\n` between consecutive files.
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<String, RenderError> {
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RenderError::MissingSourceFile {
                path: path.to_path_buf(),
            });
        }
    }

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|err| RenderError::read_source(path, err))?;
        debug!(path = %path.display(), bytes = content.len(), "loaded template source");
        sources.push(content);
    }

    Ok(sources.join("\n"))
}
