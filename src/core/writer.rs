use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use super::{error::RenderError, render::RenderOutput};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Destination for rendered outputs.
pub trait OutputWriter {
    fn write(&mut self, output: &RenderOutput) -> Result<(), RenderError>;

    /// Write outputs in order, stopping at the first failure. Files already
    /// written stay on disk.
    fn write_all(&mut self, outputs: &[RenderOutput]) -> Result<(), RenderError> {
        for output in outputs {
            self.write(output)?;
        }
        Ok(())
    }
}

/// Writes each output to its `dest` path and reports it to `report`.
pub struct FileWriter<W: Write> {
    report: W,
    written: usize,
}

impl FileWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> FileWriter<W> {
    pub fn new(report: W) -> Self {
        Self { report, written: 0 }
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.report
    }
}

impl<W: Write> OutputWriter for FileWriter<W> {
    fn write(&mut self, output: &RenderOutput) -> Result<(), RenderError> {
        let path = Path::new(&output.dest);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| RenderError::write(parent, err))?;
        }
        fs::write(path, &output.template).map_err(|err| RenderError::write(path, err))?;
        self.written += 1;

        let _ = writeln!(
            self.report,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("File `{}` created.", output.dest).green()
        );
        Ok(())
    }
}

/// Keeps outputs in memory instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub outputs: Vec<RenderOutput>,
}

impl OutputWriter for MemoryWriter {
    fn write(&mut self, output: &RenderOutput) -> Result<(), RenderError> {
        self.outputs.push(output.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn output(dest: &Path, template: &str) -> RenderOutput {
        RenderOutput {
            language: "en".to_string(),
            dest: dest.to_string_lossy().to_string(),
            template: template.to_string(),
        }
    }

    #[test]
    fn test_file_writer_creates_dirs_and_overwrites() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out/nested/en.html");
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::write(&dest, "old content that is longer").unwrap();

        let mut writer = FileWriter::new(Vec::new());
        writer.write(&output(&dest, "new")).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        assert_eq!(writer.written(), 1);
        let report = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            report,
            format!("\u{2713} File `{}` created.\n", dest.display())
        );
    }

    #[test]
    fn test_write_all_stops_at_first_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let first = output(&dir.path().join("a.txt"), "a");
        let broken = output(&blocker.join("b.txt"), "b");
        let last = output(&dir.path().join("c.txt"), "c");

        let mut writer = FileWriter::new(Vec::new());
        let err = writer.write_all(&[first, broken, last]).unwrap_err();

        assert!(matches!(err, RenderError::Write { .. }));
        assert!(dir.path().join("a.txt").exists());
        assert!(!dir.path().join("c.txt").exists());
        assert_eq!(writer.written(), 1);
    }
}
