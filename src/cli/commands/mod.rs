pub mod build;
pub mod init;

use std::path::PathBuf;

use crate::core::RenderOutput;

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct BuildSummary {
    pub outputs: Vec<RenderOutput>,
    pub files_written: usize,
    pub sources: Vec<PathBuf>,
    pub is_dry_run: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}
