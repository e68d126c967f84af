use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init(dir: &Path) -> Result<CommandSummary> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(CommandSummary::Init(InitSummary { created: false }));
    }

    fs::write(&config_path, default_config_json()?)?;
    Ok(CommandSummary::Init(InitSummary { created: true }))
}
