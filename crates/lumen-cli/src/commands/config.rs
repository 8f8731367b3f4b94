//! Config command

use anyhow::{Context, Result};
use lumen_runtime::LumenConfig;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = LumenConfig::load(config_path).context("Failed to load config")?;
    let text = config
        .to_toml_string()
        .context("Failed to serialize config")?;
    print!("{}", text);
    Ok(())
}
