//! CLI commands.

pub mod fixtures;
pub mod init_config;
pub mod invoke;
pub mod provision;
pub mod run;

use anyhow::{Context, Result};
use smoke_core::HarnessConfig;
use std::path::Path;

/// Load the harness config, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    HarnessConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
