//! Write a default harness config.

use anyhow::{bail, Context, Result};
use smoke_core::HarnessConfig;
use std::path::Path;

/// Write the default config to `path`, refusing to overwrite.
pub fn run(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    HarnessConfig::default()
        .save(path)
        .context("Failed to write config")?;

    println!("Wrote default config to {}", path.display());
    println!("Set [client].source or [client].package_command before running 'smoke run'.");

    Ok(())
}
