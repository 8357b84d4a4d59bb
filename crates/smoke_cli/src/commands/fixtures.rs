//! Write the standard fixtures into a directory.

use anyhow::{Context, Result};
use smoke_core::{FixtureFile, ToolConfigDescriptor, SAMPLE_SOURCE, SAMPLE_SOURCE_NAME};
use std::fs;
use std::path::Path;

/// Write the standard descriptor and sample source into `dir`.
pub fn run(config_path: &Path, dir: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let descriptor = ToolConfigDescriptor::standard();

    let files = [
        FixtureFile::tool_config(&config.fixtures.config_name, &descriptor)?,
        FixtureFile::new(SAMPLE_SOURCE_NAME, SAMPLE_SOURCE),
    ];

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    for file in &files {
        let path = dir.join(&file.relative_name);
        fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  wrote {}", path.display());
    }

    Ok(())
}
