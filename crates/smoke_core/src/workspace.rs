//! Ephemeral per-scenario working directories.

use crate::error::{Result, SmokeError};
use crate::fixtures::{FixtureFile, ToolConfigDescriptor};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// A temporary directory owned by exactly one scenario.
///
/// Dropping it removes the directory; `close` does the same but reports failures.
pub struct WorkingDirectory {
    dir: TempDir,
}

impl WorkingDirectory {
    /// Create a new empty working directory.
    pub fn open() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("smoke-work-").tempdir()?;
        debug!(path = %dir.path().display(), "opened working directory");
        Ok(Self { dir })
    }

    /// Get working directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories and overwriting existing content.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> Result<()> {
        let full_path = self.resolve(name)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, contents)?;

        Ok(())
    }

    /// Write a fixture under its relative name.
    pub fn write_fixture(&self, fixture: &FixtureFile) -> Result<()> {
        self.write_file(&fixture.relative_name, &fixture.contents)
    }

    /// Check that every source the descriptor declares has been staged here.
    ///
    /// Names that are absolute or climb out with `..` are rejected as invalid.
    pub fn verify_sources(&self, descriptor: &ToolConfigDescriptor) -> Result<()> {
        for name in &descriptor.src {
            if !self.resolve(name)?.is_file() {
                return Err(SmokeError::MissingSource {
                    name: name.clone(),
                    dir: self.path().to_path_buf(),
                });
            }
        }
        Ok(())
    }

    /// Recursively remove the directory.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        debug!(path = %path.display(), "closed working directory");
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            return Err(SmokeError::InvalidFixture(name.to_string()));
        }
        Ok(self.path().join(relative))
    }
}
