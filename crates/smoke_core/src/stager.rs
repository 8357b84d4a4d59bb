//! Staging of the packaged client into working directories.

use crate::config::ClientConfig;
use crate::error::{Result, SmokeError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Populates a fresh directory with a deployable client tree.
///
/// Staging twice into the same directory is not supported.
pub trait ClientStager {
    fn stage(&self, target: &Path) -> Result<()>;
}

/// Copies a pre-built client tree.
#[derive(Debug, Clone)]
pub struct CopyStager {
    source: PathBuf,
}

impl CopyStager {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl ClientStager for CopyStager {
    fn stage(&self, target: &Path) -> Result<()> {
        if !self.source.is_dir() {
            return Err(SmokeError::StagingFailed(format!(
                "client source not found: {}",
                self.source.display()
            )));
        }
        debug!(source = %self.source.display(), target = %target.display(), "copying client tree");
        copy_dir_recursive(&self.source, target)
    }
}

/// Runs an external packaging command with the target directory as its last argument.
#[derive(Debug, Clone)]
pub struct CommandStager {
    program: String,
    args: Vec<String>,
}

impl CommandStager {
    /// `command` is the program followed by its leading arguments.
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| SmokeError::Config("client.package_command is empty".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl ClientStager for CommandStager {
    fn stage(&self, target: &Path) -> Result<()> {
        debug!(program = %self.program, target = %target.display(), "running packaging command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(target)
            .output()
            .map_err(|e| SmokeError::StagingFailed(format!("could not run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::StagingFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Pick a stager from configuration; a packaging command takes precedence over a source tree.
pub fn stager_from_config(config: &ClientConfig) -> Result<Box<dyn ClientStager>> {
    match (&config.package_command, &config.source) {
        (Some(command), _) => Ok(Box::new(CommandStager::new(command)?)),
        (None, Some(source)) => Ok(Box::new(CopyStager::new(source.clone()))),
        (None, None) => Err(SmokeError::Config(
            "no client configured: set client.source or client.package_command".into(),
        )),
    }
}

/// Recursively copy directory contents
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
