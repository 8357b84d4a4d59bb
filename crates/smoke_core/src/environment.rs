//! Isolated interpreter environment provisioning.
//!
//! One environment is built per suite and only ever read afterwards. The
//! handle exposes nothing but its root; finding the activation script under
//! that root is the invocation driver's concern.

use crate::config::EnvironmentConfig;
use crate::error::{Result, SmokeError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info};

/// Builds an isolated environment tree under a destination directory.
pub trait Provisioner {
    /// Populate `dest`, which is empty or does not exist yet.
    fn provision(&self, dest: &Path) -> Result<()>;
}

impl<F> Provisioner for F
where
    F: Fn(&Path) -> Result<()>,
{
    fn provision(&self, dest: &Path) -> Result<()> {
        self(dest)
    }
}

/// Runs `<builder> [builder_args..] -p <interpreter> <dest>`.
#[derive(Debug, Clone)]
pub struct VirtualenvProvisioner {
    builder: String,
    builder_args: Vec<String>,
    interpreter: String,
}

impl VirtualenvProvisioner {
    pub fn new(builder: &str, interpreter: &str) -> Self {
        Self {
            builder: builder.to_string(),
            builder_args: Vec::new(),
            interpreter: interpreter.to_string(),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self {
            builder: config.builder.clone(),
            builder_args: config.builder_args.clone(),
            interpreter: config.interpreter.clone(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder_args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Provisioner for VirtualenvProvisioner {
    fn provision(&self, dest: &Path) -> Result<()> {
        let builder = which::which(&self.builder)
            .map_err(|_| SmokeError::BuilderNotFound(self.builder.clone()))?;
        which::which(&self.interpreter)
            .map_err(|_| SmokeError::InterpreterUnavailable(self.interpreter.clone()))?;

        debug!(
            builder = %builder.display(),
            interpreter = %self.interpreter,
            dest = %dest.display(),
            "running environment builder"
        );

        let output = Command::new(&builder)
            .args(&self.builder_args)
            .arg("-p")
            .arg(&self.interpreter)
            .arg(dest)
            .output()
            .map_err(|e| SmokeError::ProvisionFailed {
                dest: dest.to_path_buf(),
                reason: format!("could not run {}: {}", self.builder, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SmokeError::ProvisionFailed {
                dest: dest.to_path_buf(),
                reason: format!("{} exited with {}: {}", self.builder, output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}

/// Handle to a provisioned environment.
#[derive(Debug)]
pub struct IsolatedEnvironment {
    root: PathBuf,
    // Present when the harness owns the root and removes it at teardown.
    temp: Option<TempDir>,
}

impl IsolatedEnvironment {
    /// Provision into a fresh temporary root that is removed at teardown.
    pub fn create_temporary(provisioner: &dyn Provisioner) -> Result<Self> {
        let temp = tempfile::Builder::new().prefix("smoke-env-").tempdir()?;
        provisioner.provision(temp.path())?;
        info!(root = %temp.path().display(), "provisioned isolated environment");

        Ok(Self {
            root: temp.path().to_path_buf(),
            temp: Some(temp),
        })
    }

    /// Provision into a caller-chosen path that outlives this handle.
    pub fn create_at(provisioner: &dyn Provisioner, dest: &Path) -> Result<Self> {
        provisioner.provision(dest)?;
        info!(root = %dest.display(), "provisioned isolated environment");

        Ok(Self::existing(dest))
    }

    /// Refer to an environment built earlier; teardown leaves it in place.
    pub fn existing(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            temp: None,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Remove the environment if the harness owns it.
    pub fn teardown(self) -> Result<()> {
        if let Some(temp) = self.temp {
            temp.close()?;
            info!(root = %self.root.display(), "removed isolated environment");
        }
        Ok(())
    }
}
