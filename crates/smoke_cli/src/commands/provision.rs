//! Provision a persistent isolated environment.

use anyhow::{bail, Context, Result};
use smoke_core::{activation_script, IsolatedEnvironment, VirtualenvProvisioner};
use std::fs;
use std::path::Path;

/// Build an environment at `dest`, which must be empty or absent.
pub fn run(config_path: &Path, dest: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;

    if dest.exists() && fs::read_dir(dest)?.next().is_some() {
        bail!("{} is not empty", dest.display());
    }

    let provisioner = VirtualenvProvisioner::from_config(&config.environment);
    let env = IsolatedEnvironment::create_at(&provisioner, dest)
        .with_context(|| format!("Failed to provision environment at {}", dest.display()))?;

    println!("Provisioned environment at {}", env.root_path().display());
    println!("  Interpreter: {}", config.environment.interpreter);
    println!("  Activate:    {}", activation_script(env.root_path()).display());

    Ok(())
}
