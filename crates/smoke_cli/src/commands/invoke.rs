//! Run the tool once inside an existing environment.

use anyhow::{Context, Result};
use smoke_core::{IsolatedEnvironment, ShellInvoker};
use std::io::Write;
use std::path::Path;

/// Invoke the configured tool command with `args` and echo both streams.
pub fn run(
    config_path: &Path,
    env_root: &Path,
    dir: Option<&Path>,
    shell: Option<&str>,
    args: &[String],
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let environment = IsolatedEnvironment::existing(env_root);
    let working_dir = dir.unwrap_or_else(|| Path::new("."));

    let invoker = match shell {
        Some(shell) => ShellInvoker::with_shell(shell, &config.invocation.tool_command),
        None => ShellInvoker::from_config(&config.invocation),
    };

    let result = invoker
        .invoke(&environment, working_dir, args)
        .context("Failed to invoke tool")?;

    std::io::stdout().write_all(result.stdout.as_bytes())?;
    std::io::stderr().write_all(result.stderr.as_bytes())?;

    if let Some(code) = result.exit_code {
        tracing::debug!("tool exited with code {}", code);
    }

    Ok(())
}
