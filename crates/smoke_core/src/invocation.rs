//! Running the tool under test inside the isolated environment.
//!
//! An invocation is a two-line script fed to a command interpreter on stdin:
//! source the environment's activation script, then run the tool's entry
//! command. Every token is shell-quoted by [`quote_token`]; nothing is
//! interpolated into the script unescaped.
//!
//! The tool's exit status is recorded but never treated as an error here.
//! Only failing to start the interpreter is.

use crate::config::InvocationConfig;
use crate::environment::IsolatedEnvironment;
use crate::error::{Result, SmokeError};
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Directory inside an environment root that holds its executables.
pub fn activation_dir_name() -> &'static str {
    if cfg!(windows) {
        "Scripts"
    } else {
        "bin"
    }
}

/// Location of the activation script for an environment rooted at `root`.
pub fn activation_script(root: &Path) -> PathBuf {
    root.join(activation_dir_name()).join("activate")
}

/// Quote a token so a POSIX shell reads it back as exactly one word.
pub fn quote_token(token: &str) -> Cow<'_, str> {
    if token.is_empty() {
        return Cow::Borrowed("''");
    }
    let safe = token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(format!("'{}'", token.replace('\'', r#"'"'"'"#)))
    }
}

/// A fully resolved invocation, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub activation_path: PathBuf,
    /// Entry command tokens, e.g. `["python", "ok"]`.
    pub command: Vec<String>,
    pub arguments: Vec<String>,
}

impl InvocationRequest {
    pub fn new(environment: &IsolatedEnvironment, command: &[String], arguments: &[String]) -> Self {
        Self {
            activation_path: activation_script(environment.root_path()),
            command: command.to_vec(),
            arguments: arguments.to_vec(),
        }
    }

    /// Render the script fed to the interpreter.
    pub fn render(&self) -> String {
        let activation = self.activation_path.to_string_lossy();
        let invocation = self
            .command
            .iter()
            .chain(&self.arguments)
            .map(|token| quote_token(token))
            .collect::<Vec<_>>()
            .join(" ");

        format!(". {};\n{}\n", quote_token(&activation), invocation)
    }
}

/// Captured output of one invocation, verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    pub stdout: String,
    pub stderr: String,
    /// Exit code of the interpreter; informational only.
    pub exit_code: Option<i32>,
}

/// Feeds invocation scripts to a command interpreter.
#[derive(Debug, Clone)]
pub struct ShellInvoker {
    shell: String,
    command: Vec<String>,
}

impl ShellInvoker {
    /// Use the interpreter named by `config.shell_var`, or `config.default_shell` when unset.
    pub fn from_config(config: &InvocationConfig) -> Self {
        let shell = std::env::var(&config.shell_var)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| config.default_shell.clone());
        Self::with_shell(&shell, &config.tool_command)
    }

    pub fn with_shell(shell: &str, command: &[String]) -> Self {
        Self {
            shell: shell.to_string(),
            command: command.to_vec(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Run the tool with `args` in `working_dir`, blocking until both streams are drained.
    pub fn invoke(
        &self,
        environment: &IsolatedEnvironment,
        working_dir: &Path,
        args: &[String],
    ) -> Result<InvocationResult> {
        let script = InvocationRequest::new(environment, &self.command, args).render();
        debug!(shell = %self.shell, cwd = %working_dir.display(), "invocation script:\n{}", script);

        let mut child = Command::new(&self.shell)
            .current_dir(working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SmokeError::ShellSpawnFailed {
                shell: self.shell.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("shell stdin was not captured"))?;
        // The script is written on its own thread while wait_with_output drains both pipes.
        let writer = thread::spawn(move || stdin.write_all(script.as_bytes()));

        let output = child.wait_with_output()?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("shell exited before reading the whole script");
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(io::Error::other("script writer panicked").into()),
        }

        Ok(InvocationResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
