//! Configuration for the smoke harness.

use crate::error::{Result, SmokeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "smoke.toml";

/// Top-level harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Product name printed in the tool's version line.
    #[serde(default = "default_product")]
    pub product: String,

    /// Isolated environment settings.
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// How the tool under test is invoked.
    #[serde(default)]
    pub invocation: InvocationConfig,

    /// Where the packaged client comes from.
    #[serde(default)]
    pub client: ClientConfig,

    /// Fixture naming.
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

fn default_product() -> String {
    "okpy".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            environment: EnvironmentConfig::default(),
            invocation: InvocationConfig::default(),
            client: ClientConfig::default(),
            fixtures: FixtureConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| SmokeError::Config(format!("failed to read config: {}", e)))?;
            Self::from_toml(&content)
        } else {
            Ok(HarnessConfig::default())
        }
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)
            .map_err(|e| SmokeError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SmokeError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| SmokeError::Config(format!("failed to write config: {}", e)))?;
        Ok(())
    }

    /// Reject values no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.environment.builder.trim().is_empty() {
            return Err(SmokeError::Config("environment.builder is empty".into()));
        }
        if self.invocation.tool_command.is_empty() {
            return Err(SmokeError::Config("invocation.tool_command is empty".into()));
        }
        if self.fixtures.config_name.trim().is_empty() {
            return Err(SmokeError::Config("fixtures.config_name is empty".into()));
        }
        Ok(())
    }
}

/// Isolated environment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// External environment builder program.
    pub builder: String,

    /// Arguments passed before `-p <interpreter> <dest>`.
    #[serde(default)]
    pub builder_args: Vec<String>,

    /// Interpreter the environment targets.
    pub interpreter: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            builder: "virtualenv".to_string(),
            builder_args: vec!["-q".to_string()],
            interpreter: "python".to_string(),
        }
    }
}

/// Invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationConfig {
    /// Environment variable naming the command interpreter.
    pub shell_var: String,

    /// Interpreter used when `shell_var` is unset.
    pub default_shell: String,

    /// Entry command; scenario arguments are appended.
    pub tool_command: Vec<String>,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            shell_var: "SHELL".to_string(),
            default_shell: "sh".to_string(),
            tool_command: vec!["python".to_string(), "ok".to_string()],
        }
    }
}

/// Client staging source. `package_command` wins when both are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Pre-built client tree copied into each working directory.
    pub source: Option<PathBuf>,

    /// Packaging command; the target directory is appended as the last argument.
    pub package_command: Option<Vec<String>>,
}

/// Fixture naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// File name the tool config descriptor is written under.
    pub config_name: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            config_name: "test.ok".to_string(),
        }
    }
}
