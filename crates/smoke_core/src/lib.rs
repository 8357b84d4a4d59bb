//! Smoke Core Library
//!
//! End-to-end smoke testing for a packaged command-line tool:
//! - Provision one isolated interpreter environment per suite
//! - Stage the packaged client and fixture files into a fresh directory per scenario
//! - Invoke the tool through a shell with the environment activated
//! - Check stdout and stderr against exact or pattern expectations
//!
//! # Quick Start
//!
//! ```no_run
//! use smoke_core::{standard, HarnessConfig, SmokeSuite};
//!
//! let config = HarnessConfig::default();
//! let suite = SmokeSuite::from_config(&config).unwrap();
//!
//! let report = suite.run_all(&standard::scenarios(&config.product));
//! println!("{} passed, {} failed", report.passed(), report.failed());
//!
//! suite.teardown().unwrap();
//! ```
//!
//! # Writing Scenarios
//!
//! ```
//! use smoke_core::{Scenario, ToolConfigDescriptor};
//!
//! let scenario = Scenario::new("passing_test")
//!     .with_tool_config(ToolConfigDescriptor::standard())
//!     .with_file("test.py", "def f(x):\n    return x ** 2\n")
//!     .invoke(&["-q", "f", "--local"])
//!     .expect_stderr_eq("")
//!     .expect_stdout_matches(".*1 test cases passed! No cases failed.*");
//!
//! assert_eq!(scenario.args(), ["-q", "f", "--local"]);
//! ```

mod assertions;
mod config;
mod environment;
mod error;
mod fixtures;
mod invocation;
mod scenario;
mod stager;
mod suite;
mod workspace;

pub mod standard;

pub use assertions::{check, AssertionFailure, Expectation, Stream, StreamExpectation};
pub use config::{
    ClientConfig, EnvironmentConfig, FixtureConfig, HarnessConfig, InvocationConfig,
    DEFAULT_CONFIG_FILE,
};
pub use environment::{IsolatedEnvironment, Provisioner, VirtualenvProvisioner};
pub use error::{Result, SmokeError};
pub use fixtures::{FixtureFile, ToolConfigDescriptor, SAMPLE_SOURCE, SAMPLE_SOURCE_NAME};
pub use invocation::{
    activation_dir_name, activation_script, quote_token, InvocationRequest, InvocationResult,
    ShellInvoker,
};
pub use scenario::{Scenario, ScenarioResult};
pub use stager::{stager_from_config, ClientStager, CommandStager, CopyStager};
pub use suite::{SmokeSuite, SuiteReport};
pub use workspace::WorkingDirectory;
