use crate::assertions::{Expectation, Stream, StreamExpectation};
use crate::fixtures::{FixtureFile, ToolConfigDescriptor};
use crate::invocation::InvocationResult;
use crate::suite::SmokeSuite;
use serde::Serialize;
use std::path::PathBuf;

/// Fluent DSL for building smoke scenarios
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    tool_config: Option<ToolConfigDescriptor>,
    fixtures: Vec<FixtureFile>,
    args: Vec<String>,
    expectations: Vec<StreamExpectation>,
    invalid_pattern: Option<regex::Error>,
}

impl Scenario {
    /// Create a new scenario with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tool_config: None,
            fixtures: Vec::new(),
            args: Vec::new(),
            expectations: Vec::new(),
            invalid_pattern: None,
        }
    }

    // ===== Fixtures =====

    /// Add a file to the working directory; a later file with the same name wins
    pub fn with_file(mut self, name: &str, contents: impl AsRef<[u8]>) -> Self {
        self.fixtures.push(FixtureFile::new(name, contents.as_ref()));
        self
    }

    /// Stage a tool config descriptor under the suite's config file name
    pub fn with_tool_config(mut self, descriptor: ToolConfigDescriptor) -> Self {
        self.tool_config = Some(descriptor);
        self
    }

    // ===== Invocation =====

    /// Arguments passed to the tool's entry command
    pub fn invoke(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    // ===== Assertions =====

    /// Add a general expectation
    pub fn expect(mut self, stream: Stream, expectation: Expectation) -> Self {
        self.expectations.push(StreamExpectation {
            stream,
            expectation,
        });
        self
    }

    pub fn expect_stdout_eq(self, text: &str) -> Self {
        self.expect(Stream::Stdout, Expectation::exact(text))
    }

    pub fn expect_stderr_eq(self, text: &str) -> Self {
        self.expect(Stream::Stderr, Expectation::exact(text))
    }

    pub fn expect_stdout_contains(self, text: &str) -> Self {
        self.expect(Stream::Stdout, Expectation::contains(text))
    }

    /// Expect stdout to match a pattern (search semantics)
    pub fn expect_stdout_matches(self, pattern: &str) -> Self {
        self.expect_pattern(Stream::Stdout, pattern)
    }

    /// Expect stderr to match a pattern (search semantics)
    pub fn expect_stderr_matches(self, pattern: &str) -> Self {
        self.expect_pattern(Stream::Stderr, pattern)
    }

    fn expect_pattern(mut self, stream: Stream, pattern: &str) -> Self {
        match regex::Regex::new(pattern) {
            Ok(re) => self.expect(stream, Expectation::Matches(re)),
            Err(e) => {
                // Reported when the scenario runs.
                self.invalid_pattern.get_or_insert(e);
                self
            }
        }
    }

    // ===== Accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tool_config(&self) -> Option<&ToolConfigDescriptor> {
        self.tool_config.as_ref()
    }

    pub fn fixtures(&self) -> &[FixtureFile] {
        &self.fixtures
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn expectations(&self) -> &[StreamExpectation] {
        &self.expectations
    }

    pub fn invalid_pattern(&self) -> Option<&regex::Error> {
        self.invalid_pattern.as_ref()
    }

    // ===== Execution =====

    /// Execute the scenario against a provisioned suite
    pub fn run(&self, suite: &SmokeSuite) -> ScenarioResult {
        suite.run_scenario(self)
    }
}

/// Result of running a scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    /// The error invalidates the rest of the suite.
    pub fatal: bool,
    pub output: Option<InvocationResult>,
    pub error: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub duration_ms: u64,
}

impl ScenarioResult {
    /// Unwrap the result, panicking if it failed
    pub fn unwrap(self) -> Option<InvocationResult> {
        if !self.success {
            panic!(
                "Scenario '{}' failed: {}",
                self.name,
                self.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        self.output
    }

    /// Expect the result to be successful
    pub fn expect(self, msg: &str) -> Option<InvocationResult> {
        if !self.success {
            panic!(
                "{}: Scenario '{}' failed: {}",
                msg,
                self.name,
                self.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        self.output
    }
}
