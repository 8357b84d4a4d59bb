//! The standard smoke scenarios for a packaged grading client.

use crate::fixtures::{ToolConfigDescriptor, SAMPLE_SOURCE, SAMPLE_SOURCE_NAME};
use crate::scenario::Scenario;

/// Printed for both "nothing to run" and "the selected case failed".
pub const ZERO_PASSED: &str = ".*0 test cases passed! No cases failed.*";

pub const ONE_PASSED: &str = ".*1 test cases passed! No cases failed.*";

pub const UPDATE_CHECK: &str =
    "Current version: v[0-9.]+\nChecking for software updates...\nOK is up to date";

/// Names of the standard scenarios, in run order.
pub const NAMES: [&str; 5] = [
    "version",
    "update",
    "run_no_argument",
    "passing_test",
    "failing_test",
];

/// Build the standard scenarios for `product`.
pub fn scenarios(product: &str) -> Vec<Scenario> {
    vec![
        version(product),
        update(),
        run_no_argument(),
        passing_test(),
        failing_test(),
    ]
}

/// Standard scenarios whose names appear in `filter`; all of them when `filter` is empty.
pub fn select(product: &str, filter: &[String]) -> Vec<Scenario> {
    scenarios(product)
        .into_iter()
        .filter(|s| filter.is_empty() || filter.iter().any(|f| f == s.name()))
        .collect()
}

pub fn version(product: &str) -> Scenario {
    Scenario::new("version")
        .invoke(&["--version"])
        .expect_stderr_eq("")
        .expect_stdout_matches(&format!("^{}==.*", regex::escape(product)))
}

pub fn update() -> Scenario {
    Scenario::new("update")
        .invoke(&["--update"])
        .expect_stderr_eq("")
        .expect_stdout_matches(UPDATE_CHECK)
}

pub fn run_no_argument() -> Scenario {
    Scenario::new("run_no_argument")
        .with_tool_config(ToolConfigDescriptor::standard())
        .with_file(SAMPLE_SOURCE_NAME, "")
        .invoke(&["--local"])
        .expect_stderr_eq("")
        .expect_stdout_matches(ZERO_PASSED)
}

pub fn passing_test() -> Scenario {
    Scenario::new("passing_test")
        .with_tool_config(ToolConfigDescriptor::standard())
        .with_file(SAMPLE_SOURCE_NAME, SAMPLE_SOURCE)
        .invoke(&["-q", "f", "--local"])
        .expect_stderr_eq("")
        .expect_stdout_matches(ONE_PASSED)
}

pub fn failing_test() -> Scenario {
    Scenario::new("failing_test")
        .with_tool_config(ToolConfigDescriptor::standard())
        .with_file(SAMPLE_SOURCE_NAME, SAMPLE_SOURCE)
        .invoke(&["-q", "g", "--local"])
        .expect_stderr_eq("")
        .expect_stdout_matches(ZERO_PASSED)
}
