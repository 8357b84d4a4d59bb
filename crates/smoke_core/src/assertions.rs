//! Expectations checked against captured output.

use crate::error::Result;
use crate::invocation::InvocationResult;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Which captured stream an expectation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn select<'a>(&self, result: &'a InvocationResult) -> &'a str {
        match self {
            Self::Stdout => &result.stdout,
            Self::Stderr => &result.stderr,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::Stderr => write!(f, "stderr"),
        }
    }
}

/// A single comparison against one stream's text.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Whole stream equals the text.
    Exact(String),
    /// Pattern found anywhere in the stream unless it anchors itself.
    Matches(Regex),
    /// Literal substring.
    Contains(String),
}

impl Expectation {
    pub fn exact(text: &str) -> Self {
        Self::Exact(text.to_string())
    }

    pub fn matches(pattern: &str) -> Result<Self> {
        Ok(Self::Matches(Regex::new(pattern)?))
    }

    pub fn contains(text: &str) -> Self {
        Self::Contains(text.to_string())
    }

    pub fn is_met(&self, actual: &str) -> bool {
        match self {
            Self::Exact(expected) => actual == expected,
            Self::Matches(re) => re.is_match(actual),
            Self::Contains(needle) => actual.contains(needle.as_str()),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(s) => write!(f, "equal {:?}", s),
            Self::Matches(re) => write!(f, "match /{}/", re.as_str()),
            Self::Contains(s) => write!(f, "contain {:?}", s),
        }
    }
}

/// An expectation bound to a stream.
#[derive(Debug, Clone)]
pub struct StreamExpectation {
    pub stream: Stream,
    pub expectation: Expectation,
}

/// Every unmet expectation of one scenario, with the actual text of both streams.
#[derive(Debug, Clone)]
pub struct AssertionFailure {
    pub scenario: String,
    pub unmet: Vec<(Stream, String)>,
    pub output: InvocationResult,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scenario '{}' output did not meet expectations:", self.scenario)?;
        for (stream, expected) in &self.unmet {
            writeln!(f, "  {} expected to {}", stream, expected)?;
        }
        writeln!(f, "--- actual stdout ---")?;
        writeln!(f, "{}", self.output.stdout)?;
        writeln!(f, "--- actual stderr ---")?;
        write!(f, "{}", self.output.stderr)
    }
}

impl std::error::Error for AssertionFailure {}

/// Check all expectations; every stream is checked even after a mismatch.
pub fn check(
    scenario: &str,
    result: &InvocationResult,
    expectations: &[StreamExpectation],
) -> std::result::Result<(), AssertionFailure> {
    let unmet: Vec<(Stream, String)> = expectations
        .iter()
        .filter(|e| !e.expectation.is_met(e.stream.select(result)))
        .map(|e| (e.stream, e.expectation.to_string()))
        .collect();

    if unmet.is_empty() {
        Ok(())
    } else {
        Err(AssertionFailure {
            scenario: scenario.to_string(),
            unmet,
            output: result.clone(),
        })
    }
}
