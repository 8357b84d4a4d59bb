//! Static fixture data staged into working directories.

use crate::error::{Result, SmokeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the sample source file the standard descriptor declares.
pub const SAMPLE_SOURCE_NAME: &str = "test.py";

/// Two doctested functions: `f` squares and passes, `g` cubes but its doctests expect squares.
pub const SAMPLE_SOURCE: &str = r#"
def f(x):
    """
    >>> f(2)
    4
    >>> f(3)
    9
    """
    return x ** 2
def g(x):
    """
    >>> g(2)
    4
    >>> g(3)
    9
    """
    return x ** 3
"#;

/// A named file written into a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureFile {
    pub relative_name: String,
    pub contents: Vec<u8>,
}

impl FixtureFile {
    pub fn new(relative_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_name: relative_name.into(),
            contents: contents.into(),
        }
    }

    /// Serialize a descriptor into the fixture the tool reads its configuration from.
    pub fn tool_config(name: &str, descriptor: &ToolConfigDescriptor) -> Result<Self> {
        Ok(Self::new(name, descriptor.to_json()?))
    }
}

/// Assignment configuration consumed by the tool under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfigDescriptor {
    pub name: String,
    pub endpoint: String,
    /// Source files; each must be staged next to the descriptor.
    pub src: Vec<String>,
    /// Source file name to comma-separated test kinds.
    pub tests: BTreeMap<String, String>,
    pub default_tests: Vec<String>,
    pub protocols: Vec<String>,
}

impl ToolConfigDescriptor {
    /// The descriptor the standard scenarios stage: one source file graded by doctest and lint.
    pub fn standard() -> Self {
        let mut tests = BTreeMap::new();
        tests.insert(SAMPLE_SOURCE_NAME.to_string(), "doctest,lint_test".to_string());

        Self {
            name: "Test Assignment".to_string(),
            endpoint: "cal/cs61a/fa19/test".to_string(),
            src: vec![SAMPLE_SOURCE_NAME.to_string()],
            tests,
            default_tests: vec!["test1".to_string()],
            protocols: [
                "restore",
                "file_contents",
                "unlock",
                "grading",
                "analytics",
                "backup",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SmokeError::Serialization(e.to_string()))
    }
}
