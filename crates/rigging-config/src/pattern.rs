//! File patterns for rule `test` and `exclude` fields.

use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A validated file pattern used in rule `test`/`exclude` fields.
///
/// Serializes in regex-literal form (`/\.css$/`) so the consuming build tool
/// can tell it apart from a plain path string.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        let regex = Regex::new(source).map_err(|source_err| ConfigError::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
