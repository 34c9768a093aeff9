//! Build mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Target of a build: fast iteration or optimized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Environment variable the mode is read from.
    pub const ENV_VAR: &'static str = "NODE_ENV";

    pub const ALL: [BuildMode; 2] = [BuildMode::Development, BuildMode::Production];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    pub fn is_dev(self) -> bool {
        self == BuildMode::Development
    }

    pub fn is_prod(self) -> bool {
        self == BuildMode::Production
    }

    /// Parse an optional mode string, failing when it is absent.
    ///
    /// There is no fallback mode.
    pub fn require(value: Option<&str>) -> Result<Self> {
        value.ok_or(ConfigError::ModeNotSet(Self::ENV_VAR))?.parse()
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    /// Matching is exact: `"Production"` or `" production"` are rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" => Ok(BuildMode::Development),
            "production" => Ok(BuildMode::Production),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
