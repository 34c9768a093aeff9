//! Pluggable options validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::options::{BuildOptions, ResolvedPaths};

/// Trait for pluggable options validation strategies
pub trait ConfigValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use rigging_config::{BuildOptions, ConfigValidator, SchemaValidator};
/// use serde_json::json;
///
/// let options = BuildOptions::from_value(json!({
///     "client_env": { "NODE_ENV": "development" },
///     "paths": {
///         "entry_point": "src/index.js",
///         "output_path": "dist",
///         "public_path": "/",
///         "app_html": "public/index.html",
///         "app_src": "src"
///     }
/// }))
/// .unwrap();
///
/// SchemaValidator.validate(&options).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()> {
        options.mode()?;
        let paths = options.paths.resolve()?;

        if !paths.public_path.ends_with('/') {
            return Err(ConfigError::SchemaValidation {
                message: format!("public_path '{}' must end with '/'", paths.public_path),
                hint: Some(format!("Use '{}/'", paths.public_path)),
            });
        }

        if options.client_env.keys().any(|key| key.trim().is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: "client_env variable names cannot be empty".to_string(),
                hint: Some("Remove empty keys from [client_env]".to_string()),
            });
        }

        for (index, fragment) in options.fragments.iter().enumerate() {
            if !fragment.tree.is_object() {
                let name = fragment
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("fragments[{index}]"));
                return Err(ConfigError::SchemaValidation {
                    message: format!("fragment '{name}' must be a table"),
                    hint: Some("Write the fragment tree as `tree = { ... }`".to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs the schema checks, then verifies the entry point, HTML template and
/// source directory exist under the root.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn require(&self, field: &'static str, path: &Path, is_dir: bool) -> Result<()> {
        let full = self.root.join(path);
        let found = if is_dir { full.is_dir() } else { full.is_file() };
        if found {
            Ok(())
        } else {
            Err(ConfigError::PathNotFound { field, path: full })
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, options: &BuildOptions) -> Result<()> {
        SchemaValidator.validate(options)?;

        let ResolvedPaths {
            entry_point,
            app_html,
            app_src,
            ..
        } = options.paths.resolve()?;

        self.require("entry_point", &entry_point, false)?;
        self.require("app_html", &app_html, false)?;
        self.require("app_src", &app_src, true)?;
        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(options: &BuildOptions) -> Result<()> {
    SchemaValidator.validate(options)
}

/// Convenience function for filesystem validation
pub fn validate_fs(options: &BuildOptions, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(options)
}
