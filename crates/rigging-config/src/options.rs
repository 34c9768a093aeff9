//! Build options: everything the assembler reads, gathered in one value.
//!
//! Options are built once at startup (see [`crate::discovery`]) and passed by
//! reference into [`crate::Assembler`]. Nothing downstream reads the process
//! environment.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ConfigError, Result};
use crate::merge::{Fragment, Guard};
use crate::mode::BuildMode;
use crate::plugin::PluginToggles;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Variables exposed to client code; `NODE_ENV` selects the build mode
    #[serde(default)]
    pub client_env: IndexMap<String, String>,

    /// Compile-time constants substituted into the bundle
    #[serde(default)]
    pub global_vars: IndexMap<String, Value>,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub plugins: PluginToggles,

    /// Options forwarded verbatim to `babel-loader`
    #[serde(default = "default_babel")]
    pub babel: Value,

    /// Project fragments merged after the built-in ones
    #[serde(default)]
    pub fragments: Vec<FragmentSpec>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            client_env: IndexMap::new(),
            global_vars: IndexMap::new(),
            paths: PathsConfig::default(),
            plugins: PluginToggles::default(),
            babel: default_babel(),
            fragments: Vec::new(),
        }
    }
}

fn default_babel() -> Value {
    json!({ "cacheDirectory": true })
}

impl BuildOptions {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use rigging_config::BuildOptions;
    /// use serde_json::json;
    ///
    /// let options = BuildOptions::from_value(json!({
    ///     "client_env": { "NODE_ENV": "production" },
    ///     "paths": { "entry_point": "src/index.js" }
    /// }))
    /// .unwrap();
    /// assert_eq!(options.client_env["NODE_ENV"], "production");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("options", e))
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("options", e))
    }

    /// The build mode named by `client_env.NODE_ENV`.
    pub fn mode(&self) -> Result<BuildMode> {
        BuildMode::require(self.client_env.get(BuildMode::ENV_VAR).map(String::as_str))
    }

    /// Pin the build mode, overriding whatever was configured.
    pub fn set_mode(&mut self, mode: BuildMode) {
        self.client_env
            .insert(BuildMode::ENV_VAR.to_string(), mode.as_str().to_string());
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.set_mode(mode);
        self
    }
}

/// Filesystem locations; all of them are required before assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// URL prefix assets are served from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// HTML template for the generated page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_html: Option<PathBuf>,

    /// Application sources handled by the script loader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_src: Option<PathBuf>,
}

impl PathsConfig {
    /// Check every path is present and non-empty.
    pub fn resolve(&self) -> Result<ResolvedPaths> {
        Ok(ResolvedPaths {
            entry_point: require_path("entry_point", self.entry_point.as_ref())?,
            output_path: require_path("output_path", self.output_path.as_ref())?,
            public_path: match self.public_path.as_deref() {
                Some(prefix) if !prefix.trim().is_empty() => prefix.to_string(),
                _ => return Err(ConfigError::MissingPath { field: "public_path" }),
            },
            app_html: require_path("app_html", self.app_html.as_ref())?,
            app_src: require_path("app_src", self.app_src.as_ref())?,
        })
    }
}

fn require_path(field: &'static str, path: Option<&PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
        _ => Err(ConfigError::MissingPath { field }),
    }
}

/// [`PathsConfig`] after every required entry has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub entry_point: PathBuf,
    pub output_path: PathBuf,
    pub public_path: String,
    pub app_html: PathBuf,
    pub app_src: PathBuf,
}

/// A fragment as written in a configuration file.
///
/// ```toml
/// [[fragments]]
/// when = "production"
/// tree = { performance = { hints = "warning" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default = "default_guard")]
    pub when: Guard,

    pub tree: Value,
}

fn default_guard() -> Guard {
    Guard::Always
}

impl FragmentSpec {
    pub fn to_fragment(&self, index: usize) -> Fragment {
        let label = self
            .name
            .clone()
            .unwrap_or_else(|| format!("fragments[{index}]"));
        Fragment::new(label, self.when, self.tree.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_paths() -> PathsConfig {
        PathsConfig {
            entry_point: Some("src/index.js".into()),
            output_path: Some("dist".into()),
            public_path: Some("/".into()),
            app_html: Some("public/index.html".into()),
            app_src: Some("src".into()),
        }
    }

    #[test]
    fn mode_comes_from_client_env() {
        let mut options = BuildOptions::default();
        assert!(matches!(options.mode(), Err(ConfigError::ModeNotSet(_))));

        options.client_env.insert("NODE_ENV".into(), "production".into());
        assert_eq!(options.mode().unwrap(), BuildMode::Production);

        options.client_env.insert("NODE_ENV".into(), "staging".into());
        assert!(matches!(options.mode(), Err(ConfigError::UnknownMode(m)) if m == "staging"));
    }

    #[test]
    fn with_mode_overrides_client_env() {
        let options = BuildOptions::default().with_mode(BuildMode::Development);
        assert_eq!(options.mode().unwrap(), BuildMode::Development);
    }

    #[test]
    fn resolve_reports_first_missing_path() {
        let mut paths = full_paths();
        paths.app_html = None;
        assert!(matches!(
            paths.resolve(),
            Err(ConfigError::MissingPath { field: "app_html" })
        ));

        let mut paths = full_paths();
        paths.public_path = Some("  ".into());
        assert!(matches!(
            paths.resolve(),
            Err(ConfigError::MissingPath { field: "public_path" })
        ));

        let mut paths = full_paths();
        paths.entry_point = Some(PathBuf::new());
        assert!(matches!(
            paths.resolve(),
            Err(ConfigError::MissingPath { field: "entry_point" })
        ));
    }

    #[test]
    fn resolve_succeeds_with_all_paths() {
        let resolved = full_paths().resolve().unwrap();
        assert_eq!(resolved.entry_point, PathBuf::from("src/index.js"));
        assert_eq!(resolved.public_path, "/");
    }

    #[test]
    fn defaults_deserialize_from_empty_object() {
        let options = BuildOptions::from_value(json!({})).unwrap();
        assert_eq!(options.babel, json!({"cacheDirectory": true}));
        assert!(options.fragments.is_empty());
        assert!(!options.plugins.friendly_errors);
    }

    #[test]
    fn fragment_specs_parse_guards() {
        let options = BuildOptions::from_value(json!({
            "fragments": [
                { "when": "!production", "tree": { "devServer": { "hot": true } } },
                { "name": "perf", "tree": { "performance": false } }
            ]
        }))
        .unwrap();

        assert_eq!(options.fragments[0].when, Guard::Unless(BuildMode::Production));
        assert_eq!(options.fragments[1].when, Guard::Always);
        assert_eq!(options.fragments[0].to_fragment(0).label(), "fragments[0]");
        assert_eq!(options.fragments[1].to_fragment(1).label(), "perf");
    }

    #[test]
    fn invalid_guard_is_rejected() {
        let err = BuildOptions::from_value(json!({
            "fragments": [{ "when": "qa", "tree": {} }]
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
