//! File-based options discovery for CLI use
//!
//! Handles finding Rigging configuration files and layering them with the
//! process environment.

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;
use crate::options::{BuildOptions, FragmentSpec};

/// Name of the TOML configuration file.
pub const CONFIG_FILE: &str = "rigging.toml";

/// Field holding options inside `package.json`.
pub const PACKAGE_FIELD: &str = "rigging";

/// Prefix of environment overrides, e.g. `RIGGING_PATHS__PUBLIC_PATH`.
pub const ENV_PREFIX: &str = "RIGGING_";

/// File-based configuration discovery
///
/// Layers, lowest precedence first:
/// 1. built-in defaults
/// 2. `rigging.toml`, or the `rigging` field of `package.json`
/// 3. `RIGGING_*` environment variables (`__` separates nesting levels);
///    names under `RIGGING_CLIENT_ENV__` and `RIGGING_GLOBAL_VARS__` keep
///    their case
/// 4. `NODE_ENV`, which sets `client_env.NODE_ENV`
///
/// # Example
///
/// ```no_run
/// use rigging_config::ConfigDiscovery;
///
/// let options = ConfigDiscovery::new(".").load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: rigging.toml
    /// 2. package.json (rigging field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed = serde_json::from_str::<Value>(&content).ok()?;
        parsed
            .get(PACKAGE_FIELD)
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load options from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<BuildOptions> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load options from the discovered file, or from defaults and the
    /// environment alone when there is none.
    pub fn load_or_default(&self) -> Result<BuildOptions> {
        match self.find() {
            Some(path) => self.load_from(&path),
            None => {
                tracing::debug!(root = %self.root.display(), "no config file found, using defaults");
                extract(base_figment(), OrderedSections::default())
            }
        }
    }

    /// Load options from a specific file path
    pub fn load_from(&self, path: &Path) -> Result<BuildOptions> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                field: "config file",
                path,
            });
        }
        tracing::debug!(path = %path.display(), "loading build options");

        let (figment, document) = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            let field = package_field(&path)?;
            (base_figment().merge(Serialized::defaults(field.clone())), field)
        } else {
            let content = fs::read_to_string(&path)?;
            let document: Value = toml::from_str(&content)
                .map_err(|e| ConfigError::invalid_value(CONFIG_FILE, e))?;
            (base_figment().merge(Toml::string(&content)), document)
        };
        extract(figment, OrderedSections::from_document(document)?)
    }
}

/// Map-valued sections read straight from the file.
///
/// figment stores tables as sorted maps, so these are taken from an
/// order-preserving parse instead and substituted after extraction.
#[derive(Debug, Default, Deserialize)]
struct OrderedSections {
    #[serde(default)]
    client_env: Option<IndexMap<String, String>>,
    #[serde(default)]
    global_vars: Option<IndexMap<String, Value>>,
    #[serde(default)]
    fragments: Option<Vec<FragmentSpec>>,
}

impl OrderedSections {
    fn from_document(document: Value) -> Result<Self> {
        serde_json::from_value(document).map_err(|e| ConfigError::invalid_value("configuration", e))
    }
}

/// Sections whose keys are user-chosen names and keep their case.
const MAP_SECTIONS: [&str; 2] = ["client_env", "global_vars"];

fn is_map_override(key: &str) -> bool {
    let key = key.to_ascii_lowercase().replace("__", ".");
    MAP_SECTIONS
        .iter()
        .any(|section| key.strip_prefix(section).is_some_and(|rest| rest.starts_with('.')))
}

/// `RIGGING_<SECTION>__<NAME>` variables, names as written, sorted by name.
fn map_overrides(section: &str) -> Vec<(String, String)> {
    let prefix = format!("{ENV_PREFIX}{}__", section.to_ascii_uppercase());
    let mut overrides: Vec<_> = std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix(&prefix)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), value))
        })
        .collect();
    overrides.sort();
    overrides
}

fn base_figment() -> Figment {
    Figment::new().merge(Serialized::defaults(BuildOptions::default()))
}

fn extract(figment: Figment, ordered: OrderedSections) -> Result<BuildOptions> {
    let mut options: BuildOptions = figment
        .merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                .filter(|key| !is_map_override(key.as_str())),
        )
        .extract()
        .map_err(|e| ConfigError::invalid_value("configuration", e))?;

    if let Some(client_env) = ordered.client_env {
        options.client_env = client_env;
    }
    if let Some(global_vars) = ordered.global_vars {
        options.global_vars = global_vars;
    }
    if let Some(fragments) = ordered.fragments {
        options.fragments = fragments;
    }

    for (name, value) in map_overrides("client_env") {
        options.client_env.insert(name, value);
    }
    for (name, raw) in map_overrides("global_vars") {
        let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        options.global_vars.insert(name, value);
    }

    if let Ok(node_env) = std::env::var(BuildMode::ENV_VAR) {
        options
            .client_env
            .insert(BuildMode::ENV_VAR.to_string(), node_env);
    }
    Ok(options)
}

fn package_field(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let mut parsed: Value = serde_json::from_str(&content)
        .map_err(|e| ConfigError::invalid_value("package.json", format!("Invalid JSON: {e}")))?;

    match parsed.get_mut(PACKAGE_FIELD).map(Value::take) {
        Some(Value::Null) | None => Err(ConfigError::invalid_value(
            PACKAGE_FIELD,
            "Add a 'rigging' field to your package.json",
        )),
        Some(field) => Ok(field),
    }
}

/// Discover and load options from the current directory (convenience function)
pub fn discover() -> Result<BuildOptions> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
