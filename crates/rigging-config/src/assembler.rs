//! Assembly of the final build configuration tree.
//!
//! The tree is a mode-independent base merged with an ordered list of
//! fragments. Each fragment carries a [`Guard`](crate::Guard); fragments whose
//! guard rejects the mode are skipped. Built-in fragments come first, then
//! fragments from the options, then fragments added with
//! [`Assembler::with_fragment`].
//!
//! # Example
//!
//! ```
//! use rigging_config::{Assembler, BuildMode, BuildOptions};
//! use serde_json::json;
//!
//! let options = BuildOptions::from_value(json!({
//!     "client_env": { "NODE_ENV": "production" },
//!     "paths": {
//!         "entry_point": "src/index.js",
//!         "output_path": "dist",
//!         "public_path": "/",
//!         "app_html": "public/index.html",
//!         "app_src": "src"
//!     }
//! }))
//! .unwrap();
//!
//! let config = Assembler::new(&options).unwrap().assemble().unwrap();
//! assert_eq!(config.mode(), BuildMode::Production);
//! assert_eq!(config.tree()["output"]["filename"], "[name].[contenthash:8].js");
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use crate::env::{client_env, stringified};
use crate::error::{ConfigError, Result};
use crate::loaders::StyleRules;
use crate::merge::{Fragment, apply_fragments};
use crate::mode::BuildMode;
use crate::options::{BuildOptions, ResolvedPaths};
use crate::plugin::{self, PluginDescriptor};
use crate::rules;

/// Builds a [`BuildConfig`] from [`BuildOptions`].
pub struct Assembler<'a> {
    options: &'a BuildOptions,
    mode: BuildMode,
    paths: ResolvedPaths,
    styles: StyleRules,
    extra: Vec<Fragment>,
}

impl<'a> Assembler<'a> {
    /// Check the mode and required paths up front.
    pub fn new(options: &'a BuildOptions) -> Result<Self> {
        let mode = options.mode()?;
        let paths = options.paths.resolve()?;
        Ok(Self {
            options,
            mode,
            paths,
            styles: StyleRules::new()?,
            extra: Vec::new(),
        })
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn style_rules(&self) -> &StyleRules {
        &self.styles
    }

    /// Append a fragment merged after every configured one.
    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.extra.push(fragment);
        self
    }

    /// The tree every mode starts from.
    pub fn base_tree(&self) -> Result<Value> {
        let paths = &self.paths;
        Ok(json!({
            "mode": self.mode.as_str(),
            "devtool": Value::Null,
            "entry": {
                "app": [paths.entry_point.to_string_lossy()],
            },
            "output": {
                "path": paths.output_path.to_string_lossy(),
                "publicPath": paths.public_path,
            },
            "module": {
                "rule": {
                    "baseLoaders": {
                        "oneOf": rules::one_of(
                            self.mode,
                            &self.styles,
                            &paths.app_src,
                            &self.options.babel,
                        )?,
                    },
                },
            },
            "plugin": {},
            "resolveLoader": {
                "plugin": plugin_map([plugin::pnp_loader_resolver()]),
            },
        }))
    }

    /// Every fragment in merge order, active or not.
    pub fn fragments(&self) -> Result<Vec<Fragment>> {
        use BuildMode::{Development, Production};

        let mut fragments = vec![
            Fragment::unless("devtool", Production, json!({ "devtool": "source-map" })),
            Fragment::only(
                "devtool",
                Production,
                json!({ "devtool": "cheap-module-source-map" }),
            ),
            Fragment::unless(
                "output.filenames",
                Production,
                json!({ "output": { "filename": "bundle.js", "chunkFilename": "[name].chunk.js" } }),
            ),
            Fragment::only(
                "output.filenames",
                Production,
                json!({
                    "output": {
                        "filename": "[name].[contenthash:8].js",
                        "chunkFilename": "[name].[contenthash:8].chunk.js",
                    }
                }),
            ),
        ];

        let plugins = [
            Fragment::always(
                "plugin.HtmlWebpackPlugin",
                plugin::html_plugin(&self.paths.app_html.to_string_lossy(), self.mode)
                    .to_fragment_tree(),
            ),
            Fragment::always(
                "plugin.PnpWebpackPlugin",
                plugin::pnp_plugin().to_fragment_tree(),
            ),
            Fragment::always(
                "plugin.DefinePlugin",
                plugin::define_plugin(stringified(&self.options.global_vars)?).to_fragment_tree(),
            ),
            Fragment::always(
                "plugin.EnvironmentPlugin",
                plugin::environment_plugin(stringified(&client_env(
                    self.mode,
                    &self.options.client_env,
                ))?)
                .to_fragment_tree(),
            ),
            Fragment::only(
                "plugin.HotModuleReplacementPlugin",
                Development,
                plugin::hot_module_replacement_plugin().to_fragment_tree(),
            ),
            Fragment::only(
                "plugin.MiniCssExtractPlugin",
                Production,
                plugin::css_extract_plugin().to_fragment_tree(),
            ),
        ];
        fragments.extend(plugins);

        let toggles = &self.options.plugins;
        let reporters = [
            (toggles.build_notifier, plugin::build_notifier_plugin()),
            (toggles.progress, plugin::progress_plugin()),
            (toggles.friendly_errors, plugin::friendly_errors_plugin()),
        ];
        for (enabled, descriptor) in reporters {
            if enabled {
                let label = format!("plugin.{}", descriptor.name);
                fragments.push(Fragment::always(label, descriptor.to_fragment_tree()));
            } else {
                tracing::debug!(plugin = %descriptor.name, "plugin disabled");
            }
        }

        fragments.extend(
            self.options
                .fragments
                .iter()
                .enumerate()
                .map(|(index, spec)| spec.to_fragment(index)),
        );
        fragments.extend(self.extra.iter().cloned());
        Ok(fragments)
    }

    /// Merge the base tree with every active fragment.
    pub fn assemble(self) -> Result<BuildConfig> {
        let tree = apply_fragments(self.mode, self.base_tree()?, self.fragments()?);
        if !tree.is_object() {
            return Err(ConfigError::invalid_value(
                "fragments",
                "a fragment replaced the configuration root with a non-table value",
            ));
        }

        let config = BuildConfig {
            mode: self.mode,
            tree,
        };
        tracing::info!(
            mode = %config.mode,
            rules = config.rule_names().len(),
            plugins = config.plugin_names().len(),
            "assembled build configuration"
        );
        Ok(config)
    }
}

fn plugin_map<const N: usize>(descriptors: [PluginDescriptor; N]) -> Value {
    let map = descriptors
        .into_iter()
        .map(|descriptor| (descriptor.name.clone(), json!(descriptor)))
        .collect::<serde_json::Map<_, _>>();
    Value::Object(map)
}

/// The assembled configuration tree, ready for the external build tool.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    mode: BuildMode,
    tree: Value,
}

impl BuildConfig {
    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn into_value(self) -> Value {
        self.tree
    }

    /// Look up a value by JSON pointer, e.g. `/output/filename`.
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.tree.pointer(pointer)
    }

    /// Registered plugin names, in registration order.
    pub fn plugin_names(&self) -> Vec<&str> {
        object_keys(self.tree.get("plugin"))
    }

    /// Names of the `oneOf` rules, in match order.
    pub fn rule_names(&self) -> Vec<&str> {
        object_keys(self.get("/module/rule/baseLoaders/oneOf"))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.tree).map_err(|e| ConfigError::invalid_value("output", e))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.tree).map_err(|e| ConfigError::invalid_value("output", e))
    }
}

fn object_keys(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_object)
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

impl Serialize for BuildConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.tree.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(mode: &str) -> BuildOptions {
        BuildOptions::from_value(json!({
            "client_env": { "NODE_ENV": mode, "PUBLIC_URL": "/app" },
            "global_vars": { "__VERSION__": "1.2.3" },
            "paths": {
                "entry_point": "src/index.js",
                "output_path": "/srv/dist",
                "public_path": "/",
                "app_html": "public/index.html",
                "app_src": "/srv/src"
            }
        }))
        .unwrap()
    }

    fn assemble(mode: &str) -> BuildConfig {
        let options = options(mode);
        Assembler::new(&options).unwrap().assemble().unwrap()
    }

    #[test]
    fn unknown_mode_fails_fast() {
        let options = options("staging");
        assert!(matches!(
            Assembler::new(&options),
            Err(ConfigError::UnknownMode(m)) if m == "staging"
        ));
    }

    #[test]
    fn missing_path_fails_fast() {
        let mut options = options("development");
        options.paths.output_path = None;
        assert!(matches!(
            Assembler::new(&options),
            Err(ConfigError::MissingPath { field: "output_path" })
        ));
    }

    #[test]
    fn development_tree() {
        let config = assemble("development");
        let tree = config.tree();

        assert_eq!(tree["mode"], "development");
        assert_eq!(tree["devtool"], "source-map");
        assert_eq!(tree["entry"]["app"], json!(["src/index.js"]));
        assert_eq!(tree["output"]["filename"], "bundle.js");
        assert_eq!(tree["output"]["chunkFilename"], "[name].chunk.js");
        assert_eq!(tree["output"]["path"], "/srv/dist");
        assert_eq!(
            config.plugin_names(),
            [
                "HtmlWebpackPlugin",
                "PnpWebpackPlugin",
                "DefinePlugin",
                "EnvironmentPlugin",
                "HotModuleReplacementPlugin",
                "WebpackBuildNotifier",
                "NyanProgressPlugin",
            ]
        );
    }

    #[test]
    fn devtool_follows_mode_in_both_modes() {
        for mode in ["development", "production"] {
            let config = assemble(mode);
            let keys: Vec<_> = config
                .tree()
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            assert_eq!(keys[..3], ["mode", "devtool", "entry"]);
            assert!(config.tree()["devtool"].is_string());
        }
    }

    #[test]
    fn production_tree() {
        let config = assemble("production");
        let tree = config.tree();

        assert_eq!(tree["devtool"], "cheap-module-source-map");
        assert_eq!(tree["output"]["filename"], "[name].[contenthash:8].js");
        assert_eq!(
            config.plugin_names(),
            [
                "HtmlWebpackPlugin",
                "PnpWebpackPlugin",
                "DefinePlugin",
                "EnvironmentPlugin",
                "MiniCssExtractPlugin",
                "WebpackBuildNotifier",
                "NyanProgressPlugin",
            ]
        );
        assert!(
            tree["plugin"]["HtmlWebpackPlugin"]["args"][0]
                .get("minify")
                .is_some()
        );
    }

    #[test]
    fn style_chains_follow_mode() {
        let dev = assemble("development");
        let prod = assemble("production");

        let dev_sass = dev.get("/module/rule/baseLoaders/oneOf/sass/use").unwrap();
        let prod_sass = prod.get("/module/rule/baseLoaders/oneOf/sass/use").unwrap();

        let dev_names: Vec<_> = dev_sass.as_object().unwrap().keys().cloned().collect();
        let prod_names: Vec<_> = prod_sass.as_object().unwrap().keys().cloned().collect();
        assert_eq!(dev_names, ["styleLoader", "cssLoader", "sassLoader"]);
        assert_eq!(prod_names, ["extractCss", "cssLoader", "sassLoader"]);
    }

    #[test]
    fn environment_is_stringified() {
        let config = assemble("production");
        let env = &config.tree()["plugin"]["EnvironmentPlugin"]["args"][0];
        assert_eq!(env["NODE_ENV"], "\"production\"");
        assert_eq!(env["PUBLIC_URL"], "\"/app\"");

        let globals = &config.tree()["plugin"]["DefinePlugin"]["args"][0];
        assert_eq!(globals["__VERSION__"], "\"1.2.3\"");
    }

    #[test]
    fn friendly_errors_only_when_enabled() {
        assert!(!assemble("development").plugin_names().contains(&"FriendlyErrorsPlugin"));

        let mut options = options("development");
        options.plugins.friendly_errors = true;
        let config = Assembler::new(&options).unwrap().assemble().unwrap();
        assert_eq!(config.plugin_names().last(), Some(&"FriendlyErrorsPlugin"));
    }

    #[test]
    fn extra_fragments_merge_last() {
        let options = options("production");
        let config = Assembler::new(&options)
            .unwrap()
            .with_fragment(Fragment::only(
                "dev-server",
                BuildMode::Development,
                json!({"devServer": {"hot": true}}),
            ))
            .with_fragment(Fragment::always(
                "output.path",
                json!({"output": {"path": "/tmp/out"}}),
            ))
            .assemble()
            .unwrap();

        assert!(config.tree().get("devServer").is_none());
        assert_eq!(config.tree()["output"]["path"], "/tmp/out");
        assert_eq!(config.tree()["output"]["publicPath"], "/");
    }

    #[test]
    fn root_replacement_is_rejected() {
        let options = options("production");
        let result = Assembler::new(&options)
            .unwrap()
            .with_fragment(Fragment::always("broken", json!(null)))
            .assemble();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn resolve_loader_uses_pnp() {
        let config = assemble("development");
        assert_eq!(
            config.get("/resolveLoader/plugin/pnp").unwrap(),
            &json!({"plugin": "pnp-webpack-plugin/moduleLoader", "args": ["module"]})
        );
    }
}
