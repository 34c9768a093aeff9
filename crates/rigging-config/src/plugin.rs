//! Plugin descriptors handed to the external build tool.
//!
//! The assembler does not run any plugin. It only emits the identifier the
//! build tool resolves and the constructor arguments to pass.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::merge::merge_if;
use crate::mode::BuildMode;

pub const HTML_PLUGIN: &str = "html-webpack-plugin";
pub const PNP_PLUGIN: &str = "pnp-webpack-plugin";
pub const PNP_MODULE_LOADER: &str = "pnp-webpack-plugin/moduleLoader";
pub const DEFINE_PLUGIN: &str = "webpack.DefinePlugin";
pub const ENVIRONMENT_PLUGIN: &str = "webpack.EnvironmentPlugin";
pub const HOT_MODULE_REPLACEMENT_PLUGIN: &str = "webpack.HotModuleReplacementPlugin";
pub const CSS_EXTRACT_PLUGIN: &str = "mini-css-extract-plugin";
pub const BUILD_NOTIFIER_PLUGIN: &str = "webpack-build-notifier";
pub const PROGRESS_PLUGIN: &str = "nyan-progress-webpack-plugin";
pub const FRIENDLY_ERRORS_PLUGIN: &str = "friendly-errors-webpack-plugin";

/// Which optional reporters are registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginToggles {
    #[serde(default = "default_true")]
    pub build_notifier: bool,

    #[serde(default = "default_true")]
    pub progress: bool,

    /// Console error reporter; off unless asked for.
    #[serde(default)]
    pub friendly_errors: bool,
}

impl Default for PluginToggles {
    fn default() -> Self {
        Self {
            build_notifier: true,
            progress: true,
            friendly_errors: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Key of the plugin in the configuration tree
    #[serde(skip)]
    pub name: String,

    /// Identifier the build tool resolves to a plugin constructor
    pub plugin: String,

    /// Constructor arguments, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin: plugin.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: Value) -> Self {
        self.args.push(arg);
        self
    }

    /// Wrap the descriptor as `{ "plugin": { <name>: {...} } }` for merging.
    pub fn to_fragment_tree(&self) -> Value {
        let mut plugins = Map::new();
        plugins.insert(self.name.clone(), json!(self));
        json!({ "plugin": plugins })
    }
}

/// HTML generation plugin. Production builds minify the emitted page.
pub fn html_plugin(template: &str, mode: BuildMode) -> PluginDescriptor {
    let options = merge_if(
        mode.is_prod(),
        json!({ "template": template }),
        json!({
            "minify": {
                "removeComments": true,
                "collapseWhitespace": true,
                "removeRedundantAttributes": true,
                "useShortDoctype": true,
                "removeEmptyAttributes": true,
                "removeStyleLinkTypeAttributes": true,
                "keepClosingSlash": true,
                "minifyJS": true,
                "minifyCSS": true,
                "minifyURLs": true,
            }
        }),
    );
    PluginDescriptor::new("HtmlWebpackPlugin", HTML_PLUGIN).with_arg(options)
}

pub fn pnp_plugin() -> PluginDescriptor {
    PluginDescriptor::new("PnpWebpackPlugin", PNP_PLUGIN)
}

/// Loader-resolution hook so loaders resolve through the workspace.
pub fn pnp_loader_resolver() -> PluginDescriptor {
    PluginDescriptor::new("pnp", PNP_MODULE_LOADER).with_arg(json!("module"))
}

pub fn define_plugin(definitions: Map<String, Value>) -> PluginDescriptor {
    PluginDescriptor::new("DefinePlugin", DEFINE_PLUGIN).with_arg(Value::Object(definitions))
}

pub fn environment_plugin(variables: Map<String, Value>) -> PluginDescriptor {
    PluginDescriptor::new("EnvironmentPlugin", ENVIRONMENT_PLUGIN)
        .with_arg(Value::Object(variables))
}

pub fn hot_module_replacement_plugin() -> PluginDescriptor {
    PluginDescriptor::new("HotModuleReplacementPlugin", HOT_MODULE_REPLACEMENT_PLUGIN)
}

pub fn css_extract_plugin() -> PluginDescriptor {
    PluginDescriptor::new("MiniCssExtractPlugin", CSS_EXTRACT_PLUGIN).with_arg(json!({
        "filename": "static/css/[name].[contenthash:8].css",
        "chunkFilename": "static/css/[name].[contenthash:8].chunk.css",
    }))
}

pub fn build_notifier_plugin() -> PluginDescriptor {
    PluginDescriptor::new("WebpackBuildNotifier", BUILD_NOTIFIER_PLUGIN)
        .with_arg(json!({ "suppressSuccess": "initial" }))
}

/// Progress reporter. Messages are declared as data since the tree carries no
/// functions; [`progress_message`] gives the same text on the Rust side.
pub fn progress_plugin() -> PluginDescriptor {
    PluginDescriptor::new("NyanProgressPlugin", PROGRESS_PLUGIN).with_arg(json!({
        "nyanCatSays": {
            "done": DONE_MESSAGE,
            "progress": "percent",
        }
    }))
}

pub fn friendly_errors_plugin() -> PluginDescriptor {
    PluginDescriptor::new("FriendlyErrorsPlugin", FRIENDLY_ERRORS_PLUGIN)
        .with_arg(json!({ "clearConsole": false }))
}

const DONE_MESSAGE: &str = "done for you!";

/// Text shown by the progress reporter for a completion ratio in `0.0..=1.0`.
pub fn progress_message(progress: f64) -> String {
    if progress >= 1.0 {
        DONE_MESSAGE.to_string()
    } else {
        format!("{}%", (progress * 100.0).round() as i64)
    }
}
