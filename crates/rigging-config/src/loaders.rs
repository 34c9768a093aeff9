//! Ordered loader chains for style rules.
//!
//! A chain is applied by the build tool in the order it is declared, so the
//! order produced here is part of the output contract:
//!
//! ```text
//! mode loader (inject | extract) → css-loader → pre-loaders...
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::Result;
use crate::mode::BuildMode;
use crate::pattern::Pattern;

pub const STYLE_LOADER: &str = "style-loader";
pub const EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";
pub const CSS_LOADER: &str = "css-loader";
pub const SASS_LOADER: &str = "sass-loader";
pub const LESS_LOADER: &str = "less-loader";

/// A single loader reference with optional options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderDescriptor {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderDescriptor {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

/// Named loaders in application order.
///
/// Serializes as an object keyed by loader name, in chain order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoaderChain {
    entries: Vec<(String, LoaderDescriptor)>,
}

impl LoaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a loader. Re-using a name replaces that entry in place.
    pub fn push(&mut self, name: impl Into<String>, descriptor: LoaderDescriptor) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = descriptor,
            None => self.entries.push((name, descriptor)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, descriptor: LoaderDescriptor) -> Self {
        self.push(name, descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn loaders(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, d)| d.loader.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&LoaderDescriptor> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, descriptor)| descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LoaderDescriptor)> {
        self.entries.iter().map(|(name, d)| (name.as_str(), d))
    }
}

impl Serialize for LoaderChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, descriptor) in &self.entries {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

/// The loader that hands compiled CSS to the page for `mode`.
///
/// Development injects styles at runtime for live reload; production extracts
/// them into files.
pub fn mode_loader(mode: BuildMode) -> (&'static str, LoaderDescriptor) {
    match mode {
        BuildMode::Development => ("styleLoader", LoaderDescriptor::new(STYLE_LOADER)),
        BuildMode::Production => (
            "extractCss",
            LoaderDescriptor::new(EXTRACT_LOADER).with_options(json!({})),
        ),
    }
}

/// Compose a style loader chain: mode loader, `css-loader`, then pre-loaders.
pub fn style_loaders<I, N>(mode: BuildMode, css_options: Value, pre_loaders: I) -> LoaderChain
where
    I: IntoIterator<Item = (N, LoaderDescriptor)>,
    N: Into<String>,
{
    let (name, descriptor) = mode_loader(mode);
    let mut chain = LoaderChain::new()
        .with(name, descriptor)
        .with("cssLoader", LoaderDescriptor::new(CSS_LOADER).with_options(css_options));
    for (name, descriptor) in pre_loaders {
        chain.push(name, descriptor);
    }
    chain
}

/// File-type categories handled by style rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    Css,
    CssModule,
    Sass,
    SassModule,
    Less,
    LessModule,
}

impl StyleCategory {
    /// Declaration order of the rules in the generated tree.
    pub const ALL: [StyleCategory; 6] = [
        StyleCategory::Css,
        StyleCategory::CssModule,
        StyleCategory::Sass,
        StyleCategory::SassModule,
        StyleCategory::Less,
        StyleCategory::LessModule,
    ];

    pub fn rule_name(self) -> &'static str {
        match self {
            StyleCategory::Css => "css",
            StyleCategory::CssModule => "cssModule",
            StyleCategory::Sass => "sass",
            StyleCategory::SassModule => "sassModule",
            StyleCategory::Less => "less",
            StyleCategory::LessModule => "lessModule",
        }
    }

    pub fn test_source(self) -> &'static str {
        match self {
            StyleCategory::Css => r"\.css$",
            StyleCategory::CssModule => r"\.module\.css$",
            StyleCategory::Sass => r"\.(scss|sass)$",
            StyleCategory::SassModule => r"\.module\.(scss|sass)$",
            StyleCategory::Less => r"\.less$",
            StyleCategory::LessModule => r"\.module\.less$",
        }
    }

    /// Plain categories exclude their module variant.
    pub fn exclude_source(self) -> Option<&'static str> {
        match self {
            StyleCategory::Css => Some(StyleCategory::CssModule.test_source()),
            StyleCategory::Sass => Some(StyleCategory::SassModule.test_source()),
            StyleCategory::Less => Some(StyleCategory::LessModule.test_source()),
            _ => None,
        }
    }

    pub fn is_module(self) -> bool {
        matches!(
            self,
            StyleCategory::CssModule | StyleCategory::SassModule | StyleCategory::LessModule
        )
    }

    pub fn side_effects(self) -> bool {
        !matches!(self, StyleCategory::CssModule | StyleCategory::LessModule)
    }

    pub fn pre_loaders(self) -> Vec<(&'static str, LoaderDescriptor)> {
        match self {
            StyleCategory::Css | StyleCategory::CssModule => Vec::new(),
            StyleCategory::Sass | StyleCategory::SassModule => {
                vec![("sassLoader", LoaderDescriptor::new(SASS_LOADER))]
            }
            StyleCategory::Less | StyleCategory::LessModule => {
                vec![("lessLoader", LoaderDescriptor::new(LESS_LOADER))]
            }
        }
    }

    /// Options for `css-loader`. Source maps follow production builds.
    pub fn css_options(self, mode: BuildMode) -> Value {
        let mut options = serde_json::Map::new();
        if self == StyleCategory::CssModule {
            options.insert("importLoaders".into(), json!(1));
        }
        options.insert("sourceMap".into(), json!(mode.is_prod()));
        if self.is_module() {
            options.insert("modules".into(), json!(true));
        }
        Value::Object(options)
    }

    pub fn chain(self, mode: BuildMode) -> LoaderChain {
        style_loaders(mode, self.css_options(mode), self.pre_loaders())
    }
}

/// A compiled style rule: patterns plus the category they route to.
#[derive(Debug, Clone)]
pub struct StyleRule {
    category: StyleCategory,
    test: Pattern,
    exclude: Option<Pattern>,
}

impl StyleRule {
    pub fn new(category: StyleCategory) -> Result<Self> {
        Ok(Self {
            category,
            test: Pattern::new(category.test_source())?,
            exclude: category.exclude_source().map(Pattern::new).transpose()?,
        })
    }

    pub fn category(&self) -> StyleCategory {
        self.category
    }

    pub fn matches(&self, path: &str) -> bool {
        self.test.is_match(path) && !self.exclude.as_ref().is_some_and(|p| p.is_match(path))
    }

    /// Rule object for the build tool's `oneOf` list.
    pub fn to_value(&self, mode: BuildMode) -> Value {
        let mut rule = serde_json::Map::new();
        rule.insert("test".into(), json!(self.test));
        if let Some(exclude) = &self.exclude {
            rule.insert("exclude".into(), json!([exclude]));
        }
        rule.insert("use".into(), json!(self.category.chain(mode)));
        if self.category.side_effects() {
            rule.insert("sideEffects".into(), json!(true));
        }
        Value::Object(rule)
    }
}

/// All style rules, compiled once.
#[derive(Debug, Clone)]
pub struct StyleRules {
    rules: Vec<StyleRule>,
}

impl StyleRules {
    pub fn new() -> Result<Self> {
        let rules = StyleCategory::ALL
            .into_iter()
            .map(StyleRule::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// The category a file is routed to, if any.
    pub fn classify(&self, path: &str) -> Option<StyleCategory> {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(StyleRule::category)
    }
}
