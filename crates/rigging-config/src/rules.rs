//! Module rules of the `oneOf` list.
//!
//! The build tool picks the first matching rule, so the order here matters:
//! images, scripts, styles, then the file fallback catching everything else.

use std::path::Path;

use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::loaders::StyleRules;
use crate::mode::BuildMode;
use crate::pattern::Pattern;

pub const URL_LOADER: &str = "url-loader";
pub const BABEL_LOADER: &str = "babel-loader";
pub const FILE_LOADER: &str = "file-loader";

/// Files below this size (bytes) are inlined as data URLs.
pub const INLINE_LIMIT: u64 = 10_000;

pub const MEDIA_NAME: &str = "static/media/[name].[hash:8].[ext]";

const IMAGE_SOURCES: [&str; 4] = [r"\.bmp$", r"\.gif$", r"\.jpe?g$", r"\.png$"];
const SCRIPT_SOURCE: &str = r"\.(js|mjs|jsx|ts|tsx)$";
const FALLBACK_EXCLUDES: [&str; 3] = [SCRIPT_SOURCE, r"\.html$", r"\.json$"];

fn patterns(sources: &[&str]) -> Result<Vec<Pattern>> {
    sources.iter().map(|source| Pattern::new(source)).collect()
}

pub fn image_rule() -> Result<Value> {
    Ok(json!({
        "test": patterns(&IMAGE_SOURCES)?,
        "loader": URL_LOADER,
        "options": {
            "limit": INLINE_LIMIT,
            "name": MEDIA_NAME,
        },
    }))
}

/// Script rule, restricted to the application sources.
pub fn babel_rule(app_src: &Path, babel_options: &Value) -> Result<Value> {
    Ok(json!({
        "test": Pattern::new(SCRIPT_SOURCE)?,
        "include": [app_src.to_string_lossy()],
        "loader": BABEL_LOADER,
        "options": babel_options,
    }))
}

pub fn file_fallback_rule() -> Result<Value> {
    Ok(json!({
        "loader": FILE_LOADER,
        "exclude": patterns(&FALLBACK_EXCLUDES)?,
        "options": {
            "name": MEDIA_NAME,
        },
    }))
}

/// The full `oneOf` map in match order.
pub fn one_of(
    mode: BuildMode,
    styles: &StyleRules,
    app_src: &Path,
    babel_options: &Value,
) -> Result<Value> {
    let mut rules = Map::new();
    rules.insert("image".into(), image_rule()?);
    rules.insert("babel".into(), babel_rule(app_src, babel_options)?);
    for rule in styles.iter() {
        rules.insert(rule.category().rule_name().into(), rule.to_value(mode));
    }
    rules.insert("fileCallBack".into(), file_fallback_rule()?);
    Ok(Value::Object(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_puts_fallback_last() {
        let styles = StyleRules::new().unwrap();
        let rules = one_of(
            BuildMode::Development,
            &styles,
            Path::new("src"),
            &json!({}),
        )
        .unwrap();

        let names: Vec<_> = rules.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            names,
            [
                "image",
                "babel",
                "css",
                "cssModule",
                "sass",
                "sassModule",
                "less",
                "lessModule",
                "fileCallBack"
            ]
        );
    }

    #[test]
    fn image_rule_inlines_small_files() {
        let rule = image_rule().unwrap();
        assert_eq!(rule["options"]["limit"], json!(10_000));
        assert_eq!(rule["test"].as_array().unwrap().len(), 4);
        assert_eq!(rule["test"][2], json!(r"/\.jpe?g$/"));
    }

    #[test]
    fn babel_rule_includes_app_sources() {
        let rule = babel_rule(Path::new("/app/src"), &json!({"cacheDirectory": true})).unwrap();
        assert_eq!(rule["include"], json!(["/app/src"]));
        assert_eq!(rule["options"]["cacheDirectory"], json!(true));
    }

    #[test]
    fn fallback_excludes_scripts_html_and_json() {
        let rule = file_fallback_rule().unwrap();
        assert_eq!(
            rule["exclude"],
            json!([r"/\.(js|mjs|jsx|ts|tsx)$/", r"/\.html$/", r"/\.json$/"])
        );
    }
}
