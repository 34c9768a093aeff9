//! Structural merge of configuration trees and mode-gated fragments.
//!
//! Merge semantics:
//! - Objects: deep-merge by key (recursive)
//! - Arrays: replaced whole by the fragment
//! - Scalars and null: the fragment wins
//!
//! Keys already present in the base keep their position; keys introduced by a
//! fragment are appended in the fragment's order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;

/// Merge `overlay` atop `base` and return the result.
pub fn deep_merge(mut base: Value, overlay: Value) -> Value {
    merge_values(&mut base, overlay);
    base
}

/// Merge `fragment` atop `base` only when `condition` holds.
///
/// # Example
///
/// ```
/// use rigging_config::merge_if;
/// use serde_json::json;
///
/// let base = json!({"output": {"filename": "bundle.js"}});
/// let prod = json!({"output": {"filename": "[name].[contenthash:8].js"}});
///
/// assert_eq!(merge_if(false, base.clone(), prod.clone()), base);
/// assert_eq!(
///     merge_if(true, base, prod)["output"]["filename"],
///     "[name].[contenthash:8].js"
/// );
/// ```
pub fn merge_if(condition: bool, base: Value, fragment: Value) -> Value {
    if condition {
        deep_merge(base, fragment)
    } else {
        base
    }
}

fn merge_values(target: &mut Value, update: Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match target_map.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target_slot, update) => {
            *target_slot = update;
        }
    }
}

/// Predicate over [`BuildMode`] deciding whether a fragment applies.
///
/// In configuration files a guard is written as `"always"`, a mode name
/// (`"production"`), or a negated mode name (`"!production"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Guard {
    Always,
    Only(BuildMode),
    Unless(BuildMode),
}

impl Guard {
    pub fn allows(self, mode: BuildMode) -> bool {
        match self {
            Guard::Always => true,
            Guard::Only(only) => mode == only,
            Guard::Unless(excluded) => mode != excluded,
        }
    }
}

impl FromStr for Guard {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "always" {
            return Ok(Guard::Always);
        }
        match s.strip_prefix('!') {
            Some(excluded) => Ok(Guard::Unless(excluded.parse()?)),
            None => Ok(Guard::Only(s.parse()?)),
        }
    }
}

impl TryFrom<String> for Guard {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Guard> for String {
    fn from(guard: Guard) -> Self {
        guard.to_string()
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Always => f.write_str("always"),
            Guard::Only(mode) => write!(f, "{mode}"),
            Guard::Unless(mode) => write!(f, "!{mode}"),
        }
    }
}

/// A partial configuration tree merged only when its guard allows the mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    label: String,
    guard: Guard,
    tree: Value,
}

impl Fragment {
    pub fn new(label: impl Into<String>, guard: Guard, tree: Value) -> Self {
        Self {
            label: label.into(),
            guard,
            tree,
        }
    }

    pub fn always(label: impl Into<String>, tree: Value) -> Self {
        Self::new(label, Guard::Always, tree)
    }

    pub fn only(label: impl Into<String>, mode: BuildMode, tree: Value) -> Self {
        Self::new(label, Guard::Only(mode), tree)
    }

    pub fn unless(label: impl Into<String>, mode: BuildMode, tree: Value) -> Self {
        Self::new(label, Guard::Unless(mode), tree)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn guard(&self) -> Guard {
        self.guard
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn is_active(&self, mode: BuildMode) -> bool {
        self.guard.allows(mode)
    }

    /// Merge this fragment into `base` if its guard allows `mode`.
    pub fn apply(self, mode: BuildMode, base: Value) -> Value {
        let active = self.is_active(mode);
        tracing::debug!(fragment = %self.label, guard = %self.guard, active, "applying fragment");
        merge_if(active, base, self.tree)
    }
}

/// Fold fragments into `base` in declaration order.
pub fn apply_fragments(
    mode: BuildMode,
    base: Value,
    fragments: impl IntoIterator<Item = Fragment>,
) -> Value {
    fragments
        .into_iter()
        .fold(base, |tree, fragment| fragment.apply(mode, tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_without_key_loss() {
        let result = deep_merge(json!({"x": {"y": 1}}), json!({"x": {"z": 2}}));
        assert_eq!(result, json!({"x": {"y": 1, "z": 2}}));
    }

    #[test]
    fn fragment_scalars_override_base() {
        let result = deep_merge(json!({"devtool": "source-map"}), json!({"devtool": false}));
        assert_eq!(result["devtool"], json!(false));
    }

    #[test]
    fn arrays_are_replaced() {
        let result = deep_merge(json!({"entry": ["a", "b"]}), json!({"entry": ["c"]}));
        assert_eq!(result["entry"], json!(["c"]));
    }

    #[test]
    fn one_sided_keys_are_kept() {
        let result = deep_merge(json!({"a": 1}), json!({"b": {"c": 2}}));
        assert_eq!(result, json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn empty_fragment_is_a_no_op() {
        let base = json!({"a": {"b": [1, 2]}, "c": null});
        assert_eq!(deep_merge(base.clone(), json!({})), base);
    }

    #[test]
    fn base_order_is_kept_and_new_keys_append() {
        let result = deep_merge(
            json!({"first": 1, "second": 2}),
            json!({"third": 3, "first": 10}),
        );
        let keys: Vec<_> = result.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["first", "second", "third"]);
        assert_eq!(result["first"], 10);
    }

    #[test]
    fn merge_if_false_returns_base_unchanged() {
        let base = json!({"a": 1});
        assert_eq!(merge_if(false, base.clone(), json!({"a": 2})), base);
        assert_eq!(merge_if(true, base, json!({"a": 2})), json!({"a": 2}));
    }

    #[test]
    fn guards_select_modes() {
        use BuildMode::*;
        assert!(Guard::Always.allows(Development));
        assert!(Guard::Always.allows(Production));
        assert!(Guard::Only(Production).allows(Production));
        assert!(!Guard::Only(Production).allows(Development));
        assert!(Guard::Unless(Production).allows(Development));
        assert!(!Guard::Unless(Production).allows(Production));
    }

    #[test]
    fn guard_parses_from_config_strings() {
        assert_eq!("always".parse::<Guard>().unwrap(), Guard::Always);
        assert_eq!(
            "production".parse::<Guard>().unwrap(),
            Guard::Only(BuildMode::Production)
        );
        assert_eq!(
            "!development".parse::<Guard>().unwrap(),
            Guard::Unless(BuildMode::Development)
        );
        assert!(matches!(
            "staging".parse::<Guard>(),
            Err(ConfigError::UnknownMode(_))
        ));
    }

    #[test]
    fn guard_serde_uses_string_form() {
        let guard: Guard = serde_json::from_value(json!("!production")).unwrap();
        assert_eq!(guard, Guard::Unless(BuildMode::Production));
        assert_eq!(serde_json::to_value(guard).unwrap(), json!("!production"));
    }

    #[test]
    fn inactive_fragments_contribute_nothing() {
        let fragments = vec![
            Fragment::only("dev", BuildMode::Development, json!({"dev": true})),
            Fragment::only("prod", BuildMode::Production, json!({"prod": true})),
            Fragment::always("shared", json!({"shared": true})),
        ];

        let tree = apply_fragments(BuildMode::Production, json!({}), fragments);
        assert_eq!(tree, json!({"prod": true, "shared": true}));
    }
}
