//! Values injected into the bundle through the environment plugins.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;
use crate::record::{Record, flatten};

/// Encode every value as a JSON source string, keeping key order.
///
/// Injection plugins substitute values textually, so `"production"` must be
/// handed over as `"\"production\""`.
pub fn stringified<V: Serialize + Clone>(record: &IndexMap<String, V>) -> Result<Map<String, Value>> {
    let (keys, values) = flatten(record).into_parts();
    let encoded = values
        .iter()
        .map(|value| serde_json::to_string(value).map(Value::String))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|err| ConfigError::invalid_value("environment", err))?;

    Ok(keys.into_iter().zip(encoded).collect())
}

/// Client environment with `NODE_ENV` pinned to `mode` and listed first.
pub fn client_env(mode: BuildMode, vars: &IndexMap<String, String>) -> Record<String> {
    let mut env = Record::with_capacity(vars.len() + 1);
    env.insert(BuildMode::ENV_VAR.to_string(), mode.as_str().to_string());

    for (key, value) in vars {
        if key == BuildMode::ENV_VAR {
            if value != mode.as_str() {
                tracing::debug!(configured = %value, %mode, "NODE_ENV overridden by build mode");
            }
            continue;
        }
        env.insert(key.clone(), value.clone());
    }
    env
}
