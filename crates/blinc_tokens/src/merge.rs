//! Deep merge for extending a base theme with overrides
//!
//! Objects merge key by key, recursively. Every other value in the overlay
//! (strings, numbers, booleans, null, arrays) replaces the base value
//! wholesale; arrays are never merged element-wise. Inputs are never mutated.
//!
//! Merging is not associative across scalar leaves in general: when two
//! overrides set the same leaf, the one applied last wins.

use serde_json::Value;
use tracing::debug;

use crate::config::TokenConfig;
use crate::error::{Result, TokenError};

/// Structurally merge `overlay` onto `base`, returning a new document
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                let next = match base.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Extend a config with a partial override document
///
/// The merged document is re-validated, so an override cannot break the
/// shape invariants of the base.
pub fn merge(base: &TokenConfig, overrides: &Value) -> Result<TokenConfig> {
    let merged = deep_merge(&base.to_value()?, overrides);
    let config = crate::validate(&merged).map_err(TokenError::Validation)?;
    debug!(
        "merged token config: {} theme(s), default `{}`",
        config.theme.themes.len(),
        config.theme.default
    );
    Ok(config)
}

impl TokenConfig {
    /// Shorthand for [`merge`]
    pub fn extend(&self, overrides: &Value) -> Result<TokenConfig> {
        merge(self, overrides)
    }
}
