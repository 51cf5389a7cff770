//! Listing and deriving themes of a loaded config
//!
//! Both operations work only on the config they are given; there is no
//! separate built-in theme table to fall back to.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::TokenConfig;
use crate::error::{Result, TokenError, ValidationError};
use crate::merge::{deep_merge, merge};
use crate::mode::{ModeRegistry, SYSTEM_MODE};

/// Overview of one configured theme
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeSummary {
    pub name: String,
    pub is_default: bool,
    /// Registered root class, if the mode is in the registry
    pub css_class: Option<String>,
    pub scales: usize,
    pub categories: usize,
    pub roles: usize,
}

/// Summaries of every theme, in config order
pub fn list_themes(config: &TokenConfig, registry: &ModeRegistry) -> Vec<ThemeSummary> {
    config
        .theme
        .themes
        .iter()
        .map(|(name, theme)| ThemeSummary {
            name: name.clone(),
            is_default: name == config.default_mode(),
            css_class: registry
                .class_name_for(name)
                .ok()
                .map(str::to_string),
            scales: theme.colors.len(),
            categories: theme.semantic.len(),
            roles: theme.semantic.values().map(|roles| roles.len()).sum(),
        })
        .collect()
}

/// Derive a new theme `name` from `base`, applying `overrides` to its tokens
///
/// `overrides` is a partial `{ colors, semantic }` document. The result is
/// a new config; the shape invariant is re-checked, so overrides may change
/// values but not add or drop scales and roles.
pub fn create_theme(
    config: &TokenConfig,
    name: &str,
    base: &str,
    overrides: &Value,
) -> Result<TokenConfig> {
    if name.trim().is_empty() || name == SYSTEM_MODE {
        return Err(TokenError::Validation(vec![ValidationError::new(
            "theme.themes",
            format!("`{name}` is not a usable theme name"),
        )]));
    }
    if config.theme.themes.contains_key(name) {
        return Err(TokenError::DuplicateTheme(name.to_string()));
    }

    let base_tokens = serde_json::to_value(config.theme(base)?)?;
    let tokens = deep_merge(&base_tokens, overrides);
    debug!("creating theme `{}` from `{}`", name, base);
    merge(config, &json!({ "theme": { "themes": { name: tokens } } }))
}
