//! Token configuration model
//!
//! A [`TokenConfig`] is the typed form of a token document:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "theme": { "default": "light", "themes": { "light": { "colors": {}, "semantic": {} } } },
//!   "typography": {}, "spacing": {}, "effects": {},
//!   "responsive": { "breakpoints": {} },
//!   "tokens": { "prefix": "ds", "output": "dist/tokens", "formats": ["css"] }
//! }
//! ```
//!
//! Build one with [`crate::validate`] (or [`TokenConfig::from_value`]), which
//! reports every structural problem at once. A config is immutable for a
//! compilation run; extending it with [`crate::merge`] produces a new value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};
use crate::tokens::{EffectsSet, Extra, ResponsiveSection, ThemeTokens, TokenMap, TypographyScale};

/// Root of a token document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub theme: ThemeSection,
    #[serde(default)]
    pub typography: TypographyScale,
    #[serde(default)]
    pub spacing: TokenMap,
    #[serde(default)]
    pub effects: EffectsSet,
    #[serde(default)]
    pub responsive: ResponsiveSection,
    pub tokens: TokensSection,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Named theme modes and the default among them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeSection {
    pub default: String,
    pub themes: IndexMap<String, ThemeTokens>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Output settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokensSection {
    /// Variable prefix (`ds` → `--ds-colors-gray-50`)
    pub prefix: String,
    /// Output directory for generated artifacts
    pub output: String,
    /// Formats generated when none are requested explicitly
    #[serde(default)]
    pub formats: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl TokenConfig {
    /// Validate a raw document and build the typed config
    pub fn from_value(raw: &serde_json::Value) -> Result<Self> {
        crate::validate::validate(raw).map_err(TokenError::Validation)
    }

    /// Snapshot as a plain JSON document
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Tokens for a named mode
    pub fn theme(&self, mode: &str) -> Result<&ThemeTokens> {
        self.theme
            .themes
            .get(mode)
            .ok_or_else(|| TokenError::UnknownMode(mode.to_string()))
    }

    /// Mode names in declaration order
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.theme.themes.keys().map(String::as_str)
    }

    pub fn default_mode(&self) -> &str {
        &self.theme.default
    }

    pub fn prefix(&self) -> &str {
        &self.tokens.prefix
    }
}
