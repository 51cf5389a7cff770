//! Color tokens for theming
//!
//! Each theme mode owns a set of color scales (`gray`, `blue`, ...) and a
//! semantic layer (`text.primary`, `interactive.primary-hover`, ...) whose roles
//! are either literals or aliases into the same mode's scales.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::Extra;

/// Steps every color scale must define, lightest first
pub const COLOR_STEPS: [&str; 11] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
];

/// Fixed 11-step color scale
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScale {
    #[serde(rename = "50")]
    pub s50: String,
    #[serde(rename = "100")]
    pub s100: String,
    #[serde(rename = "200")]
    pub s200: String,
    #[serde(rename = "300")]
    pub s300: String,
    #[serde(rename = "400")]
    pub s400: String,
    #[serde(rename = "500")]
    pub s500: String,
    #[serde(rename = "600")]
    pub s600: String,
    #[serde(rename = "700")]
    pub s700: String,
    #[serde(rename = "800")]
    pub s800: String,
    #[serde(rename = "900")]
    pub s900: String,
    #[serde(rename = "950")]
    pub s950: String,
}

impl ColorScale {
    /// Get a color by its step key (`"50"` ... `"950"`)
    pub fn get(&self, step: &str) -> Option<&str> {
        let color = match step {
            "50" => &self.s50,
            "100" => &self.s100,
            "200" => &self.s200,
            "300" => &self.s300,
            "400" => &self.s400,
            "500" => &self.s500,
            "600" => &self.s600,
            "700" => &self.s700,
            "800" => &self.s800,
            "900" => &self.s900,
            "950" => &self.s950,
            _ => return None,
        };
        Some(color.as_str())
    }

    /// Iterate `(step, color)` pairs lightest first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        COLOR_STEPS
            .iter()
            .filter_map(move |step| self.get(step).map(|color| (*step, color)))
    }

    /// Build a scale from steps in [`COLOR_STEPS`] order
    pub fn from_steps(steps: [&str; 11]) -> Self {
        let [s50, s100, s200, s300, s400, s500, s600, s700, s800, s900, s950] =
            steps.map(str::to_string);
        Self {
            s50,
            s100,
            s200,
            s300,
            s400,
            s500,
            s600,
            s700,
            s800,
            s900,
            s950,
        }
    }
}

/// Alias from a semantic role into a color scale (`colors.<scale>.<step>`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorRef {
    pub scale: String,
    pub step: String,
}

impl ColorRef {
    /// Parse `colors.<scale>.<step>`; anything else is not an alias
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("colors"), Some(scale), Some(step), None)
                if !scale.is_empty() && !step.is_empty() =>
            {
                Some(Self {
                    scale: scale.to_string(),
                    step: step.to_string(),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "colors.{}.{}", self.scale, self.step)
    }
}

/// A semantic role value: a color literal or an alias into the scales
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SemanticValue {
    Literal(String),
    Alias(ColorRef),
}

impl From<String> for SemanticValue {
    fn from(text: String) -> Self {
        match ColorRef::parse(&text) {
            Some(alias) => SemanticValue::Alias(alias),
            None => SemanticValue::Literal(text),
        }
    }
}

impl From<&str> for SemanticValue {
    fn from(text: &str) -> Self {
        SemanticValue::from(text.to_string())
    }
}

impl From<SemanticValue> for String {
    fn from(value: SemanticValue) -> Self {
        match value {
            SemanticValue::Literal(text) => text,
            SemanticValue::Alias(alias) => alias.to_string(),
        }
    }
}

/// Role name → value within one semantic category
pub type SemanticCategory = IndexMap<String, SemanticValue>;

/// Category name → roles (`text`, `background`, `interactive`, ...)
pub type SemanticColorSet = IndexMap<String, SemanticCategory>;

/// Colors for a single theme mode
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeTokens {
    pub colors: IndexMap<String, ColorScale>,
    pub semantic: SemanticColorSet,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ThemeTokens {
    /// Look up a scale color by alias
    pub fn color(&self, alias: &ColorRef) -> Option<&str> {
        self.colors
            .get(&alias.scale)
            .and_then(|scale| scale.get(&alias.step))
    }
}
