//! Typography tokens

use serde::{Deserialize, Serialize};

use super::value::{Extra, TokenMap, TokenValue};

/// Font families, sizes, weights, line heights, and letter spacing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyScale {
    #[serde(default)]
    pub font_family: TokenMap,
    #[serde(default)]
    pub font_size: TokenMap,
    #[serde(default)]
    pub font_weight: TokenMap,
    #[serde(default)]
    pub line_height: TokenMap,
    #[serde(default)]
    pub letter_spacing: TokenMap,
    #[serde(flatten)]
    pub extra: Extra,
}

impl TypographyScale {
    /// Line height declared for a font size of the same name
    pub fn line_height_for(&self, size: &str) -> Option<&TokenValue> {
        self.line_height.get(size)
    }

    /// Look up a sub-scale by its config key
    pub fn scale(&self, key: &str) -> Option<&TokenMap> {
        match key {
            "fontFamily" => Some(&self.font_family),
            "fontSize" => Some(&self.font_size),
            "fontWeight" => Some(&self.font_weight),
            "lineHeight" => Some(&self.line_height),
            "letterSpacing" => Some(&self.letter_spacing),
            _ => None,
        }
    }
}
