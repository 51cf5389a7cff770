//! Effect tokens: shadows, radii, gradients, blur, and opacity

use serde::{Deserialize, Serialize};

use super::value::{Extra, TokenMap};

/// Complete set of effect tokens
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsSet {
    #[serde(default)]
    pub shadows: TokenMap,
    #[serde(default)]
    pub border_radius: TokenMap,
    #[serde(default)]
    pub gradients: TokenMap,
    #[serde(default)]
    pub blur: TokenMap,
    #[serde(default)]
    pub opacity: TokenMap,
    #[serde(flatten)]
    pub extra: Extra,
}

impl EffectsSet {
    /// Look up an effect table by its config key
    pub fn table(&self, key: &str) -> Option<&TokenMap> {
        match key {
            "shadows" => Some(&self.shadows),
            "borderRadius" => Some(&self.border_radius),
            "gradients" => Some(&self.gradients),
            "blur" => Some(&self.blur),
            "opacity" => Some(&self.opacity),
            _ => None,
        }
    }
}
