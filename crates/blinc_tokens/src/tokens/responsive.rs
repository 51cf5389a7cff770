//! Responsive breakpoints

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::Extra;

/// A viewport range; `min` drives utility-framework screens
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BreakpointRepr")]
pub struct Breakpoint {
    pub min: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl Breakpoint {
    pub fn min(min: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BreakpointRepr {
    Min(String),
    Range { min: String, max: Option<String> },
}

impl From<BreakpointRepr> for Breakpoint {
    fn from(repr: BreakpointRepr) -> Self {
        match repr {
            BreakpointRepr::Min(min) => Breakpoint { min, max: None },
            BreakpointRepr::Range { min, max } => Breakpoint { min, max },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveSection {
    #[serde(default)]
    pub breakpoints: IndexMap<String, Breakpoint>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_accept_shorthand_and_ranges() {
        let section: ResponsiveSection = serde_json::from_str(
            r#"{ "breakpoints": { "sm": "640px", "lg": { "min": "1024px", "max": "1279px" } } }"#,
        )
        .unwrap();
        assert_eq!(section.breakpoints["sm"], Breakpoint::min("640px"));
        assert_eq!(section.breakpoints["lg"].max.as_deref(), Some("1279px"));
    }
}
