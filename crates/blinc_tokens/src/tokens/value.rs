//! Terminal token values

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unknown keys preserved verbatim so configs round-trip without loss
pub type Extra = IndexMap<String, serde_json::Value>;

/// Flat map from token name to terminal value (spacing, radii, shadows, ...)
pub type TokenMap = IndexMap<String, TokenValue>;

/// A terminal design value
///
/// Leaves never chain to other tokens. Lists are font stacks and render as a
/// comma-separated CSS list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl TokenValue {
    /// Render the value the way it appears in CSS
    pub fn as_css(&self) -> Cow<'_, str> {
        match self {
            TokenValue::Text(text) => Cow::Borrowed(text),
            TokenValue::Number(number) => Cow::Owned(number.to_string()),
            TokenValue::List(items) => Cow::Owned(
                items
                    .iter()
                    .map(|item| quote_family(item))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<u32> for TokenValue {
    fn from(value: u32) -> Self {
        TokenValue::Number(value.into())
    }
}

/// Quote a font family name when it contains whitespace
fn quote_family(name: &str) -> Cow<'_, str> {
    let already_quoted = (name.starts_with('"') && name.ends_with('"'))
        || (name.starts_with('\'') && name.ends_with('\''));
    if !already_quoted && name.chars().any(char::is_whitespace) {
        Cow::Owned(format!("\"{name}\""))
    } else {
        Cow::Borrowed(name)
    }
}
