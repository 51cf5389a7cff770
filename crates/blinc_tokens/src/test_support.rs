//! Shared fixtures for unit tests

use serde_json::Value;

use crate::config::TokenConfig;

pub(crate) const SAMPLE_TOKENS: &str = include_str!("../tests/fixtures/tokens.json");

pub(crate) fn sample_raw() -> Value {
    serde_json::from_str(SAMPLE_TOKENS).expect("fixture is valid JSON")
}

pub(crate) fn sample_config() -> TokenConfig {
    crate::validate(&sample_raw()).expect("fixture is a valid token config")
}
