//! Token compiler error types

use std::fmt;

use thiserror::Error;

/// A single structural problem found while validating a token configuration.
///
/// Validation collects every problem in one pass, so callers usually receive
/// these as a list inside [`TokenError::Validation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted location of the problem (`tokens.prefix`, `theme.themes.dark.colors.gray`)
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Errors produced by the token compiler
#[derive(Error, Debug)]
pub enum TokenError {
    /// The configuration failed structural validation
    #[error("invalid token configuration ({} problem(s)): {}", .0.len(), join_problems(.0))]
    Validation(Vec<ValidationError>),

    /// A reference could not be resolved (strict policy only)
    #[error("cannot resolve `{path}` in mode `{mode}` ({namespace}): {reason}")]
    Resolution {
        path: String,
        namespace: String,
        mode: String,
        reason: String,
    },

    /// A reference landed on a group of tokens instead of a single value
    #[error("`{path}` in mode `{mode}` names a token group, not a value")]
    NonTerminalReference { path: String, mode: String },

    /// The requested theme mode does not exist
    #[error("unknown theme mode `{0}`")]
    UnknownMode(String),

    /// The requested output format is not supported
    #[error("unsupported output format `{0}`")]
    UnsupportedFormat(String),

    /// A theme with this name already exists
    #[error("theme `{0}` already exists")]
    DuplicateTheme(String),

    /// An export job stopped without producing a result
    #[error("export job aborted: {0}")]
    JobAborted(String),

    /// Serializing an artifact or config snapshot failed
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TokenError {
    /// Validation problems carried by this error, if any
    pub fn problems(&self) -> &[ValidationError] {
        match self {
            TokenError::Validation(problems) => problems,
            _ => &[],
        }
    }
}

fn join_problems(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for token compiler operations
pub type Result<T> = std::result::Result<T, TokenError>;
