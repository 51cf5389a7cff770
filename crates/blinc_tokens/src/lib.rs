//! Blinc Design Token Compiler
//!
//! Resolves, merges, and emits a design-token configuration into CSS custom
//! properties, SCSS variables, JSON or TypeScript data modules, and a
//! utility-framework theme extension, and compiles component style
//! definitions into pseudo-state-aware rules.
//!
//! # Pipeline
//!
//! ```text
//! raw document ─ validate ─▶ TokenConfig ─ merge (optional) ─▶ TokenConfig
//!                                 │
//!                   Resolver (strict | lenient)
//!                     │                     │
//!              StyleCompiler          ResolvedTheme per mode
//!                     │                     │
//!               CompiledRule      css / scss / json / ts / tailwind
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use blinc_tokens::{resolve, validate, ResolvePolicy};
//!
//! let config = validate(&raw).map_err(blinc_tokens::TokenError::Validation)?;
//! let text = resolve("semantic.text.primary", &config, "dark", ResolvePolicy::Strict)?;
//! ```
//!
//! # Modes
//!
//! [`ModeRegistry`] is the catalog of concrete modes (`light`, `dark`,
//! `elevated-dark`) with their root classes and effect flags.
//! [`ModeController`] applies one of them at a time to a [`StyleSink`].

pub mod catalog;
pub mod config;
pub mod controller;
pub mod emit;
pub mod error;
pub mod export;
pub mod merge;
pub mod mode;
pub mod resolve;
pub mod style;
pub mod tokens;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use catalog::{create_theme, list_themes, ThemeSummary};
pub use config::{ThemeSection, TokenConfig, TokensSection};
pub use controller::{
    ControllerConfig, FixedScheme, MemorySink, ModeController, ModeState, SchemeProbe, StyleSink,
};
pub use emit::{Emitter, Format, ResolvedTheme};
pub use error::{Result, TokenError, ValidationError};
pub use export::{export, Artifact, ExportReport, ExportRequest, JobFailure, ModeSelector};
pub use merge::{deep_merge, merge};
pub use mode::{ColorScheme, Effect, EffectFlags, ModeRegistry, ThemeModeConfig, SYSTEM_MODE};
pub use resolve::{css_variable, resolve, ResolvePolicy, Resolver, TokenPath};
pub use style::{
    compile, CompiledRule, ComponentSelection, ComponentStyleDefinition, InteractionState,
    StyleCompiler, StyleNode, StyleObject,
};
pub use validate::validate;
