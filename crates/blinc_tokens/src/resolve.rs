//! Dotted token reference resolution
//!
//! A reference such as `semantic.text.primary` or `effects.shadows.md` is split
//! on `.` and walked through the config. `colors` and `semantic` are looked up
//! in the requested mode's theme; every other first segment selects a
//! top-level namespace (`spacing`, `typography`, `effects`, `responsive`).
//!
//! Resolution is single-hop. A semantic role that aliases a scale step
//! (`colors.gray.900`) is followed once, and whatever the walk lands on is
//! returned as-is, even when it looks like another reference.
//!
//! # Policies
//!
//! - [`ResolvePolicy::Strict`]: an unresolved path is a [`TokenError::Resolution`]
//! - [`ResolvePolicy::Lenient`]: an unresolved path becomes
//!   `var(--<prefix>-<path-with-dashes>)`, deferring to a CSS custom property.
//!   A semantic role whose alias target is missing defers to the target's
//!   property (`var(--ds-colors-teal-900)`), never to its own.
//!
//! A path that lands on a group (`colors.gray`) is always a
//! [`TokenError::NonTerminalReference`], regardless of policy.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use tracing::trace;

use crate::config::TokenConfig;
use crate::error::{Result, TokenError};
use crate::tokens::{
    Breakpoint, ColorRef, ColorScale, EffectsSet, ResponsiveSection, SemanticValue, ThemeTokens,
    TokenValue, TypographyScale,
};

/// What to do with a reference that cannot be resolved
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResolvePolicy {
    /// Unresolved references are errors
    #[default]
    Strict,
    /// Unresolved references fall back to a CSS custom property
    Lenient,
}

impl ResolvePolicy {
    pub fn from_lenient(lenient: bool) -> Self {
        if lenient {
            ResolvePolicy::Lenient
        } else {
            ResolvePolicy::Strict
        }
    }
}

/// A dotted reference to a token (`semantic.interactive.primary`)
///
/// Parsing applies the reference grammar used by style values: two or more
/// non-empty segments of `[A-Za-z0-9_-]`, starting with a letter, no
/// whitespace. Numeric literals like `0.5` or `1.5rem` are not references.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenPath(String);

impl TokenPath {
    pub fn parse(text: &str) -> Option<Self> {
        let starts_with_letter = text.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_with_letter {
            return None;
        }
        let mut segments = 0;
        for segment in text.split('.') {
            let valid = !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return None;
            }
            segments += 1;
        }
        (segments >= 2).then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First segment (`semantic` in `semantic.text.primary`)
    pub fn namespace(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CSS custom property name for a token path (`--ds-colors-gray-900`)
pub fn css_variable(prefix: &str, path: &str) -> String {
    let dashed = path.replace('.', "-");
    if prefix.is_empty() {
        format!("--{dashed}")
    } else {
        format!("--{prefix}-{dashed}")
    }
}

/// Resolves references for one mode of one config snapshot
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    config: &'a TokenConfig,
    theme: &'a ThemeTokens,
    mode: &'a str,
    prefix: Cow<'a, str>,
    policy: ResolvePolicy,
}

impl<'a> Resolver<'a> {
    /// Create a resolver; fails if `mode` is not a theme of `config`
    pub fn new(config: &'a TokenConfig, mode: &'a str, policy: ResolvePolicy) -> Result<Self> {
        let theme = config.theme(mode)?;
        Ok(Self {
            config,
            theme,
            mode,
            prefix: Cow::Borrowed(config.prefix()),
            policy,
        })
    }

    /// Override the variable prefix used for lenient fallbacks
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Cow::Owned(prefix.into());
        self
    }

    pub fn mode(&self) -> &str {
        self.mode
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }

    pub fn config(&self) -> &'a TokenConfig {
        self.config
    }

    /// Resolve a dotted path to its literal value
    pub fn resolve(&self, path: &str) -> Result<String> {
        let segments: Vec<&str> = path.split('.').collect();
        match self.lookup(&segments) {
            Ok(value) => Ok(value.into_owned()),
            Err(Miss::NonTerminal) => Err(TokenError::NonTerminalReference {
                path: path.to_string(),
                mode: self.mode.to_string(),
            }),
            Err(Miss::Unresolved(reason)) => self.miss(path, segments[0], reason, path),
            Err(Miss::DanglingAlias { reason, target }) => {
                self.miss(path, segments[0], reason, &target)
            }
        }
    }

    /// Apply the policy to an unresolved `path`; lenient output defers to `fallback`
    fn miss(&self, path: &str, namespace: &str, reason: String, fallback: &str) -> Result<String> {
        match self.policy {
            ResolvePolicy::Strict => Err(TokenError::Resolution {
                path: path.to_string(),
                namespace: namespace.to_string(),
                mode: self.mode.to_string(),
                reason,
            }),
            ResolvePolicy::Lenient => {
                let fallback = format!("var({})", css_variable(&self.prefix, fallback));
                trace!("lenient fallback for `{}`: {}", path, fallback);
                Ok(fallback)
            }
        }
    }

    /// Resolve a parsed reference
    pub fn resolve_path(&self, path: &TokenPath) -> Result<String> {
        self.resolve(path.as_str())
    }

    fn lookup(&self, segments: &[&str]) -> std::result::Result<Cow<'a, str>, Miss> {
        let (first, rest) = segments
            .split_first()
            .ok_or_else(|| Miss::Unresolved("empty path".into()))?;

        let root: &'a dyn Branch = match *first {
            "colors" => &self.theme.colors,
            "semantic" => &self.theme.semantic,
            "spacing" => &self.config.spacing,
            "typography" => &self.config.typography,
            "effects" => &self.config.effects,
            "responsive" => &self.config.responsive,
            other => return Err(Miss::Unresolved(format!("unknown namespace `{other}`"))),
        };

        let mut node = Node::Branch(root);
        let mut walked = (*first).to_string();
        for segment in rest {
            node = match node {
                Node::Branch(branch) => branch.child(segment).ok_or_else(|| {
                    Miss::Unresolved(format!("no `{segment}` under `{walked}`"))
                })?,
                Node::Leaf(_) | Node::Alias(_) => {
                    return Err(Miss::Unresolved(format!(
                        "`{walked}` is a value, cannot descend into `{segment}`"
                    )))
                }
            };
            walked.push('.');
            walked.push_str(segment);
        }

        match node {
            Node::Leaf(value) => Ok(value),
            Node::Alias(alias) => self.theme.color(alias).map(Cow::Borrowed).ok_or_else(|| {
                Miss::DanglingAlias {
                    reason: format!("`{walked}` aliases missing color `{alias}`"),
                    target: alias.to_string(),
                }
            }),
            Node::Branch(_) => Err(Miss::NonTerminal),
        }
    }
}

/// Resolve a single path (convenience over [`Resolver`])
pub fn resolve(
    path: &str,
    config: &TokenConfig,
    mode: &str,
    policy: ResolvePolicy,
) -> Result<String> {
    Resolver::new(config, mode, policy)?.resolve(path)
}

enum Miss {
    Unresolved(String),
    /// A semantic alias whose scale step does not exist
    DanglingAlias { reason: String, target: String },
    NonTerminal,
}

/// A borrowed view of one position in the token tree
pub(crate) enum Node<'a> {
    Leaf(Cow<'a, str>),
    Alias(&'a ColorRef),
    Branch(&'a dyn Branch),
}

/// A token container that can be walked by key
pub(crate) trait Branch {
    fn child(&self, key: &str) -> Option<Node<'_>>;
}

trait AsNode {
    fn as_node(&self) -> Node<'_>;
}

impl<T: AsNode> Branch for IndexMap<String, T> {
    fn child(&self, key: &str) -> Option<Node<'_>> {
        self.get(key).map(AsNode::as_node)
    }
}

impl<T: AsNode> AsNode for IndexMap<String, T> {
    fn as_node(&self) -> Node<'_> {
        Node::Branch(self)
    }
}

impl AsNode for TokenValue {
    fn as_node(&self) -> Node<'_> {
        Node::Leaf(self.as_css())
    }
}

impl AsNode for SemanticValue {
    fn as_node(&self) -> Node<'_> {
        match self {
            SemanticValue::Literal(text) => Node::Leaf(Cow::Borrowed(text)),
            SemanticValue::Alias(alias) => Node::Alias(alias),
        }
    }
}

impl AsNode for ColorScale {
    fn as_node(&self) -> Node<'_> {
        Node::Branch(self)
    }
}

impl Branch for ColorScale {
    fn child(&self, key: &str) -> Option<Node<'_>> {
        self.get(key).map(|color| Node::Leaf(Cow::Borrowed(color)))
    }
}

impl Branch for TypographyScale {
    fn child(&self, key: &str) -> Option<Node<'_>> {
        self.scale(key).map(|scale| Node::Branch(scale))
    }
}

impl Branch for EffectsSet {
    fn child(&self, key: &str) -> Option<Node<'_>> {
        self.table(key).map(|table| Node::Branch(table))
    }
}

impl Branch for ResponsiveSection {
    fn child(&self, key: &str) -> Option<Node<'_>> {
        (key == "breakpoints").then(|| Node::Branch(&self.breakpoints))
    }
}

impl AsNode for Breakpoint {
    fn as_node(&self) -> Node<'_> {
        Node::Branch(self)
    }
}

impl Branch for Breakpoint {
    fn child(&self, key: &str) -> Option<Node<'_>> {
        match key {
            "min" => Some(Node::Leaf(Cow::Borrowed(&self.min))),
            "max" => self.max.as_deref().map(|max| Node::Leaf(Cow::Borrowed(max))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_config;
    use serde_json::json;

    #[test]
    fn semantic_alias_resolves_through_mode_scale() {
        let config = sample_config();
        assert_eq!(
            resolve("semantic.text.primary", &config, "light", ResolvePolicy::Strict).unwrap(),
            "#111827"
        );
        assert_eq!(
            resolve("semantic.text.primary", &config, "dark", ResolvePolicy::Strict).unwrap(),
            "#f3f4f6"
        );
    }

    #[test]
    fn literal_paths_return_stored_values() {
        let config = sample_config();
        let resolver = Resolver::new(&config, "light", ResolvePolicy::Strict).unwrap();
        for (path, expected) in [
            ("colors.blue.600", "#2563eb"),
            ("semantic.background.primary", "#ffffff"),
            ("spacing.4", "1rem"),
            ("typography.fontSize.sm", "0.875rem"),
            ("typography.fontWeight.semibold", "600"),
            ("typography.fontFamily.mono", "\"JetBrains Mono\", monospace"),
            ("effects.borderRadius.full", "9999px"),
            ("effects.opacity.disabled", "0.5"),
            ("responsive.breakpoints.sm.min", "640px"),
            ("responsive.breakpoints.lg.max", "1279px"),
        ] {
            assert_eq!(resolver.resolve(path).unwrap(), expected, "{path}");
            assert_eq!(resolver.resolve(path).unwrap(), expected, "{path} (repeat)");
        }
    }

    #[test]
    fn strict_policy_rejects_unknown_paths() {
        let config = sample_config();
        let err = resolve("colors.doesNotExist", &config, "light", ResolvePolicy::Strict)
            .unwrap_err();
        match err {
            TokenError::Resolution {
                path,
                namespace,
                mode,
                reason,
            } => {
                assert_eq!(path, "colors.doesNotExist");
                assert_eq!(namespace, "colors");
                assert_eq!(mode, "light");
                assert_eq!(reason, "no `doesNotExist` under `colors`");
            }
            other => panic!("expected a resolution error, got {other:?}"),
        }
    }

    #[test]
    fn lenient_policy_synthesizes_custom_property() {
        let config = sample_config();
        let resolver = Resolver::new(&config, "light", ResolvePolicy::Lenient)
            .unwrap()
            .with_prefix("prefix");
        assert_eq!(
            resolver.resolve("colors.doesNotExist").unwrap(),
            "var(--prefix-colors-doesNotExist)"
        );
        assert_eq!(
            resolver.resolve("motion.duration.fast").unwrap(),
            "var(--prefix-motion-duration-fast)"
        );
    }

    #[test]
    fn groups_are_non_terminal_under_both_policies() {
        let config = sample_config();
        for policy in [ResolvePolicy::Strict, ResolvePolicy::Lenient] {
            let err = resolve("colors.gray", &config, "light", policy).unwrap_err();
            assert!(
                matches!(err, TokenError::NonTerminalReference { ref path, .. } if path == "colors.gray"),
                "{policy:?}: {err:?}"
            );
        }
        assert!(matches!(
            resolve("effects.shadows", &config, "light", ResolvePolicy::Strict),
            Err(TokenError::NonTerminalReference { .. })
        ));
    }

    #[test]
    fn cannot_descend_through_a_literal() {
        let config = sample_config();
        let err = resolve("spacing.4.half", &config, "light", ResolvePolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("`spacing.4` is a value"), "{err}");
    }

    #[test]
    fn resolution_is_single_hop() {
        let config = sample_config()
            .extend(&json!({
                "theme": { "themes": { "light": { "colors": { "gray": { "900": "colors.blue.600" } } } } },
                "spacing": { "gutter": "spacing.4" }
            }))
            .unwrap();
        let resolver = Resolver::new(&config, "light", ResolvePolicy::Strict).unwrap();
        assert_eq!(resolver.resolve("semantic.text.primary").unwrap(), "colors.blue.600");
        assert_eq!(resolver.resolve("spacing.gutter").unwrap(), "spacing.4");
    }

    #[test]
    fn dangling_alias_is_unresolved() {
        let config = sample_config()
            .extend(&json!({
                "theme": { "themes": {
                    "light": { "semantic": { "text": { "primary": "colors.teal.500" } } }
                } }
            }))
            .unwrap();
        let strict = resolve("semantic.text.primary", &config, "light", ResolvePolicy::Strict);
        assert!(matches!(strict, Err(TokenError::Resolution { .. })));
        let lenient =
            resolve("semantic.text.primary", &config, "light", ResolvePolicy::Lenient).unwrap();
        assert_eq!(lenient, "var(--ds-colors-teal-500)");
    }

    #[test]
    fn unknown_mode_is_reported() {
        let config = sample_config();
        assert!(matches!(
            resolve("spacing.4", &config, "sepia", ResolvePolicy::Lenient),
            Err(TokenError::UnknownMode(mode)) if mode == "sepia"
        ));
    }

    #[test]
    fn reference_grammar_excludes_literals() {
        for text in ["semantic.text.primary", "colors.blue.600", "effects.borderRadius.md"] {
            assert!(TokenPath::parse(text).is_some(), "{text}");
        }
        for text in ["0.5", "1.5rem", "#fff", "solid", "1px solid", "var(--x.y)", "a..b", "."] {
            assert!(TokenPath::parse(text).is_none(), "{text}");
        }
        assert_eq!(
            TokenPath::parse("semantic.text.primary").unwrap().namespace(),
            "semantic"
        );
    }
}
