//! Component style compilation
//!
//! A [`StyleObject`] is a small tree of property entries. Each entry is one of:
//!
//! - a literal (`"1px solid"`, `"0.5"`) passed through unchanged
//! - a token reference (`"semantic.interactive.primary"`) resolved for the
//!   target mode
//! - an interaction state block (`hover`, `focus`, `active`, `disabled`)
//!   compiled into a nested `&:<state>` rule
//! - an effect block (`@blur`, `@glow`, ...) merged in only when the target
//!   mode supports that effect
//! - any other nested object, flattened into dash-joined property names
//!   (`border: { width }` → `border-width`)
//!
//! ```json
//! {
//!   "backgroundColor": "semantic.interactive.primary",
//!   "hover": { "backgroundColor": "semantic.interactive.primary-hover" },
//!   "@shadows": { "boxShadow": "effects.shadows.md" }
//! }
//! ```
//!
//! Components combine a base object with variant, size, and state objects.
//! Selecting a name the definition does not declare falls back to its
//! `default` entry, or to nothing at all. A missing variant never fails.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};

use crate::config::TokenConfig;
use crate::error::Result;
use crate::mode::{Effect, ModeRegistry};
use crate::resolve::{ResolvePolicy, Resolver, TokenPath};

/// Interaction pseudo-states a style object can nest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// :hover pseudo-class
    Hover,
    /// :focus pseudo-class
    Focus,
    /// :active pseudo-class (pressed)
    Active,
    /// :disabled pseudo-class
    Disabled,
}

impl InteractionState {
    pub fn parse_state(s: &str) -> Option<Self> {
        match s {
            "hover" => Some(InteractionState::Hover),
            "focus" => Some(InteractionState::Focus),
            "active" => Some(InteractionState::Active),
            "disabled" => Some(InteractionState::Disabled),
            _ => None,
        }
    }

    /// Nested selector key (`&:hover`)
    pub fn selector(self) -> String {
        format!("&:{self}")
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionState::Hover => write!(f, "hover"),
            InteractionState::Focus => write!(f, "focus"),
            InteractionState::Active => write!(f, "active"),
            InteractionState::Disabled => write!(f, "disabled"),
        }
    }
}

/// One entry of a style object
#[derive(Clone, Debug, PartialEq)]
pub enum StyleNode {
    Literal(String),
    Reference(TokenPath),
    State(InteractionState, StyleObject),
    Effect(Effect, StyleObject),
    Group(StyleObject),
}

impl StyleNode {
    /// Classify a string value as a reference or a literal
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match TokenPath::parse(&text) {
            Some(path) => StyleNode::Reference(path),
            None => StyleNode::Literal(text),
        }
    }
}

/// Abstract style declarations for one component part
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct StyleObject {
    entries: IndexMap<String, StyleNode>,
}

impl StyleObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property from a literal or reference string
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .insert(property.into(), StyleNode::from_text(value));
        self
    }

    /// Nest a pseudo-state block
    pub fn state(mut self, state: InteractionState, style: StyleObject) -> Self {
        self.entries
            .insert(state.to_string(), StyleNode::State(state, style));
        self
    }

    /// Nest a block that only applies in modes supporting `effect`
    pub fn effect(mut self, effect: Effect, style: StyleObject) -> Self {
        self.entries
            .insert(format!("@{effect}"), StyleNode::Effect(effect, style));
        self
    }

    /// Nest a group whose properties are prefixed with `name`
    pub fn group(mut self, name: impl Into<String>, style: StyleObject) -> Self {
        self.entries.insert(name.into(), StyleNode::Group(style));
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleNode> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from a JSON object
    pub fn from_value(value: &Value) -> std::result::Result<Self, String> {
        let Value::Object(map) = value else {
            return Err("style object must be an object".to_string());
        };

        let mut entries = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            let node = match value {
                Value::Object(_) => {
                    let nested = Self::from_value(value).map_err(|err| format!("{key}: {err}"))?;
                    if let Some(effect) = key.strip_prefix('@') {
                        StyleNode::Effect(effect.parse()?, nested)
                    } else if let Some(state) = InteractionState::parse_state(key) {
                        StyleNode::State(state, nested)
                    } else {
                        StyleNode::Group(nested)
                    }
                }
                Value::String(text) => StyleNode::from_text(text.as_str()),
                Value::Number(number) => StyleNode::Literal(number.to_string()),
                Value::Bool(flag) => StyleNode::Literal(flag.to_string()),
                Value::Null | Value::Array(_) => {
                    return Err(format!("{key}: unsupported style value {value}"))
                }
            };
            entries.insert(key.clone(), node);
        }
        Ok(Self { entries })
    }
}

impl TryFrom<Value> for StyleObject {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

/// Concrete declarations plus nested pseudo-state rules
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompiledRule {
    /// Property → resolved value, in declaration order
    pub declarations: IndexMap<String, String>,
    /// Selector suffix (`&:hover`) → rule
    pub nested: IndexMap<String, CompiledRule>,
}

impl CompiledRule {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.nested.values().all(CompiledRule::is_empty)
    }

    /// Layer `other` on top of this rule; later values win per property
    pub fn merge(&mut self, other: CompiledRule) {
        self.declarations.extend(other.declarations);
        for (selector, rule) in other.nested {
            self.nested.entry(selector).or_default().merge(rule);
        }
    }

    /// Render as CSS text for `selector`
    ///
    /// Property names are converted to kebab-case; custom properties
    /// (`--ds-...`) are left as written.
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = String::new();
        self.write_css(selector, &mut css);
        css
    }

    fn write_css(&self, selector: &str, css: &mut String) {
        if !self.declarations.is_empty() {
            let _ = writeln!(css, "{selector} {{");
            for (property, value) in &self.declarations {
                let _ = writeln!(css, "  {}: {};", css_property(property), value);
            }
            css.push_str("}\n");
        }
        for (suffix, rule) in &self.nested {
            rule.write_css(&suffix.replace('&', selector), css);
        }
    }
}

fn css_property(name: &str) -> Cow<'_, str> {
    if name.starts_with("--") || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return Cow::Borrowed(name);
    }
    let mut kebab = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            kebab.push('-');
            kebab.push(c.to_ascii_lowercase());
        } else {
            kebab.push(c);
        }
    }
    Cow::Owned(kebab)
}

/// Base style plus named variants, sizes, and states of one component
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ComponentStyleDefinition {
    #[serde(default)]
    pub base: StyleObject,
    #[serde(default)]
    pub variants: IndexMap<String, StyleObject>,
    #[serde(default)]
    pub sizes: IndexMap<String, StyleObject>,
    #[serde(default)]
    pub states: IndexMap<String, StyleObject>,
}

impl ComponentStyleDefinition {
    pub fn variant(&self, name: Option<&str>) -> Cow<'_, StyleObject> {
        pick(&self.variants, name)
    }

    pub fn size(&self, name: Option<&str>) -> Cow<'_, StyleObject> {
        pick(&self.sizes, name)
    }

    pub fn state(&self, name: Option<&str>) -> Cow<'_, StyleObject> {
        pick(&self.states, name)
    }
}

fn pick<'a>(table: &'a IndexMap<String, StyleObject>, name: Option<&str>) -> Cow<'a, StyleObject> {
    let found = name.and_then(|name| table.get(name));
    if found.is_none() {
        if let Some(name) = name {
            trace!("no `{}` entry, falling back to `default`", name);
        }
    }
    match found.or_else(|| table.get("default")) {
        Some(style) => Cow::Borrowed(style),
        None => Cow::Owned(StyleObject::default()),
    }
}

/// Which variant, size, and state of a component to compile
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentSelection {
    pub variant: Option<String>,
    pub size: Option<String>,
    pub state: Option<String>,
}

impl ComponentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// Compiles style objects for one mode under one resolution policy
pub struct StyleCompiler<'a> {
    resolver: Resolver<'a>,
    registry: &'a ModeRegistry,
}

impl<'a> StyleCompiler<'a> {
    pub fn new(
        config: &'a TokenConfig,
        registry: &'a ModeRegistry,
        mode: &'a str,
        policy: ResolvePolicy,
    ) -> Result<Self> {
        Ok(Self {
            resolver: Resolver::new(config, mode, policy)?,
            registry,
        })
    }

    pub fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    /// Compile one style object into a rule
    pub fn compile(&self, style: &StyleObject) -> Result<CompiledRule> {
        let mut rule = CompiledRule::default();
        self.compile_into(style, None, &mut rule)?;
        Ok(rule)
    }

    /// Compile base → variant → size → state, later layers winning
    pub fn compile_component(
        &self,
        definition: &ComponentStyleDefinition,
        selection: &ComponentSelection,
    ) -> Result<CompiledRule> {
        let mut rule = self.compile(&definition.base)?;
        for layer in [
            definition.variant(selection.variant.as_deref()),
            definition.size(selection.size.as_deref()),
            definition.state(selection.state.as_deref()),
        ] {
            rule.merge(self.compile(&layer)?);
        }
        Ok(rule)
    }

    fn compile_into(
        &self,
        style: &StyleObject,
        group: Option<&str>,
        rule: &mut CompiledRule,
    ) -> Result<()> {
        for (key, node) in style.iter() {
            let property = || match group {
                Some(group) => format!("{group}-{key}"),
                None => key.to_string(),
            };
            match node {
                StyleNode::Literal(value) => {
                    rule.declarations.insert(property(), value.clone());
                }
                StyleNode::Reference(path) => {
                    let value = self.resolver.resolve_path(path)?;
                    rule.declarations.insert(property(), value);
                }
                StyleNode::State(state, nested) => {
                    let mut compiled = CompiledRule::default();
                    self.compile_into(nested, group, &mut compiled)?;
                    rule.nested.entry(state.selector()).or_default().merge(compiled);
                }
                StyleNode::Effect(effect, nested) => {
                    let mode = self.resolver.mode();
                    if self.registry.supports_effect(mode, *effect) {
                        self.compile_into(nested, group, rule)?;
                    } else {
                        warn!("mode `{}` does not support {}, dropping `{}` block", mode, effect, key);
                    }
                }
                StyleNode::Group(nested) => {
                    self.compile_into(nested, Some(&property()), rule)?;
                }
            }
        }
        Ok(())
    }
}

/// Compile a style object against the built-in mode catalog
pub fn compile(
    style: &StyleObject,
    config: &TokenConfig,
    mode: &str,
    policy: ResolvePolicy,
) -> Result<CompiledRule> {
    let registry = ModeRegistry::builtin();
    StyleCompiler::new(config, &registry, mode, policy)?.compile(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenError;
    use crate::test_support::sample_config;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn declarations(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn style(value: Value) -> StyleObject {
        StyleObject::from_value(&value).unwrap()
    }

    #[test]
    fn hover_block_compiles_to_nested_rule() {
        let config = sample_config();
        let button = style(json!({
            "backgroundColor": "semantic.interactive.primary",
            "hover": { "backgroundColor": "semantic.interactive.primary-hover" }
        }));

        let rule = compile(&button, &config, "light", ResolvePolicy::Strict).unwrap();
        assert_eq!(rule.declarations, declarations(&[("backgroundColor", "#2563eb")]));
        assert_eq!(rule.nested.len(), 1);
        assert_eq!(
            rule.nested["&:hover"].declarations,
            declarations(&[("backgroundColor", "#1d4ed8")])
        );

        let dark = compile(&button, &config, "dark", ResolvePolicy::Strict).unwrap();
        assert_eq!(dark.declarations["backgroundColor"], "#3b82f6");
        assert_eq!(dark.nested["&:hover"].declarations["backgroundColor"], "#2563eb");
    }

    #[test]
    fn literals_pass_through() {
        let config = sample_config();
        let rule = compile(
            &style(json!({ "opacity": "0.5", "border": "1px solid", "zIndex": 10, "lineHeight": "1.5rem" })),
            &config,
            "light",
            ResolvePolicy::Strict,
        )
        .unwrap();
        assert_eq!(
            rule.declarations,
            declarations(&[
                ("opacity", "0.5"),
                ("border", "1px solid"),
                ("zIndex", "10"),
                ("lineHeight", "1.5rem"),
            ])
        );
    }

    #[test]
    fn states_compose() {
        let config = sample_config();
        let input = style(json!({
            "focus": {
                "outlineColor": "semantic.border.default",
                "hover": { "outlineColor": "semantic.interactive.primary" }
            }
        }));
        let rule = compile(&input, &config, "light", ResolvePolicy::Strict).unwrap();
        let focus = &rule.nested["&:focus"];
        assert_eq!(focus.declarations["outlineColor"], "#e5e7eb");
        assert_eq!(focus.nested["&:hover"].declarations["outlineColor"], "#2563eb");
        assert_eq!(
            rule.to_css(".input"),
            ".input:focus {\n  outline-color: #e5e7eb;\n}\n.input:focus:hover {\n  outline-color: #2563eb;\n}\n"
        );
    }

    #[test]
    fn groups_flatten_into_dashed_properties() {
        let config = sample_config();
        let input = StyleObject::new().group(
            "border",
            StyleObject::new()
                .set("width", "1px")
                .set("color", "semantic.border.default"),
        );
        let rule = compile(&input, &config, "light", ResolvePolicy::Strict).unwrap();
        assert_eq!(
            rule.declarations,
            declarations(&[("border-width", "1px"), ("border-color", "#e5e7eb")])
        );
    }

    #[test]
    fn effect_blocks_follow_mode_support() {
        let config = sample_config();
        let card = StyleObject::new()
            .set("borderRadius", "effects.borderRadius.md")
            .effect(
                Effect::Glow,
                StyleObject::new().set("boxShadow", "effects.shadows.md"),
            );

        let light = compile(&card, &config, "light", ResolvePolicy::Strict).unwrap();
        assert_eq!(light.declarations, declarations(&[("borderRadius", "0.375rem")]));

        let dark = compile(&card, &config, "dark", ResolvePolicy::Strict).unwrap();
        assert_eq!(dark.declarations["boxShadow"], "0 4px 6px -1px rgb(0 0 0 / 0.1)");
    }

    #[test]
    fn unresolved_reference_follows_policy() {
        let config = sample_config();
        let input = StyleObject::new().set("color", "semantic.text.missing");
        assert!(matches!(
            compile(&input, &config, "light", ResolvePolicy::Strict),
            Err(TokenError::Resolution { .. })
        ));
        let rule = compile(&input, &config, "light", ResolvePolicy::Lenient).unwrap();
        assert_eq!(rule.declarations["color"], "var(--ds-semantic-text-missing)");
    }

    #[test]
    fn component_layers_merge_in_order() {
        let config = sample_config();
        let registry = ModeRegistry::builtin();
        let compiler = StyleCompiler::new(&config, &registry, "light", ResolvePolicy::Strict).unwrap();
        let button: ComponentStyleDefinition = serde_json::from_value(json!({
            "base": { "padding": "spacing.2", "color": "semantic.text.primary" },
            "variants": {
                "default": { "backgroundColor": "semantic.background.secondary" },
                "primary": {
                    "backgroundColor": "semantic.interactive.primary",
                    "color": "semantic.text.inverse",
                    "hover": { "backgroundColor": "semantic.interactive.primary-hover" }
                }
            },
            "sizes": { "lg": { "padding": "spacing.4" } },
            "states": { "disabled": { "opacity": "effects.opacity.disabled" } }
        }))
        .unwrap();

        let rule = compiler
            .compile_component(
                &button,
                &ComponentSelection::new().variant("primary").size("lg").state("disabled"),
            )
            .unwrap();
        assert_eq!(
            rule.declarations,
            declarations(&[
                ("padding", "1rem"),
                ("color", "#ffffff"),
                ("backgroundColor", "#2563eb"),
                ("opacity", "0.5"),
            ])
        );
        assert_eq!(rule.nested["&:hover"].declarations["backgroundColor"], "#1d4ed8");

        // Unknown variant falls back to `default`; unknown size has no default
        let fallback = compiler
            .compile_component(&button, &ComponentSelection::new().variant("ghost").size("xs"))
            .unwrap();
        assert_eq!(
            fallback.declarations,
            declarations(&[
                ("padding", "0.5rem"),
                ("color", "#111827"),
                ("backgroundColor", "#f9fafb"),
            ])
        );
    }

    #[test]
    fn css_rendering_uses_kebab_case() {
        let mut rule = CompiledRule::default();
        rule.declarations.insert("backgroundColor".into(), "#fff".into());
        rule.declarations.insert("--ds-ring".into(), "2px".into());
        rule.nested.insert("&:hover".into(), CompiledRule::default());
        assert_eq!(
            rule.to_css(".btn"),
            ".btn {\n  background-color: #fff;\n  --ds-ring: 2px;\n}\n"
        );
    }

    #[test]
    fn malformed_style_objects_are_rejected() {
        assert!(StyleObject::from_value(&json!({ "@sparkle": { "color": "red" } }))
            .unwrap_err()
            .contains("unknown effect"));
        assert!(StyleObject::from_value(&json!({ "margin": [1, 2] })).is_err());
        assert!(StyleObject::from_value(&json!("color")).is_err());
    }
}
