//! Utility-framework theme extension (Tailwind `theme.extend`)
//!
//! Scale colors come from the primary theme; semantic colors point at the
//! CSS variables so the utility classes follow the active mode at run time.
//! A semantic category named like a color scale is emitted as
//! `semantic-<category>` so it cannot overwrite the scale.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::warn;

use super::{nest, EmitInput, Emitter, Format, Namespace, GENERATED_NOTICE};
use crate::error::Result;
use crate::tokens::{TokenMap, TokenValue};

#[derive(Clone, Copy, Debug, Default)]
pub struct UtilityEmitter;

impl Emitter for UtilityEmitter {
    fn format(&self) -> Format {
        Format::Tailwind
    }

    fn emit(&self, input: &EmitInput<'_>) -> Result<String> {
        let config = input.config;
        let mut extend = Map::new();

        let mut colors = Map::new();
        if let Some(theme) = input.primary_theme() {
            for token in theme.namespace(Namespace::Colors) {
                nest(
                    &mut colors,
                    token.keys.iter().map(String::as_str),
                    Value::String(token.value.clone()),
                );
            }

            let mut renamed = BTreeSet::new();
            for token in theme.namespace(Namespace::Semantic) {
                let [category, role] = token.keys.as_slice() else {
                    continue;
                };
                let key = if colors.contains_key(category) || renamed.contains(category) {
                    if renamed.insert(category.clone()) {
                        warn!(
                            "semantic category `{}` shares its name with a color scale, emitting it as `semantic-{}`",
                            category, category
                        );
                    }
                    format!("semantic-{category}")
                } else {
                    category.clone()
                };
                let value = format!("var({})", token.variable(input.prefix));
                nest(&mut colors, [key.as_str(), role.as_str()], Value::String(value));
            }
        }
        extend.insert("colors".into(), Value::Object(colors));
        extend.insert("spacing".into(), strings(&config.spacing));

        let typography = &config.typography;
        let mut font_size = Map::new();
        for (key, size) in &typography.font_size {
            let size = Value::String(size.as_css().into_owned());
            let entry = match typography.line_height_for(key) {
                Some(line_height) => Value::Array(vec![
                    size,
                    serde_json::json!({ "lineHeight": line_height.as_css() }),
                ]),
                None => size,
            };
            font_size.insert(key.clone(), entry);
        }
        extend.insert("fontSize".into(), Value::Object(font_size));

        let font_family = typography
            .font_family
            .iter()
            .map(|(key, family)| {
                let stack = match family {
                    TokenValue::List(items) => items.clone(),
                    other => vec![other.as_css().into_owned()],
                };
                (key.clone(), Value::from(stack))
            })
            .collect();
        extend.insert("fontFamily".into(), Value::Object(font_family));
        extend.insert("fontWeight".into(), strings(&typography.font_weight));

        let screens = config
            .responsive
            .breakpoints
            .iter()
            .map(|(name, breakpoint)| (name.clone(), Value::String(breakpoint.min.clone())))
            .collect();
        extend.insert("screens".into(), Value::Object(screens));

        let effects = &config.effects;
        extend.insert("boxShadow".into(), strings(&effects.shadows));
        extend.insert("borderRadius".into(), strings(&effects.border_radius));
        extend.insert("backgroundImage".into(), strings(&effects.gradients));
        extend.insert("blur".into(), strings(&effects.blur));
        extend.insert("opacity".into(), strings(&effects.opacity));

        let mut root = Map::new();
        root.insert("extend".into(), Value::Object(extend));
        let body = serde_json::to_string_pretty(&Value::Object(root))?;
        Ok(format!("/** {GENERATED_NOTICE} */\nmodule.exports = {body};\n"))
    }
}

fn strings(table: &TokenMap) -> Value {
    Value::Object(
        table
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.as_css().into_owned())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenConfig;
    use crate::emit::ResolvedTheme;
    use crate::mode::ModeRegistry;
    use crate::resolve::ResolvePolicy;
    use crate::test_support::sample_config;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn extension() -> Value {
        extension_for(&sample_config(), &["light", "dark"])
    }

    fn extension_for(config: &TokenConfig, modes: &[&str]) -> Value {
        let registry = ModeRegistry::builtin();
        let themes: Vec<ResolvedTheme> = modes
            .iter()
            .map(|mode| {
                ResolvedTheme::build(config, &registry, mode, ResolvePolicy::Strict, "ds").unwrap()
            })
            .collect();
        let js = UtilityEmitter
            .emit(&EmitInput {
                config,
                themes: &themes,
                prefix: "ds",
            })
            .unwrap();
        let body = js
            .strip_prefix("/** Generated by blinc-tokens. Do not edit. */\nmodule.exports = ")
            .and_then(|rest| rest.strip_suffix(";\n"))
            .unwrap();
        serde_json::from_str::<Value>(body).unwrap()["extend"].clone()
    }

    #[test]
    fn semantic_colors_become_variable_indirections() {
        let extend = extension();
        assert_eq!(extend["colors"]["gray"]["900"], "#111827");
        assert_eq!(
            extend["colors"]["text"]["primary"],
            "var(--ds-semantic-text-primary)"
        );
        assert_eq!(
            extend["colors"]["interactive"]["primary-hover"],
            "var(--ds-semantic-interactive-primary-hover)"
        );
    }

    #[test]
    fn semantic_category_named_like_a_scale_keeps_the_scale() {
        let config = sample_config()
            .extend(&json!({
                "theme": { "themes": {
                    "light": { "semantic": { "blue": { "muted": "colors.blue.600" } } },
                    "dark": { "semantic": { "blue": { "muted": "colors.blue.600" } } }
                } }
            }))
            .unwrap();
        let colors = &extension_for(&config, &["light"])["colors"];

        assert_eq!(colors["blue"]["600"], "#2563eb");
        assert_eq!(colors["blue"].get("muted"), None);
        assert_eq!(
            colors["semantic-blue"],
            json!({ "muted": "var(--ds-semantic-blue-muted)" })
        );
        assert_eq!(colors["text"]["primary"], "var(--ds-semantic-text-primary)");
    }

    #[test]
    fn font_sizes_pair_with_line_heights() {
        let extend = extension();
        assert_eq!(
            extend["fontSize"],
            json!({
                "sm": ["0.875rem", { "lineHeight": "1.25rem" }],
                "base": ["1rem", { "lineHeight": "1.5rem" }],
                "xl": "1.25rem"
            })
        );
        assert_eq!(extend["fontFamily"]["mono"], json!(["JetBrains Mono", "monospace"]));
        assert_eq!(extend["fontWeight"]["semibold"], "600");
    }

    #[test]
    fn screens_effects_and_spacing_pass_through() {
        let extend = extension();
        assert_eq!(
            extend["screens"],
            json!({ "sm": "640px", "md": "768px", "lg": "1024px" })
        );
        assert_eq!(extend["spacing"]["4"], "1rem");
        assert_eq!(extend["borderRadius"]["full"], "9999px");
        assert_eq!(
            extend["backgroundImage"]["brand"],
            "linear-gradient(135deg, #2563eb 0%, #7c3aed 100%)"
        );
        assert_eq!(extend["opacity"]["disabled"], "0.5");
        assert_eq!(extend["blur"]["md"], "12px");
    }
}
