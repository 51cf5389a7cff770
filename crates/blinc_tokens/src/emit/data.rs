//! Structured data emitters: pure JSON and a TypeScript module

use std::fmt::Write as _;

use serde_json::{Map, Value};

use super::{nest, EmitInput, Emitter, Format, Namespace, GENERATED_NOTICE};
use crate::error::Result;

/// Themes, spacing, typography, effects, and breakpoints as one document,
/// in canonical namespace order
fn document(input: &EmitInput<'_>) -> Result<Value> {
    let mut themes = Map::new();
    for theme in input.themes {
        let mut tables = Map::new();
        for namespace in [Namespace::Colors, Namespace::Semantic] {
            let mut table = Map::new();
            for token in theme.namespace(namespace) {
                nest(
                    &mut table,
                    token.keys.iter().map(String::as_str),
                    Value::String(token.value.clone()),
                );
            }
            tables.insert(namespace.segments()[0].to_string(), Value::Object(table));
        }
        themes.insert(theme.mode.clone(), Value::Object(tables));
    }

    let config = input.config;
    let mut root = Map::new();
    root.insert("themes".into(), Value::Object(themes));
    root.insert("spacing".into(), serde_json::to_value(&config.spacing)?);
    root.insert("typography".into(), serde_json::to_value(&config.typography)?);
    root.insert("effects".into(), serde_json::to_value(&config.effects)?);
    root.insert(
        "breakpoints".into(),
        serde_json::to_value(&config.responsive.breakpoints)?,
    );
    Ok(Value::Object(root))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn format(&self) -> Format {
        Format::Json
    }

    fn emit(&self, input: &EmitInput<'_>) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&document(input)?)?;
        json.push('\n');
        Ok(json)
    }
}

/// Inlined data plus typed accessors
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeScriptEmitter;

impl Emitter for TypeScriptEmitter {
    fn format(&self) -> Format {
        Format::TypeScript
    }

    fn emit(&self, input: &EmitInput<'_>) -> Result<String> {
        let data = serde_json::to_string_pretty(&document(input)?)?;
        let modes: Vec<&str> = input.themes.iter().map(|theme| theme.mode.as_str()).collect();
        let default_mode = input
            .primary_theme()
            .map(|theme| theme.mode.as_str())
            .unwrap_or_default();
        let var_prefix = if input.prefix.is_empty() {
            "--".to_string()
        } else {
            format!("--{}-", input.prefix)
        };

        let mut ts = String::new();
        let _ = writeln!(ts, "// {GENERATED_NOTICE}\n");
        let _ = writeln!(ts, "export const tokens = {data} as const;\n");
        ts.push_str("export type Tokens = typeof tokens;\n");
        ts.push_str("export type ThemeMode = keyof Tokens[\"themes\"];\n");
        ts.push_str("export type ThemeTokens = Tokens[\"themes\"][ThemeMode];\n\n");
        let _ = writeln!(
            ts,
            "export const themeModes: readonly ThemeMode[] = {};",
            serde_json::to_string(&modes)?
        );
        let _ = writeln!(
            ts,
            "export const defaultMode: ThemeMode = {};\n",
            serde_json::to_string(default_mode)?
        );
        ts.push_str("export function getTheme(mode: ThemeMode = defaultMode): ThemeTokens {\n");
        ts.push_str("  return tokens.themes[mode];\n}\n\n");
        ts.push_str("export function cssVar(path: string): string {\n");
        let _ = writeln!(
            ts,
            "  return `var({var_prefix}${{path.split(\".\").join(\"-\")}})`;\n}}"
        );
        Ok(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::ResolvedTheme;
    use crate::mode::ModeRegistry;
    use crate::resolve::ResolvePolicy;
    use crate::test_support::sample_config;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn both_themes(config: &crate::TokenConfig) -> Vec<ResolvedTheme> {
        let registry = ModeRegistry::builtin();
        ["light", "dark"]
            .into_iter()
            .map(|mode| {
                ResolvedTheme::build(config, &registry, mode, ResolvePolicy::Strict, "ds").unwrap()
            })
            .collect()
    }

    #[test]
    fn json_document_nests_resolved_themes() {
        let config = sample_config();
        let themes = both_themes(&config);
        let json = JsonEmitter
            .emit(&EmitInput {
                config: &config,
                themes: &themes,
                prefix: "ds",
            })
            .unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["themes", "spacing", "typography", "effects", "breakpoints"]
        );
        assert_eq!(parsed["themes"]["light"]["semantic"]["text"]["primary"], "#111827");
        assert_eq!(parsed["themes"]["dark"]["colors"]["gray"]["900"], "#f3f4f6");
        assert_eq!(
            parsed["typography"]["fontFamily"]["sans"],
            json!(["Inter var", "system-ui", "sans-serif"])
        );
        assert_eq!(parsed["typography"]["fontWeight"]["semibold"], 600);
        assert_eq!(parsed["breakpoints"]["lg"], json!({ "min": "1024px", "max": "1279px" }));
        assert_eq!(parsed["breakpoints"]["sm"], json!({ "min": "640px" }));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn typescript_module_inlines_data_with_accessors() {
        let config = sample_config();
        let themes = both_themes(&config);
        let ts = TypeScriptEmitter
            .emit(&EmitInput {
                config: &config,
                themes: &themes,
                prefix: "ds",
            })
            .unwrap();

        assert!(ts.starts_with("// Generated by blinc-tokens. Do not edit.\n\nexport const tokens = {\n"));
        assert!(ts.contains("} as const;\n"));
        assert!(ts.contains("export const themeModes: readonly ThemeMode[] = [\"light\",\"dark\"];\n"));
        assert!(ts.contains("export const defaultMode: ThemeMode = \"light\";\n"));
        assert!(ts.contains("  return `var(--ds-${path.split(\".\").join(\"-\")})`;\n}\n"));
    }
}
