//! Resolution, merging, and style compilation against the shared fixture

use blinc_tokens::{
    compile, create_theme, merge, resolve, validate, ComponentSelection,
    ComponentStyleDefinition, ModeRegistry, ResolvePolicy, StyleCompiler, StyleObject, TokenConfig,
    TokenError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture() -> TokenConfig {
    let raw = serde_json::from_str(include_str!("fixtures/tokens.json")).unwrap();
    validate(&raw).unwrap()
}

#[test]
fn semantic_role_resolves_through_its_scale() {
    let config = fixture();
    assert_eq!(
        resolve("semantic.text.primary", &config, "light", ResolvePolicy::Strict).unwrap(),
        "#111827"
    );
}

#[test]
fn strict_and_lenient_diverge_only_on_misses() {
    let config = fixture()
        .extend(&json!({ "tokens": { "prefix": "prefix" } }))
        .unwrap();
    assert!(matches!(
        resolve("colors.doesNotExist", &config, "light", ResolvePolicy::Strict),
        Err(TokenError::Resolution { .. })
    ));
    assert_eq!(
        resolve("colors.doesNotExist", &config, "light", ResolvePolicy::Lenient).unwrap(),
        "var(--prefix-colors-doesNotExist)"
    );
    for policy in [ResolvePolicy::Strict, ResolvePolicy::Lenient] {
        assert_eq!(
            resolve("spacing.8", &config, "dark", policy).unwrap(),
            "2rem"
        );
    }
}

#[test]
fn hover_scenario_compiles_two_independent_rules() {
    let config = fixture();
    let style = StyleObject::from_value(&json!({
        "backgroundColor": "semantic.interactive.primary",
        "hover": { "backgroundColor": "semantic.interactive.primary-hover" }
    }))
    .unwrap();

    let rule = compile(&style, &config, "light", ResolvePolicy::Strict).unwrap();
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.nested.len(), 1);
    assert_eq!(rule.nested["&:hover"].declarations.len(), 1);
    assert_eq!(
        rule.to_css(".btn"),
        ".btn {\n  background-color: #2563eb;\n}\n.btn:hover {\n  background-color: #1d4ed8;\n}\n"
    );
}

#[test]
fn missing_component_entries_degrade_to_unstyled() {
    let config = fixture();
    let registry = ModeRegistry::builtin();
    let compiler = StyleCompiler::new(&config, &registry, "dark", ResolvePolicy::Strict).unwrap();
    let badge: ComponentStyleDefinition = serde_json::from_value(json!({
        "variants": { "info": { "color": "semantic.interactive.primary" } }
    }))
    .unwrap();

    let rule = compiler
        .compile_component(
            &badge,
            &ComponentSelection::new().variant("warning").size("xl").state("pressed"),
        )
        .unwrap();
    assert!(rule.is_empty());
}

#[test]
fn empty_merge_is_identity_and_last_override_wins() {
    let config = fixture();
    assert_eq!(merge(&config, &json!({})).unwrap(), config);

    let a = json!({ "effects": { "borderRadius": { "md": "0.5rem" } } });
    let b = json!({ "effects": { "borderRadius": { "md": "0.75rem" } } });
    let merged = merge(&merge(&config, &a).unwrap(), &b).unwrap();
    assert_eq!(
        resolve("effects.borderRadius.md", &merged, "light", ResolvePolicy::Strict).unwrap(),
        "0.75rem"
    );
    assert_eq!(
        resolve("effects.borderRadius.sm", &merged, "light", ResolvePolicy::Strict).unwrap(),
        "0.125rem"
    );
}

#[test]
fn created_theme_is_usable_by_every_stage() {
    let config = fixture();
    let created = create_theme(
        &config,
        "high-contrast",
        "light",
        &json!({ "colors": { "gray": { "900": "#000000" } } }),
    )
    .unwrap();
    let style = StyleObject::new().set("color", "semantic.text.primary");
    let rule = compile(&style, &created, "high-contrast", ResolvePolicy::Strict).unwrap();
    assert_eq!(rule.declarations["color"], "#000000");
}
