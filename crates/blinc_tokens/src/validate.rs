//! Structural validation of raw token documents
//!
//! Validation runs over the untyped document so that every problem can be
//! reported in one pass instead of stopping at the first failed field. Only
//! when the document is structurally sound is it deserialized into a
//! [`TokenConfig`].

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::TokenConfig;
use crate::error::ValidationError;
use crate::tokens::COLOR_STEPS;

/// Validate a raw token document, collecting all problems
pub fn validate(raw: &Value) -> Result<TokenConfig, Vec<ValidationError>> {
    let Some(root) = raw.as_object() else {
        return Err(vec![ValidationError::new("<root>", "must be an object")]);
    };

    let mut problems = Vec::new();
    check_tokens(root.get("tokens"), &mut problems);
    check_theme(root.get("theme"), &mut problems);
    if let Some(version) = root.get("version") {
        if !version.is_string() && !version.is_null() {
            problems.push(ValidationError::new("version", "must be a string"));
        }
    }
    if let Some(spacing) = root.get("spacing") {
        check_token_map("spacing", spacing, &mut problems);
    }
    if let Some(typography) = root.get("typography") {
        check_tables("typography", typography, TYPOGRAPHY_TABLES, &mut problems);
    }
    if let Some(effects) = root.get("effects") {
        check_tables("effects", effects, EFFECT_TABLES, &mut problems);
    }
    if let Some(responsive) = root.get("responsive") {
        check_responsive(responsive, &mut problems);
    }

    if !problems.is_empty() {
        debug!("token config rejected with {} problem(s)", problems.len());
        return Err(problems);
    }

    serde_json::from_value(raw.clone())
        .map_err(|err| vec![ValidationError::new("<root>", err.to_string())])
}

fn check_tokens(tokens: Option<&Value>, problems: &mut Vec<ValidationError>) {
    let empty = Map::new();
    let tokens = match tokens {
        None => &empty,
        Some(Value::Object(tokens)) => tokens,
        Some(_) => {
            problems.push(ValidationError::new("tokens", "must be an object"));
            return;
        }
    };

    for key in ["prefix", "output"] {
        let path = format!("tokens.{key}");
        match tokens.get(key) {
            None | Some(Value::Null) => problems.push(ValidationError::new(path, "is required")),
            Some(Value::String(text)) if text.trim().is_empty() => {
                problems.push(ValidationError::new(path, "must not be empty"))
            }
            Some(Value::String(_)) => {}
            Some(_) => problems.push(ValidationError::new(path, "must be a string")),
        }
    }

    match tokens.get("formats") {
        None => {}
        Some(Value::Array(formats)) => {
            for (index, format) in formats.iter().enumerate() {
                if !format.is_string() {
                    problems.push(ValidationError::new(
                        format!("tokens.formats[{index}]"),
                        "must be a string",
                    ));
                }
            }
        }
        Some(_) => problems.push(ValidationError::new("tokens.formats", "must be a list")),
    }
}

const TYPOGRAPHY_TABLES: &[&str] = &[
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
];

const EFFECT_TABLES: &[&str] = &["shadows", "borderRadius", "gradients", "blur", "opacity"];

/// An object whose known keys are token tables; unknown keys are kept as-is
fn check_tables(path: &str, value: &Value, tables: &[&str], problems: &mut Vec<ValidationError>) {
    let Some(section) = value.as_object() else {
        problems.push(ValidationError::new(path, "must be an object"));
        return;
    };
    for table in tables {
        if let Some(value) = section.get(*table) {
            check_token_map(&format!("{path}.{table}"), value, problems);
        }
    }
}

/// Flat `name -> leaf`, where a leaf is a string, a number, or a list of strings
fn check_token_map(path: &str, value: &Value, problems: &mut Vec<ValidationError>) {
    let Some(map) = value.as_object() else {
        problems.push(ValidationError::new(path, "must be an object"));
        return;
    };
    for (key, leaf) in map {
        let valid = match leaf {
            Value::String(_) | Value::Number(_) => true,
            Value::Array(items) => items.iter().all(Value::is_string),
            _ => false,
        };
        if !valid {
            problems.push(ValidationError::new(
                format!("{path}.{key}"),
                "must be a string, a number, or a list of strings",
            ));
        }
    }
}

fn check_responsive(value: &Value, problems: &mut Vec<ValidationError>) {
    let Some(responsive) = value.as_object() else {
        problems.push(ValidationError::new("responsive", "must be an object"));
        return;
    };
    let Some(breakpoints) = responsive.get("breakpoints") else {
        return;
    };
    let Some(breakpoints) = breakpoints.as_object() else {
        problems.push(ValidationError::new(
            "responsive.breakpoints",
            "must be an object",
        ));
        return;
    };

    for (name, breakpoint) in breakpoints {
        let path = format!("responsive.breakpoints.{name}");
        match breakpoint {
            Value::String(_) => {}
            Value::Object(range) => {
                match range.get("min") {
                    Some(Value::String(_)) => {}
                    Some(_) => problems.push(ValidationError::new(
                        format!("{path}.min"),
                        "must be a string",
                    )),
                    None => problems.push(ValidationError::new(format!("{path}.min"), "is required")),
                }
                if !matches!(range.get("max"), None | Some(Value::Null | Value::String(_))) {
                    problems.push(ValidationError::new(format!("{path}.max"), "must be a string"));
                }
            }
            _ => problems.push(ValidationError::new(
                path,
                "must be a width or an object with `min` and optional `max`",
            )),
        }
    }
}

fn check_theme(theme: Option<&Value>, problems: &mut Vec<ValidationError>) {
    let theme = match theme {
        Some(Value::Object(theme)) => theme,
        Some(_) => {
            problems.push(ValidationError::new("theme", "must be an object"));
            return;
        }
        None => {
            problems.push(ValidationError::new("theme", "is required"));
            return;
        }
    };

    let themes = match theme.get("themes") {
        Some(Value::Object(themes)) => {
            if themes.is_empty() {
                problems.push(ValidationError::new(
                    "theme.themes",
                    "must declare at least one theme",
                ));
            }
            Some(themes)
        }
        Some(_) => {
            problems.push(ValidationError::new("theme.themes", "must be an object"));
            None
        }
        None => {
            problems.push(ValidationError::new("theme.themes", "is required"));
            None
        }
    };

    match theme.get("default") {
        Some(Value::String(default)) => {
            if let Some(themes) = themes {
                if !themes.contains_key(default) {
                    let known: Vec<&str> = themes.keys().map(String::as_str).collect();
                    problems.push(ValidationError::new(
                        "theme.default",
                        format!(
                            "`{default}` is not one of the known modes ({})",
                            known.join(", ")
                        ),
                    ));
                }
            }
        }
        Some(_) => problems.push(ValidationError::new("theme.default", "must be a string")),
        None => problems.push(ValidationError::new("theme.default", "is required")),
    }

    let Some(themes) = themes else {
        return;
    };

    let mut reference: Option<(&str, ThemeShape)> = None;
    for (name, tokens) in themes {
        let Some(shape) = check_theme_tokens(name, tokens, problems) else {
            continue;
        };
        match &reference {
            None => reference = Some((name, shape)),
            Some((first, expected)) => compare_shapes(first, expected, name, &shape, problems),
        }
    }
}

/// Key structure of one theme, used to enforce identical shapes across modes
#[derive(Default)]
struct ThemeShape {
    scales: BTreeSet<String>,
    roles: BTreeSet<String>,
}

fn check_theme_tokens(
    name: &str,
    tokens: &Value,
    problems: &mut Vec<ValidationError>,
) -> Option<ThemeShape> {
    let base = format!("theme.themes.{name}");
    let Some(tokens) = tokens.as_object() else {
        problems.push(ValidationError::new(base, "must be an object"));
        return None;
    };

    let before = problems.len();
    let mut shape = ThemeShape::default();

    match tokens.get("colors") {
        Some(Value::Object(colors)) => {
            for (scale_name, scale) in colors {
                shape.scales.insert(scale_name.clone());
                check_scale(&format!("{base}.colors.{scale_name}"), scale, problems);
            }
        }
        Some(_) => problems.push(ValidationError::new(
            format!("{base}.colors"),
            "must be an object",
        )),
        None => problems.push(ValidationError::new(format!("{base}.colors"), "is required")),
    }

    match tokens.get("semantic") {
        Some(Value::Object(semantic)) => {
            for (category, roles) in semantic {
                let path = format!("{base}.semantic.{category}");
                let Some(roles) = roles.as_object() else {
                    problems.push(ValidationError::new(path, "must be an object"));
                    continue;
                };
                for (role, value) in roles {
                    shape.roles.insert(format!("{category}.{role}"));
                    if !value.is_string() {
                        problems.push(ValidationError::new(
                            format!("{path}.{role}"),
                            "must be a string",
                        ));
                    }
                }
            }
        }
        Some(_) => problems.push(ValidationError::new(
            format!("{base}.semantic"),
            "must be an object",
        )),
        None => problems.push(ValidationError::new(
            format!("{base}.semantic"),
            "is required",
        )),
    }

    (problems.len() == before).then_some(shape)
}

fn check_scale(path: &str, scale: &Value, problems: &mut Vec<ValidationError>) {
    let Some(scale) = scale.as_object() else {
        problems.push(ValidationError::new(path, "must be an object"));
        return;
    };

    let missing: Vec<&str> = COLOR_STEPS
        .iter()
        .copied()
        .filter(|step| !scale.contains_key(*step))
        .collect();
    if !missing.is_empty() {
        problems.push(ValidationError::new(
            path,
            format!("missing steps {}", missing.join(", ")),
        ));
    }

    for (step, color) in scale {
        if !color.is_string() {
            problems.push(ValidationError::new(
                format!("{path}.{step}"),
                "must be a string",
            ));
        }
    }
}

fn compare_shapes(
    first: &str,
    expected: &ThemeShape,
    name: &str,
    shape: &ThemeShape,
    problems: &mut Vec<ValidationError>,
) {
    let checks = [
        ("colors", "color scales", &expected.scales, &shape.scales),
        ("semantic", "semantic roles", &expected.roles, &shape.roles),
    ];
    for (namespace, label, expected, actual) in checks {
        let missing: Vec<&str> = expected.difference(actual).map(String::as_str).collect();
        let extra: Vec<&str> = actual.difference(expected).map(String::as_str).collect();
        if missing.is_empty() && extra.is_empty() {
            continue;
        }
        let mut message = format!("{label} differ from `{first}`");
        if !missing.is_empty() {
            message.push_str(&format!("; missing {}", missing.join(", ")));
        }
        if !extra.is_empty() {
            message.push_str(&format!("; unexpected {}", extra.join(", ")));
        }
        problems.push(ValidationError::new(
            format!("theme.themes.{name}.{namespace}"),
            message,
        ));
    }
}
