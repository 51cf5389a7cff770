//! Preprocessor variable emitter

use std::fmt::Write as _;

use super::{EmitInput, Emitter, Format, CANONICAL_ORDER, GENERATED_NOTICE};
use crate::error::Result;

/// Flat `$<prefix>-<path>: <value>;` declarations, no selector
#[derive(Clone, Copy, Debug, Default)]
pub struct ScssEmitter;

impl Emitter for ScssEmitter {
    fn format(&self) -> Format {
        Format::Scss
    }

    fn emit(&self, input: &EmitInput<'_>) -> Result<String> {
        let mut scss = String::new();
        let _ = writeln!(scss, "// {GENERATED_NOTICE}");

        for theme in input.themes {
            let _ = writeln!(scss, "\n// mode: {}", theme.mode);
            for namespace in CANONICAL_ORDER {
                for token in theme.namespace(namespace) {
                    let variable = token.variable(input.prefix);
                    let name = variable.trim_start_matches('-');
                    let _ = writeln!(scss, "${}: {};", name, token.value);
                }
            }
        }
        Ok(scss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::ResolvedTheme;
    use crate::mode::ModeRegistry;
    use crate::resolve::ResolvePolicy;
    use crate::test_support::sample_config;

    #[test]
    fn emits_dollar_variables_without_selectors() {
        let config = sample_config();
        let registry = ModeRegistry::builtin();
        let themes =
            [ResolvedTheme::build(&config, &registry, "light", ResolvePolicy::Strict, "brand").unwrap()];
        let scss = ScssEmitter
            .emit(&EmitInput {
                config: &config,
                themes: &themes,
                prefix: "brand",
            })
            .unwrap();

        assert!(scss.starts_with("// Generated by blinc-tokens. Do not edit.\n\n// mode: light\n"));
        assert!(scss.contains("$brand-colors-blue-600: #2563eb;\n"));
        assert!(scss.contains("$brand-semantic-interactive-primary-hover: #1d4ed8;\n"));
        assert!(scss.contains("$brand-effects-borderRadius-full: 9999px;\n"));
        assert!(!scss.contains('{'));
    }
}
