//! CSS custom property emitter

use std::fmt::Write as _;

use super::{EmitInput, Emitter, Format, CANONICAL_ORDER, GENERATED_NOTICE};
use crate::error::Result;

/// `:root { --<prefix>-<path>: <value>; }`, one block per mode
#[derive(Clone, Copy, Debug, Default)]
pub struct CssEmitter;

impl Emitter for CssEmitter {
    fn format(&self) -> Format {
        Format::Css
    }

    fn emit(&self, input: &EmitInput<'_>) -> Result<String> {
        let mut css = String::new();
        let _ = writeln!(css, "/* {GENERATED_NOTICE} */");

        for theme in input.themes {
            let _ = writeln!(css, "\n/* mode: {} */", theme.mode);
            let _ = writeln!(css, "{} {{", theme.selector());
            for namespace in CANONICAL_ORDER {
                for token in theme.namespace(namespace) {
                    let _ = writeln!(css, "  {}: {};", token.variable(input.prefix), token.value);
                }
            }
            css.push_str("}\n");
        }
        Ok(css)
    }
}
