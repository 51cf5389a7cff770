//! Artifact emitters
//!
//! Every backend renders from the same resolved data: one [`ResolvedTheme`]
//! per mode, built by walking the config in [`CANONICAL_ORDER`], plus the
//! config itself for mode-independent tables. Emitting the same snapshot twice
//! produces byte-identical output.
//!
//! | Format     | File                  | Scope    |
//! |------------|-----------------------|----------|
//! | `css`      | `<mode>.css`          | per mode |
//! | `scss`     | `_<mode>.scss`        | per mode |
//! | `json`     | `tokens.json`         | global   |
//! | `ts`       | `tokens.ts`           | global   |
//! | `tailwind` | `tailwind.theme.js`   | global   |

mod css;
mod data;
mod scss;
mod utility;

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::trace;

use crate::config::TokenConfig;
use crate::error::{Result, TokenError};
use crate::mode::ModeRegistry;
use crate::resolve::{css_variable, ResolvePolicy, Resolver};
use crate::tokens::TokenMap;

pub use css::CssEmitter;
pub use data::{JsonEmitter, TypeScriptEmitter};
pub use scss::ScssEmitter;
pub use utility::UtilityEmitter;

/// First line of every generated artifact, in the target's comment syntax
pub(crate) const GENERATED_NOTICE: &str = "Generated by blinc-tokens. Do not edit.";

/// Output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    Css,
    Scss,
    Json,
    TypeScript,
    Tailwind,
}

impl Format {
    pub fn all() -> &'static [Format] {
        &[
            Format::Css,
            Format::Scss,
            Format::Json,
            Format::TypeScript,
            Format::Tailwind,
        ]
    }

    pub fn id(self) -> &'static str {
        match self {
            Format::Css => "css",
            Format::Scss => "scss",
            Format::Json => "json",
            Format::TypeScript => "ts",
            Format::Tailwind => "tailwind",
        }
    }

    /// Mode-scoped formats produce one artifact per mode
    pub fn is_mode_scoped(self) -> bool {
        matches!(self, Format::Css | Format::Scss)
    }

    /// Artifact file name; `mode` is ignored for global formats
    pub fn file_name(self, mode: &str) -> String {
        match self {
            Format::Css => format!("{mode}.css"),
            Format::Scss => format!("_{mode}.scss"),
            Format::Json => "tokens.json".to_string(),
            Format::TypeScript => "tokens.ts".to_string(),
            Format::Tailwind => "tailwind.theme.js".to_string(),
        }
    }
}

impl FromStr for Format {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Format::all()
            .iter()
            .copied()
            .find(|format| format.id() == s)
            .ok_or_else(|| TokenError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Token namespaces, in emit order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Colors,
    Semantic,
    Spacing,
    FontSize,
    Shadows,
    BorderRadius,
    Gradients,
    Blur,
    Opacity,
}

/// The one order every emitter walks namespaces in
pub const CANONICAL_ORDER: [Namespace; 9] = [
    Namespace::Colors,
    Namespace::Semantic,
    Namespace::Spacing,
    Namespace::FontSize,
    Namespace::Shadows,
    Namespace::BorderRadius,
    Namespace::Gradients,
    Namespace::Blur,
    Namespace::Opacity,
];

impl Namespace {
    /// Resolver path segments leading to this namespace
    pub fn segments(self) -> &'static [&'static str] {
        match self {
            Namespace::Colors => &["colors"],
            Namespace::Semantic => &["semantic"],
            Namespace::Spacing => &["spacing"],
            Namespace::FontSize => &["typography", "fontSize"],
            Namespace::Shadows => &["effects", "shadows"],
            Namespace::BorderRadius => &["effects", "borderRadius"],
            Namespace::Gradients => &["effects", "gradients"],
            Namespace::Blur => &["effects", "blur"],
            Namespace::Opacity => &["effects", "opacity"],
        }
    }

    /// Whether values differ per mode
    pub fn is_themed(self) -> bool {
        matches!(self, Namespace::Colors | Namespace::Semantic)
    }

    fn table(self, config: &TokenConfig) -> Option<&TokenMap> {
        match self {
            Namespace::Colors | Namespace::Semantic => None,
            Namespace::Spacing => Some(&config.spacing),
            Namespace::FontSize => Some(&config.typography.font_size),
            Namespace::Shadows => Some(&config.effects.shadows),
            Namespace::BorderRadius => Some(&config.effects.border_radius),
            Namespace::Gradients => Some(&config.effects.gradients),
            Namespace::Blur => Some(&config.effects.blur),
            Namespace::Opacity => Some(&config.effects.opacity),
        }
    }
}

/// One resolved leaf
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatToken {
    pub namespace: Namespace,
    /// Keys below the namespace (`["gray", "900"]`)
    pub keys: Vec<String>,
    pub value: String,
}

impl FlatToken {
    /// Full resolver path (`colors.gray.900`)
    pub fn path(&self) -> String {
        let mut segments: Vec<&str> = self.namespace.segments().to_vec();
        segments.extend(self.keys.iter().map(String::as_str));
        segments.join(".")
    }

    /// Custom property name (`--ds-colors-gray-900`)
    pub fn variable(&self, prefix: &str) -> String {
        css_variable(prefix, &self.path())
    }
}

/// Every token of one mode, resolved and in canonical order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub mode: String,
    /// Root class while this mode is active
    pub css_class: String,
    /// Whether this is the config's default mode
    pub is_default: bool,
    pub tokens: Vec<FlatToken>,
}

impl ResolvedTheme {
    /// Resolve all tokens of `mode` under `policy`
    ///
    /// `prefix` is only used for lenient fallbacks of dangling semantic
    /// aliases.
    pub fn build(
        config: &TokenConfig,
        registry: &ModeRegistry,
        mode: &str,
        policy: ResolvePolicy,
        prefix: &str,
    ) -> Result<Self> {
        let resolver = Resolver::new(config, mode, policy)?.with_prefix(prefix);
        let theme = config.theme(mode)?;

        let mut tokens = Vec::new();
        for namespace in CANONICAL_ORDER {
            match namespace {
                Namespace::Colors => {
                    for (scale_name, scale) in &theme.colors {
                        for (step, color) in scale.iter() {
                            tokens.push(FlatToken {
                                namespace,
                                keys: vec![scale_name.clone(), step.to_string()],
                                value: color.to_string(),
                            });
                        }
                    }
                }
                Namespace::Semantic => {
                    for (category, roles) in &theme.semantic {
                        for role in roles.keys() {
                            let value = resolver.resolve(&format!("semantic.{category}.{role}"))?;
                            tokens.push(FlatToken {
                                namespace,
                                keys: vec![category.clone(), role.clone()],
                                value,
                            });
                        }
                    }
                }
                _ => {
                    let Some(table) = namespace.table(config) else {
                        continue;
                    };
                    for (key, value) in table {
                        tokens.push(FlatToken {
                            namespace,
                            keys: vec![key.clone()],
                            value: value.as_css().into_owned(),
                        });
                    }
                }
            }
        }
        trace!("resolved {} token(s) for mode `{}`", tokens.len(), mode);

        Ok(Self {
            mode: mode.to_string(),
            css_class: registry
                .class_name_for(mode)
                .unwrap_or(mode)
                .to_string(),
            is_default: config.default_mode() == mode,
            tokens,
        })
    }

    /// Selector the mode's variables are declared under
    pub fn selector(&self) -> String {
        if self.is_default {
            ":root".to_string()
        } else {
            format!(":root.{}", self.css_class)
        }
    }

    pub fn namespace(&self, namespace: Namespace) -> impl Iterator<Item = &FlatToken> {
        self.tokens
            .iter()
            .filter(move |token| token.namespace == namespace)
    }
}

/// Everything an emitter renders from
#[derive(Clone, Copy, Debug)]
pub struct EmitInput<'a> {
    pub config: &'a TokenConfig,
    /// Selected modes, in config order
    pub themes: &'a [ResolvedTheme],
    pub prefix: &'a str,
}

impl<'a> EmitInput<'a> {
    /// The theme global formats take mode-independent values from
    pub fn primary_theme(&self) -> Option<&'a ResolvedTheme> {
        self.themes
            .iter()
            .find(|theme| theme.is_default)
            .or_else(|| self.themes.first())
    }
}

/// A backend rendering resolved tokens into one format
pub trait Emitter: Send + Sync {
    fn format(&self) -> Format;

    fn emit(&self, input: &EmitInput<'_>) -> Result<String>;
}

/// Backend for `format`
pub fn emitter_for(format: Format) -> Box<dyn Emitter> {
    match format {
        Format::Css => Box::new(CssEmitter),
        Format::Scss => Box::new(ScssEmitter),
        Format::Json => Box::new(JsonEmitter),
        Format::TypeScript => Box::new(TypeScriptEmitter),
        Format::Tailwind => Box::new(UtilityEmitter),
    }
}

/// Insert `value` into `root` under a path of object keys
pub(crate) fn nest<'k>(
    root: &mut Map<String, Value>,
    keys: impl IntoIterator<Item = &'k str>,
    value: Value,
) {
    let mut keys = keys.into_iter().peekable();
    let mut node = root;
    while let Some(key) = keys.next() {
        if keys.peek().is_none() {
            node.insert(key.to_string(), value);
            return;
        }
        let child = node
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        let Value::Object(child) = child else {
            return;
        };
        node = child;
    }
}
