//! Theme mode catalog
//!
//! The registry serves concrete modes only. The `system` pseudo-mode is
//! resolved to `light` or `dark` by the caller (see
//! [`crate::controller::SchemeProbe`]) before it reaches the registry.

use std::fmt::{self, Display, Formatter, Write as _};
use std::str::FromStr;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::error::{Result, TokenError};
use crate::resolve::css_variable;

/// Pseudo-mode resolved from the environment at switch time
pub const SYSTEM_MODE: &str = "system";

/// Light or dark base appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    /// Value for the CSS `color-scheme` property
    pub fn css_value(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

/// Optional visual effects a mode may enable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Blur,
    Glow,
    Shadows,
    Gradients,
}

impl Effect {
    pub fn id(self) -> &'static str {
        match self {
            Effect::Blur => "blur",
            Effect::Glow => "glow",
            Effect::Shadows => "shadows",
            Effect::Gradients => "gradients",
        }
    }

    pub fn all() -> &'static [Effect] {
        const EFFECTS: [Effect; 4] = [Effect::Blur, Effect::Glow, Effect::Shadows, Effect::Gradients];
        &EFFECTS
    }
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Effect::all()
            .iter()
            .copied()
            .find(|effect| effect.id() == s)
            .ok_or_else(|| format!("unknown effect `{s}`"))
    }
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which optional effects a mode renders
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EffectFlags {
    pub blur: bool,
    pub glow: bool,
    pub shadows: bool,
    pub gradients: bool,
}

impl EffectFlags {
    pub const fn all() -> Self {
        Self {
            blur: true,
            glow: true,
            shadows: true,
            gradients: true,
        }
    }

    pub fn supports(&self, effect: Effect) -> bool {
        match effect {
            Effect::Blur => self.blur,
            Effect::Glow => self.glow,
            Effect::Shadows => self.shadows,
            Effect::Gradients => self.gradients,
        }
    }
}

/// A concrete, named mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeModeConfig {
    pub name: String,
    /// Class applied to the document root while the mode is active
    pub css_class: String,
    pub scheme: ColorScheme,
    /// Base color roles → semantic token paths
    pub color_roles: IndexMap<String, String>,
    pub effect_flags: EffectFlags,
}

impl ThemeModeConfig {
    pub fn new(name: impl Into<String>, scheme: ColorScheme, effect_flags: EffectFlags) -> Self {
        let name = name.into();
        Self {
            css_class: name.clone(),
            name,
            scheme,
            color_roles: IndexMap::new(),
            effect_flags,
        }
    }

    pub fn with_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>, path: impl Into<String>) -> Self {
        self.color_roles.insert(role.into(), path.into());
        self
    }

    pub fn supports(&self, effect: Effect) -> bool {
        self.effect_flags.supports(effect)
    }

    /// Role declarations for this mode, as fed to a style sink
    ///
    /// ```text
    /// :root.dark {
    ///   color-scheme: dark;
    ///   --ds-role-background: var(--ds-semantic-background-primary);
    /// }
    /// ```
    pub fn role_css(&self, prefix: &str) -> String {
        let mut css = String::new();
        let _ = writeln!(css, ":root.{} {{", self.css_class);
        let _ = writeln!(css, "  color-scheme: {};", self.scheme.css_value());
        for (role, path) in &self.color_roles {
            let _ = writeln!(
                css,
                "  {}: var({});",
                css_variable(prefix, &format!("role.{role}")),
                css_variable(prefix, path)
            );
        }
        css.push_str("}\n");
        css
    }
}

/// Catalog of concrete modes
#[derive(Clone, Debug)]
pub struct ModeRegistry {
    modes: Vec<ThemeModeConfig>,
    index: FxHashMap<String, usize>,
}

impl ModeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            modes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Built-in catalog: `light`, `dark`, and `elevated-dark`
    pub fn builtin() -> Self {
        let light = ThemeModeConfig::new(
            "light",
            ColorScheme::Light,
            EffectFlags {
                blur: true,
                glow: false,
                shadows: true,
                gradients: true,
            },
        );
        let dark = ThemeModeConfig::new(
            "dark",
            ColorScheme::Dark,
            EffectFlags {
                blur: true,
                glow: true,
                shadows: true,
                gradients: true,
            },
        );
        let elevated = ThemeModeConfig::new("elevated-dark", ColorScheme::Dark, EffectFlags::all());

        let mut registry = Self::new();
        for mode in [light, dark] {
            registry.register(with_base_roles(mode, "semantic.background.primary"));
        }
        registry.register(with_base_roles(elevated, "semantic.background.secondary"));
        registry
    }

    /// Add or replace a mode
    pub fn register(&mut self, mode: ThemeModeConfig) {
        match self.index.get(&mode.name) {
            Some(&slot) => self.modes[slot] = mode,
            None => {
                self.index.insert(mode.name.clone(), self.modes.len());
                self.modes.push(mode);
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<&ThemeModeConfig> {
        self.index
            .get(name)
            .map(|&slot| &self.modes[slot])
            .ok_or_else(|| TokenError::UnknownMode(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether `mode` renders `effect`; unknown modes support nothing
    pub fn supports_effect(&self, mode: &str, effect: Effect) -> bool {
        self.get(mode).is_ok_and(|mode| mode.supports(effect))
    }

    pub fn all_modes(&self) -> &[ThemeModeConfig] {
        &self.modes
    }

    pub fn class_name_for(&self, mode: &str) -> Result<&str> {
        self.get(mode).map(|mode| mode.css_class.as_str())
    }

    pub fn effect_flags(&self, mode: &str) -> Result<EffectFlags> {
        self.get(mode).map(|mode| mode.effect_flags)
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn with_base_roles(mode: ThemeModeConfig, background: &str) -> ThemeModeConfig {
    mode.with_role("background", background)
        .with_role("surface", "semantic.background.secondary")
        .with_role("text", "semantic.text.primary")
        .with_role("border", "semantic.border.default")
        .with_role("accent", "semantic.interactive.primary")
}
