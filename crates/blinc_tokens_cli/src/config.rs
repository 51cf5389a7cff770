//! Token config file handling

use anyhow::{Context, Result};
use blinc_tokens::{TokenConfig, TokenError};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched, in order, when given a directory
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    "tokens.toml",
    "tokens.json",
    "design-tokens.toml",
    "design-tokens.json",
];

/// On-disk syntax of a token document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    fn for_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(DocumentFormat::Toml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => anyhow::bail!(
                "Unsupported config file {} (expected .toml or .json)",
                path.display()
            ),
        }
    }
}

/// A loaded, not yet validated, token document
#[derive(Debug)]
pub struct TokenDocument {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub raw: serde_json::Value,
}

impl TokenDocument {
    /// Load a token document from a file, or search a directory for one
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| path.join(name))
                .find(|candidate| candidate.exists())
                .with_context(|| {
                    format!(
                        "No token config found in {} (looked for {})",
                        path.display(),
                        CONFIG_FILE_NAMES.join(", ")
                    )
                })?
        };

        let format = DocumentFormat::for_path(&config_path)?;
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let raw = parse(&content, format)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!("loaded token document {}", config_path.display());
        Ok(Self {
            path: config_path,
            format,
            raw,
        })
    }

    /// Validate into a typed config, listing every problem on failure
    pub fn config(&self) -> Result<TokenConfig> {
        TokenConfig::from_value(&self.raw).map_err(|err| match err {
            TokenError::Validation(problems) => {
                let listing: Vec<String> = problems.iter().map(|p| format!("  - {p}")).collect();
                anyhow::anyhow!(
                    "{} is not a valid token config:\n{}",
                    self.path.display(),
                    listing.join("\n")
                )
            }
            other => other.into(),
        })
    }

    /// Directory relative outputs are resolved against
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn resolve_output(&self, output: &Path) -> PathBuf {
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            self.base_dir().join(output)
        }
    }

    /// Write `config` back to this document's file, in its own syntax
    pub fn save(&self, config: &TokenConfig) -> Result<()> {
        let content = match self.format {
            DocumentFormat::Toml => {
                toml::to_string_pretty(config).context("Failed to serialize config")?
            }
            DocumentFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(config).context("Failed to serialize config")?;
                json.push('\n');
                json
            }
        };
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

fn parse(content: &str, format: DocumentFormat) -> Result<serde_json::Value> {
    Ok(match format {
        DocumentFormat::Toml => toml::from_str(content)?,
        DocumentFormat::Json => serde_json::from_str(content)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_TOML: &str = r##"
version = "1.0.0"

[theme]
default = "light"

[theme.themes.light.colors.gray]
"50" = "#f9fafb"
"100" = "#f3f4f6"
"200" = "#e5e7eb"
"300" = "#d1d5db"
"400" = "#9ca3af"
"500" = "#6b7280"
"600" = "#4b5563"
"700" = "#374151"
"800" = "#1f2937"
"900" = "#111827"
"950" = "#030712"

[theme.themes.light.semantic.text]
primary = "colors.gray.900"

[theme.themes.dark.colors.gray]
"50" = "#030712"
"100" = "#111827"
"200" = "#1f2937"
"300" = "#374151"
"400" = "#4b5563"
"500" = "#6b7280"
"600" = "#9ca3af"
"700" = "#d1d5db"
"800" = "#e5e7eb"
"900" = "#f3f4f6"
"950" = "#f9fafb"

[theme.themes.dark.semantic.text]
primary = "colors.gray.900"

[spacing]
"4" = "1rem"

[tokens]
prefix = "ds"
output = "dist"
formats = ["css"]
"##;

    #[test]
    fn finds_config_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("design-tokens.toml"), SAMPLE_TOML).unwrap();

        let document = TokenDocument::load_from_dir(dir.path()).unwrap();
        assert_eq!(document.format, DocumentFormat::Toml);
        let config = document.config().unwrap();
        assert_eq!(config.mode_names().collect::<Vec<_>>(), vec!["light", "dark"]);
        assert_eq!(
            document.resolve_output(Path::new("dist")),
            dir.path().join("dist")
        );
    }

    #[test]
    fn missing_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenDocument::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No token config found"));
    }

    #[test]
    fn validation_problems_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, r#"{ "theme": { "default": "light", "themes": {} } }"#).unwrap();

        let err = TokenDocument::load_from_dir(&path)
            .unwrap()
            .config()
            .unwrap_err()
            .to_string();
        assert!(err.contains("  - tokens.prefix: is required"), "{err}");
        assert!(err.contains("  - theme.themes: must declare at least one theme"), "{err}");
    }

    #[test]
    fn saved_document_reloads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.toml");
        fs::write(&path, SAMPLE_TOML).unwrap();

        let document = TokenDocument::load_from_dir(&path).unwrap();
        let config = document.config().unwrap();
        document.save(&config).unwrap();

        let reloaded = TokenDocument::load_from_dir(&path).unwrap().config().unwrap();
        assert_eq!(reloaded, config);
    }
}
