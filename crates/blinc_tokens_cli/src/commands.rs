//! Command implementations

use anyhow::{Context, Result};
use blinc_tokens::{
    create_theme, export, list_themes, ComponentSelection, ComponentStyleDefinition,
    ExportReport, ExportRequest, ModeRegistry, ModeSelector, ResolvePolicy, StyleCompiler,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::TokenDocument;

/// Options for `blinc-tokens export`
#[derive(Debug, Default)]
pub struct ExportOptions {
    pub formats: Vec<String>,
    pub mode: ModeSelector,
    pub prefix: Option<String>,
    pub output: Option<PathBuf>,
    pub lenient: bool,
}

/// Export artifacts and write every successful one
///
/// Returns `false` when at least one job or write failed; successful siblings are
/// written regardless.
pub async fn export_tokens(document: &TokenDocument, options: ExportOptions) -> Result<bool> {
    let config = document.config()?;
    let output = match &options.output {
        Some(output) => output.clone(),
        None => document.resolve_output(Path::new(&config.tokens.output)),
    };

    let request = ExportRequest {
        formats: options.formats,
        modes: options.mode,
        prefix: options.prefix,
        output: Some(output),
        policy: ResolvePolicy::from_lenient(options.lenient),
    };
    let report = export(Arc::new(config), Arc::new(ModeRegistry::builtin()), request).await?;
    let write_errors = write_artifacts(&report);

    for failure in &report.failures {
        eprintln!("error: {failure}");
    }
    for err in &write_errors {
        eprintln!("error: {err:#}");
    }
    Ok(report.is_success() && write_errors.is_empty())
}

/// Write every artifact, collecting the ones that could not be written
fn write_artifacts(report: &ExportReport) -> Vec<anyhow::Error> {
    report
        .artifacts
        .iter()
        .filter_map(|artifact| match write_artifact(&artifact.path, &artifact.contents) {
            Ok(()) => {
                println!("{}", artifact.path.display());
                None
            }
            Err(err) => Some(err),
        })
        .collect()
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Validate the document and print a short summary
pub fn validate(document: &TokenDocument) -> Result<()> {
    let config = document.config()?;
    println!(
        "{} is valid: {} theme(s), default `{}`, prefix `{}`",
        document.path.display(),
        config.theme.themes.len(),
        config.default_mode(),
        config.prefix()
    );
    Ok(())
}

/// Print every configured theme
pub fn list(document: &TokenDocument) -> Result<()> {
    let config = document.config()?;
    for theme in list_themes(&config, &ModeRegistry::builtin()) {
        println!(
            "{}{:<16} class={:<16} scales={} categories={} roles={}",
            if theme.is_default { "* " } else { "  " },
            theme.name,
            theme.css_class.as_deref().unwrap_or("-"),
            theme.scales,
            theme.categories,
            theme.roles
        );
    }
    Ok(())
}

/// Add a theme derived from `base` and save the document
pub fn create(
    document: &TokenDocument,
    name: &str,
    base: &str,
    overrides: Option<&str>,
) -> Result<()> {
    let config = document.config()?;
    let overrides = match overrides {
        Some(text) => parse_overrides(text)?,
        None => serde_json::Value::Object(Default::default()),
    };
    let created = create_theme(&config, name, base, &overrides)?;
    document.save(&created)?;
    info!("added theme `{}` (from `{}`)", name, base);
    println!("Created theme `{name}` from `{base}` in {}", document.path.display());
    Ok(())
}

/// Inline JSON, or `@path` to a JSON file
fn parse_overrides(text: &str) -> Result<serde_json::Value> {
    let content = match text.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
        }
        None => text.to_string(),
    };
    serde_json::from_str(&content).context("Theme overrides must be a JSON object")
}

/// Options for `blinc-tokens style`
#[derive(Debug, Default)]
pub struct StyleOptions {
    pub definition: PathBuf,
    pub mode: Option<String>,
    pub selector: String,
    pub selection: ComponentSelection,
    pub lenient: bool,
}

/// Compile a component definition and print its CSS
pub fn style(document: &TokenDocument, options: StyleOptions) -> Result<String> {
    let config = document.config()?;
    let content = fs::read_to_string(&options.definition)
        .with_context(|| format!("Failed to read {}", options.definition.display()))?;
    let definition: ComponentStyleDefinition = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", options.definition.display()))?;

    let mode = options
        .mode
        .unwrap_or_else(|| config.default_mode().to_string());
    let registry = ModeRegistry::builtin();
    let compiler = StyleCompiler::new(
        &config,
        &registry,
        &mode,
        ResolvePolicy::from_lenient(options.lenient),
    )?;
    let rule = compiler.compile_component(&definition, &options.selection)?;
    Ok(rule.to_css(&options.selector))
}
