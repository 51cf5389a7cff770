//! Blinc Tokens CLI
//!
//! Validate design-token configs, export them as CSS / SCSS / JSON /
//! TypeScript / Tailwind artifacts, manage theme modes, and compile component
//! style definitions.

mod commands;
mod config;

use anyhow::Result;
use blinc_tokens::{ComponentSelection, ModeSelector};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::commands::{ExportOptions, StyleOptions};
use crate::config::TokenDocument;

/// Design-token compiler for Blinc
#[derive(Parser, Debug)]
#[command(name = "blinc-tokens")]
#[command(about = "Resolve, merge, and export design tokens")]
#[command(version)]
struct Cli {
    /// Token config file, or a directory containing one
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export token artifacts
    Export {
        /// Formats to generate (css, scss, json, ts, tailwind); defaults to tokens.formats
        formats: Vec<String>,

        /// Mode to export, or "all"
        #[arg(short, long, default_value = "all")]
        mode: ModeSelector,

        /// Output directory (overrides tokens.output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Variable prefix (overrides tokens.prefix)
        #[arg(short, long)]
        prefix: Option<String>,

        /// Emit var(--...) fallbacks for unresolved references instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Check a token config and report every problem
    Validate,

    /// List or create theme modes
    Themes {
        #[command(subcommand)]
        action: ThemesAction,
    },

    /// Compile a component style definition to CSS
    Style {
        /// Component definition (JSON)
        definition: PathBuf,

        /// Mode to resolve tokens in; defaults to theme.default
        #[arg(short, long)]
        mode: Option<String>,

        /// Selector the rules are rendered under
        #[arg(short, long, default_value = ".component")]
        selector: String,

        #[arg(long)]
        variant: Option<String>,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        state: Option<String>,

        /// Emit var(--...) fallbacks for unresolved references instead of failing
        #[arg(long)]
        lenient: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ThemesAction {
    /// List configured themes
    List,

    /// Derive a new theme from an existing one
    Create {
        /// Name of the new theme
        name: String,

        /// Theme to start from
        #[arg(short, long, default_value = "light")]
        from: String,

        /// Overrides as inline JSON, or @file.json
        #[arg(long)]
        overrides: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let document = TokenDocument::load_from_dir(&cli.config)?;

    match cli.command {
        Commands::Export {
            formats,
            mode,
            output,
            prefix,
            lenient,
        } => {
            commands::export_tokens(
                &document,
                ExportOptions {
                    formats,
                    mode,
                    prefix,
                    output,
                    lenient,
                },
            )
            .await
        }
        Commands::Validate => commands::validate(&document).map(|()| true),
        Commands::Themes { action } => match action {
            ThemesAction::List => commands::list(&document).map(|()| true),
            ThemesAction::Create {
                name,
                from,
                overrides,
            } => commands::create(&document, &name, &from, overrides.as_deref()).map(|()| true),
        },
        Commands::Style {
            definition,
            mode,
            selector,
            variant,
            size,
            state,
            lenient,
        } => {
            let css = commands::style(
                &document,
                StyleOptions {
                    definition,
                    mode,
                    selector,
                    selection: ComponentSelection {
                        variant,
                        size,
                        state,
                    },
                    lenient,
                },
            )?;
            print!("{css}");
            Ok(true)
        }
    }
}
