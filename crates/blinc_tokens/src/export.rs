//! Export runner
//!
//! An export request names formats and a mode selector. The runner plans one
//! job per (format, mode) pair for mode-scoped formats and one job per global
//! format, runs every job on the blocking pool, and collects the outcome:
//!
//! - jobs never cancel each other; a failed job becomes a [`JobFailure`]
//! - artifacts are sorted by path and failures by (format, mode), so the
//!   report is the same no matter which job finished first
//!
//! Nothing is written here. Callers write [`Artifact::contents`] to
//! [`Artifact::path`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::TokenConfig;
use crate::emit::{emitter_for, EmitInput, Format, ResolvedTheme};
use crate::error::{Result, TokenError};
use crate::mode::ModeRegistry;
use crate::resolve::ResolvePolicy;

/// Which configured modes to export
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModeSelector {
    #[default]
    All,
    Only(String),
}

impl ModeSelector {
    /// Selected mode names, in config order
    pub fn select(&self, config: &TokenConfig) -> Result<Vec<String>> {
        match self {
            ModeSelector::All => Ok(config.mode_names().map(str::to_string).collect()),
            ModeSelector::Only(mode) => {
                config.theme(mode)?;
                Ok(vec![mode.clone()])
            }
        }
    }
}

impl FromStr for ModeSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "all" => ModeSelector::All,
            mode => ModeSelector::Only(mode.to_string()),
        })
    }
}

impl fmt::Display for ModeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeSelector::All => f.write_str("all"),
            ModeSelector::Only(mode) => f.write_str(mode),
        }
    }
}

/// What to export
#[derive(Clone, Debug, Default)]
pub struct ExportRequest {
    /// Format names; empty means `tokens.formats` from the config
    pub formats: Vec<String>,
    pub modes: ModeSelector,
    /// Overrides `tokens.prefix`
    pub prefix: Option<String>,
    /// Overrides `tokens.output`
    pub output: Option<PathBuf>,
    pub policy: ResolvePolicy,
}

impl ExportRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.formats.push(format.into());
        self
    }

    pub fn modes(mut self, modes: ModeSelector) -> Self {
        self.modes = modes;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn policy(mut self, policy: ResolvePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// One generated file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub format: Format,
    /// Set for mode-scoped formats
    pub mode: Option<String>,
    pub contents: String,
}

/// A job that produced no artifact
#[derive(Debug)]
pub struct JobFailure {
    /// Requested format name, as given
    pub format: String,
    pub mode: Option<String>,
    pub error: TokenError,
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            Some(mode) => write!(f, "[{} / {}] {}", self.format, mode, self.error),
            None => write!(f, "[{}] {}", self.format, self.error),
        }
    }
}

/// Outcome of an export
#[derive(Debug, Default)]
pub struct ExportReport {
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<JobFailure>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Job {
    format: Format,
    modes: Vec<String>,
    scoped: bool,
}

/// Run every (format, mode) job of `request` against one config snapshot
///
/// Only request-level problems (an unknown mode selector) are returned as
/// `Err`; everything job-specific ends up in [`ExportReport::failures`].
pub async fn export(
    config: Arc<TokenConfig>,
    registry: Arc<ModeRegistry>,
    request: ExportRequest,
) -> Result<ExportReport> {
    let modes = request.modes.select(&config)?;
    let prefix: Arc<str> = request
        .prefix
        .clone()
        .unwrap_or_else(|| config.prefix().to_string())
        .into();
    let output = request
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.tokens.output));
    let formats = if request.formats.is_empty() {
        config.tokens.formats.clone()
    } else {
        request.formats.clone()
    };

    let mut report = ExportReport::default();
    let mut jobs = Vec::new();
    for name in formats {
        let format = match name.parse::<Format>() {
            Ok(format) => format,
            Err(error) => {
                warn!("skipping format `{}`: {}", name, error);
                report.failures.push(JobFailure {
                    format: name,
                    mode: None,
                    error,
                });
                continue;
            }
        };
        if format.is_mode_scoped() {
            for mode in &modes {
                jobs.push(Job {
                    format,
                    modes: vec![mode.clone()],
                    scoped: true,
                });
            }
        } else {
            jobs.push(Job {
                format,
                modes: modes.clone(),
                scoped: false,
            });
        }
    }
    debug!(
        "export: {} job(s) over mode(s) [{}] with prefix `{}`",
        jobs.len(),
        modes.join(", "),
        prefix
    );

    let handles: Vec<(Format, Option<String>, JoinHandle<Result<Artifact>>)> = jobs
        .into_iter()
        .map(|job| {
            let mode = job.scoped.then(|| job.modes[0].clone());
            let config = Arc::clone(&config);
            let registry = Arc::clone(&registry);
            let prefix = Arc::clone(&prefix);
            let output = output.clone();
            let policy = request.policy;
            let format = job.format;
            let handle = tokio::task::spawn_blocking(move || {
                run_job(&config, &registry, &job, &prefix, &output, policy)
            });
            (format, mode, handle)
        })
        .collect();

    for (format, mode, handle) in handles {
        let outcome = handle
            .await
            .unwrap_or_else(|err| Err(TokenError::JobAborted(err.to_string())));
        match outcome {
            Ok(artifact) => report.artifacts.push(artifact),
            Err(error) => {
                warn!("export job {}/{:?} failed: {}", format, mode, error);
                report.failures.push(JobFailure {
                    format: format.to_string(),
                    mode,
                    error,
                });
            }
        }
    }

    report.artifacts.sort_by(|a, b| a.path.cmp(&b.path));
    report
        .failures
        .sort_by(|a, b| (&a.format, &a.mode).cmp(&(&b.format, &b.mode)));
    info!(
        "export finished: {} artifact(s), {} failure(s)",
        report.artifacts.len(),
        report.failures.len()
    );
    Ok(report)
}

fn run_job(
    config: &TokenConfig,
    registry: &ModeRegistry,
    job: &Job,
    prefix: &str,
    output: &std::path::Path,
    policy: ResolvePolicy,
) -> Result<Artifact> {
    let themes = job
        .modes
        .iter()
        .map(|mode| ResolvedTheme::build(config, registry, mode, policy, prefix))
        .collect::<Result<Vec<_>>>()?;

    let contents = emitter_for(job.format).emit(&EmitInput {
        config,
        themes: &themes,
        prefix,
    })?;

    let mode = job.scoped.then(|| job.modes[0].clone());
    let path = output.join(job.format.file_name(mode.as_deref().unwrap_or_default()));
    Ok(Artifact {
        path,
        format: job.format,
        mode,
        contents,
    })
}
