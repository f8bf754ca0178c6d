//! Logging setup: a compact stderr layer plus an optional JSON-lines file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Env var naming an explicit log file.
const LOG_PATH_ENV: &str = "LEXOMETER_LOG_PATH";

/// Env var naming a log directory.
const LOG_DIR_ENV: &str = "LEXOMETER_LOG_DIR";

/// File name used inside a log directory.
const DEFAULT_LOG_FILE: &str = "lexometer.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// JSON-lines log file. `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to `config_log_dir`.
    ///
    /// `LEXOMETER_LOG_PATH` wins over `LEXOMETER_LOG_DIR`, which wins over the
    /// config's `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV),
            std::env::var_os(LOG_DIR_ENV),
            config_log_dir,
        )
    }

    fn resolve(
        log_path: Option<OsString>,
        log_dir: Option<OsString>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let non_empty = |v: OsString| (!v.is_empty()).then(|| PathBuf::from(v));
        let log_file = log_path.and_then(non_empty).or_else(|| {
            log_dir
                .and_then(non_empty)
                .or(config_log_dir)
                .map(|dir| dir.join(DEFAULT_LOG_FILE))
        });
        Self { log_file }
    }
}

/// Build the level filter.
///
/// `RUST_LOG` takes precedence. Otherwise `quiet` selects `error`, one `-v`
/// selects `debug`, two or more select `trace`, and no flag uses the config level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(quiet, verbose, config_level)))
}

const fn level_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match config.log_file {
        Some(ref path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
