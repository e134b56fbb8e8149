//! Logging bootstrap and configuration.
//!
//! # Responsibility
//! - Turn a `LoggingConfig` (explicit or from the environment) into a
//!   rolling file logger, once per process.
//! - Keep log lines metadata-only: `event=... module=... status=...`.
//!
//! # Invariants
//! - Initialization is idempotent for an identical config.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

/// Environment variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "TEAMREG_LOG_LEVEL";
/// Environment variable holding the absolute log directory.
pub const ENV_LOG_DIR: &str = "TEAMREG_LOG_DIR";

const LOG_FILE_BASENAME: &str = "teamreg";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    config: LoggingConfig,
    _logger: LoggerHandle,
}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Validates raw settings.
    ///
    /// # Errors
    /// - `level` is not one of `trace|debug|info|warn|error`.
    /// - `log_dir` is empty or not absolute.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Reads `TEAMREG_LOG_DIR` and optional `TEAMREG_LOG_LEVEL`.
    ///
    /// Returns `Ok(None)` when no directory is configured, so file logging
    /// stays off.
    pub fn from_env() -> Result<Option<Self>, String> {
        let Ok(log_dir) = std::env::var(ENV_LOG_DIR) else {
            return Ok(None);
        };
        let level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| default_log_level().to_string());
        Self::new(&level, &log_dir).map(Some)
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Starts file logging for `config`.
///
/// # Errors
/// - The log directory cannot be created or the backend fails to start.
/// - Logging is already active with a different level or directory.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    if let Some(state) = LOGGING_STATE.get() {
        return ensure_same_config(&state.config, config);
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        std::fs::create_dir_all(&config.log_dir).map_err(|err| {
            format!(
                "failed to create log directory `{}`: {err}",
                config.log_dir.display()
            )
        })?;

        let logger = Logger::try_with_str(config.level)
            .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
            .log_to_file(
                FileSpec::default()
                    .directory(config.log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        install_panic_hook_once();
        info!(
            "event=logging_init module=logging status=ok level={} log_dir={} version={}",
            config.level,
            config.log_dir.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            config: config.clone(),
            _logger: logger,
        })
    })?;

    ensure_same_config(&state.config, config)
}

/// Returns the active config, or `None` before `init_logging` succeeds.
pub fn logging_status() -> Option<LoggingConfig> {
    LOGGING_STATE.get().map(|state| state.config.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn ensure_same_config(active: &LoggingConfig, requested: &LoggingConfig) -> Result<(), String> {
    if active.log_dir != requested.log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.log_dir.display(),
            requested.log_dir.display()
        ));
    }
    if active.level != requested.level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level, requested.level
        ));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

// Payloads may carry team names; flatten newlines and cap length.
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
