//! Structured logging and tracing for Evsched
//!
//! Log lines go to a file (optionally rotated) and, when enabled, to stderr.
//! Stdout is reserved for the JSON report, so no layer ever writes there.

use crate::config::LoggingConfig;
use crate::error::{EvschedError, Result};
use std::path::Path;
use tracing::{Level, info};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod level;
mod state;
mod structured;

pub use level::{level_rank, min_level, parse_log_level};
pub use structured::{LogContext, StructuredLogger, get_logger, get_logger_with_context};

use state::{INIT_ERROR, INIT_ONCE, LOG_GUARD};

/// Environment variable forcing console-only logging
pub const DISABLE_FILE_LOG_ENV: &str = "EVSCHED_DISABLE_FILE_LOG";

/// Initialize logging system based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INIT_ONCE.call_once(|| {
        if let Err(e) = try_init(config) {
            let _ = INIT_ERROR.set(e.to_string());
        }
    });

    if let Some(err) = INIT_ERROR.get() {
        return Err(EvschedError::config(err.clone()));
    }
    Ok(())
}

fn try_init(config: &LoggingConfig) -> Result<()> {
    let base_level = parse_log_level(&config.level)?;
    let console_level = config
        .console_level
        .as_ref()
        .and_then(|s| parse_log_level(s).ok())
        .unwrap_or(base_level);
    let file_level = config
        .file_level
        .as_ref()
        .and_then(|s| parse_log_level(s).ok())
        .unwrap_or(base_level);

    if should_use_console_only() {
        let filter = build_env_filter(console_level);
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(config.json_format, console_level))
            .try_init()
            .map_err(|e| EvschedError::config(format!("Failed to install subscriber: {}", e)))?;
        info!(
            "Logging initialized - console_level: {:?}, console-only",
            console_level
        );
        return Ok(());
    }

    let most_verbose = if config.console_output {
        min_level(console_level, file_level)
    } else {
        file_level
    };
    let filter = build_env_filter(most_verbose);

    let (dir, prefix, suffix) = split_log_path(&config.file);
    let mut builder = rolling::Builder::new()
        .rotation(parse_rotation(&config.rotation)?)
        .filename_prefix(prefix)
        .max_log_files(config.backup_count.max(1) as usize);
    if let Some(suffix) = suffix {
        builder = builder.filename_suffix(suffix);
    }
    let file_appender = builder
        .build(dir)
        .map_err(|e| EvschedError::io(format!("Failed to create log file appender: {}", e)))?;

    let (non_blocking_appender, guard) = non_blocking(file_appender);
    if let Ok(mut slot) = LOG_GUARD.lock() {
        *slot = Some(guard);
    }

    let file_layer = {
        let base = fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false);
        if config.json_format {
            base.json()
                .with_filter(LevelFilter::from_level(file_level))
                .boxed()
        } else {
            base.with_filter(LevelFilter::from_level(file_level))
                .boxed()
        }
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);
    let installed = if config.console_output {
        subscriber
            .with(console_layer(config.json_format, console_level))
            .try_init()
    } else {
        subscriber.try_init()
    };
    installed
        .map_err(|e| EvschedError::config(format!("Failed to install subscriber: {}", e)))?;

    info!(
        "Logging initialized - console_level: {:?}, file_level: {:?}, file: {}",
        console_level, file_level, config.file
    );
    Ok(())
}

fn console_layer<S>(json_format: bool, level: Level) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);
    if json_format {
        base.json()
            .with_filter(LevelFilter::from_level(level))
            .boxed()
    } else {
        base.with_filter(LevelFilter::from_level(level)).boxed()
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("evsched={},reqwest=warn,hyper=warn", level)
            .to_lowercase()
            .into()
    })
}

fn should_use_console_only() -> bool {
    cfg!(test) || std::env::var_os(DISABLE_FILE_LOG_ENV).is_some()
}

/// Parse a rotation name into a tracing-appender rotation
pub fn parse_rotation(rotation: &str) -> Result<rolling::Rotation> {
    match rotation.trim().to_lowercase().as_str() {
        "never" => Ok(rolling::Rotation::NEVER),
        "hourly" => Ok(rolling::Rotation::HOURLY),
        "daily" => Ok(rolling::Rotation::DAILY),
        other => Err(EvschedError::config(format!(
            "Invalid log rotation: {}",
            other
        ))),
    }
}

/// Split a log file path into directory, file prefix and optional extension
fn split_log_path(file: &str) -> (&Path, String, Option<String>) {
    let path = Path::new(file);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "evsched".to_string());
    let suffix = path.extension().map(|s| s.to_string_lossy().to_string());
    (dir, prefix, suffix)
}

/// Flush buffered file output; call once before the process exits
pub fn shutdown() {
    if let Ok(mut slot) = LOG_GUARD.lock() {
        slot.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, prefix, suffix) = split_log_path("evsched.log");
        assert_eq!(dir, Path::new("."));
        assert_eq!(prefix, "evsched");
        assert_eq!(suffix.as_deref(), Some("log"));

        let (dir, prefix, suffix) = split_log_path("/var/log/evsched/charge");
        assert_eq!(dir, Path::new("/var/log/evsched"));
        assert_eq!(prefix, "charge");
        assert!(suffix.is_none());
    }

    #[test]
    fn test_parse_rotation() {
        assert!(parse_rotation("never").is_ok());
        assert!(parse_rotation("Daily").is_ok());
        assert!(parse_rotation("weekly").is_err());
    }

    #[test]
    fn test_init_logging_console_only_under_test() {
        let config = LoggingConfig::default();
        assert!(init_logging(&config).is_ok());
        // Second call is a no-op
        assert!(init_logging(&config).is_ok());
        shutdown();
    }
}
