use std::{env, error::Error, io};

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{Builder, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigPaths, LogLevel};

const DAYS_TO_KEEP: usize = 7;
const LOG_FORMAT_VAR: &str = "MPRIS_CONTROLLER_LOG_FORMAT";

/// Initialize tracing for short-lived client commands
///
/// Only warnings and errors reach stderr so command output on stdout stays
/// machine readable. `RUST_LOG` overrides the level.
///
/// # Errors
/// Returns error if tracing subscriber initialization fails
pub fn init_cli_mode() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init()?;

    Ok(())
}

/// Initialize tracing for the daemon
///
/// Logs go to stdout and to a daily rotated file in the log directory.
/// `RUST_LOG` wins over `debug`, which wins over `level`. Output is JSON when
/// `MPRIS_CONTROLLER_LOG_FORMAT=json`, human readable otherwise.
///
/// The returned guard flushes the file writer and must live as long as the
/// daemon.
///
/// # Errors
/// Returns error if the log directory cannot be created or tracing subscriber
/// initialization fails
pub fn init_daemon(level: LogLevel, debug: bool) -> Result<WorkerGuard, Box<dyn Error>> {
    let default_level = if debug { LogLevel::Debug } else { level };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_directive()));

    let log_dir = ConfigPaths::log_dir()?;

    let file_appender = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("mpris-controller")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let format = env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "pretty".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stdout),
                )
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
        _ => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stdout),
                )
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
    }

    Ok(guard)
}
