//! Tracing subscriber setup.
//!
//! Plain-text commands log to stderr. The TUI owns the terminal, so it only logs
//! when a `--log-file` is given; otherwise logging stays off.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, EXIT_INPUT};

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// Install the global subscriber. `RUST_LOG` overrides the default level.
///
/// Returns `Ok(false)` when nothing was installed: logging is off, or a
/// subscriber was already set.
pub fn init(target: LogTarget<'_>) -> Result<bool, AppError> {
    let installed = match target {
        LogTarget::Off => false,
        LogTarget::Stderr => note_install(
            tracing_subscriber::fmt()
                .with_env_filter(env_filter("warn"))
                .with_writer(std::io::stderr)
                .try_init(),
        ),
        LogTarget::File(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(
                    EXIT_INPUT,
                    format!("Failed to create log file '{}': {e}", path.display()),
                )
            })?;
            note_install(
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter("info"))
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init(),
            )
        }
    };
    Ok(installed)
}

fn note_install<E: std::fmt::Display>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            // Goes to whichever subscriber won.
            debug!(%err, "tracing subscriber already installed");
            false
        }
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
