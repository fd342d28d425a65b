use std::path::Path;

use crate::io::ingest::LoadError;

/// Exit code for bad input (missing file, bad CSV, invalid flags).
pub const EXIT_INPUT: u8 = 2;
/// Exit code for terminal/runtime failures.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}

/// Shorthand for the "could not write file" family of errors.
pub(crate) fn write_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::new(EXIT_INPUT, format!("Failed to write '{}': {err}", path.display()))
}
