use thiserror::Error;

use super::{ConfigError, HttpError, ValidationError};

/// Exit status for any fatal error without a dedicated code.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when no target URL was supplied.
pub const EXIT_MISSING_URL: u8 = 3;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Result collector failed: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            AppError::Validation(ValidationError::MissingUrl) => EXIT_MISSING_URL,
            AppError::Io { .. }
            | AppError::Clap { .. }
            | AppError::Validation(_)
            | AppError::Config(_)
            | AppError::Http(_)
            | AppError::Join { .. } => EXIT_FAILURE,
        }
    }
}
