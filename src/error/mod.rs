mod app;
mod config;
mod http;
mod validation;

pub use app::{AppError, AppResult, EXIT_FAILURE, EXIT_MISSING_URL};
pub use config::ConfigError;
pub use http::HttpError;
pub use validation::ValidationError;
