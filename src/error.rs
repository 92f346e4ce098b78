use crate::domain::synthesis::SynthesisError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
