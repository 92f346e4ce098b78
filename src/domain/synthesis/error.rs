use std::path::PathBuf;
use std::time::Duration;

/// Terminal failures of one synthesis invocation. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("text file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to read text file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("remote submission rejected: {0}")]
    RemoteSubmission(String),
    #[error("remote operation {operation} failed: {message}")]
    RemoteOperation { operation: String, message: String },
    #[error("operation {operation} did not complete within {limit:?}")]
    Timeout { operation: String, limit: Duration },
    #[error("cancelled: {0}")]
    Cancelled(String),
}

impl SynthesisError {
    pub fn read(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            SynthesisError::FileNotFound { path }
        } else {
            SynthesisError::Read { path, source }
        }
    }
}
