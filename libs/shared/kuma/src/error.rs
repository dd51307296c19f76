use thiserror::Error;

/// Failure signals raised by the monitoring engine or the transport to it.
#[derive(Debug, Error)]
pub enum KumaError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("engine reported failure: {0}")]
    Failure(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

pub type KumaResult<T> = Result<T, KumaError>;

impl From<reqwest::Error> for KumaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            KumaError::Decode(err.to_string())
        } else {
            KumaError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for KumaError {
    fn from(err: serde_json::Error) -> Self {
        KumaError::Decode(err.to_string())
    }
}
