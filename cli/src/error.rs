use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Pemutil(#[from] pemutil::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::InvalidInput(s.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
