use thiserror::Error;

/// Failure reported by a [`crate::RemoteCatalogService`]. The screen treats every
/// variant the same way; the split only matters for logs and the CLI.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("invalid catalog service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request to catalog service failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("catalog service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response from catalog service: {0}")]
    Decode(String),
    #[error("catalog service unavailable: {0}")]
    Unavailable(String),
}

impl RemoteError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}
