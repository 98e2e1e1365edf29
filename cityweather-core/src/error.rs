use reqwest::StatusCode;
use thiserror::Error;

/// Why a weather request produced no usable data.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),
}

impl LoadError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}
