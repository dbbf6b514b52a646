use reqwest::StatusCode;
use thiserror::*;
use url::Url;

/// Failures of a single store call. None of them is fatal to the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),

    #[error("base url '{0}' cannot address a single task")]
    BaseUrl(Url),
}
