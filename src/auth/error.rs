use crate::auth::{store::StoreError, token::TokenError};
use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of the authentication core. Parsing and rejection errors are
/// always surfaced to the immediate caller; only the logout invalidation is
/// deliberately best effort.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed token: {0}")]
    MalformedToken(#[from] TokenError),
    #[error("{endpoint} rejected with status {status}")]
    Rejected {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("persistent store: {0}")]
    Store(#[from] StoreError),
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl AuthError {
    /// True when the backend answered and said no, as opposed to the request
    /// never completing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
