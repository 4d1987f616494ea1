//! Bearer token decoding. Splits the three-segment credential and decodes the
//! claims segment; the signature segment is carried opaquely and verified by
//! the backend, never here.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

/// Backend-defined description of the authenticated principal. Stored and
/// exposed as-is; nothing in it is validated client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub Value);

/// Decoded claims segment of a bearer token. `user` is required; any other
/// claim the backend embeds is preserved untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimsPayload {
    pub user: UserRecord,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, TokenError> {
    // Tolerate padded input; the backend emits unpadded base64url.
    let bytes = Base64UrlUnpadded::decode_vec(s.trim_end_matches('='))
        .map_err(|_| TokenError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decode the claims of a bearer token.
///
/// # Errors
///
/// Returns an error if the token does not have exactly three dot-separated
/// segments, or if the claims segment is not valid base64url-encoded JSON
/// with a `user` field.
pub fn parse(token: &str) -> Result<ClaimsPayload, TokenError> {
    let mut parts = token.split('.');
    let _header = parts.next().ok_or(TokenError::TokenFormat)?;
    let claims = parts.next().ok_or(TokenError::TokenFormat)?;
    let _signature = parts.next().ok_or(TokenError::TokenFormat)?;
    if parts.next().is_some() {
        return Err(TokenError::TokenFormat);
    }

    b64d_json(claims)
}
