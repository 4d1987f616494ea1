//! # Pordisto (client-held session token authentication)
//!
//! `pordisto` keeps a client authenticated against a session-token backend.
//! It parses bearer tokens, keeps the in-memory authentication record and the
//! persistent store in sync, and drives the three handshakes the backend
//! expects: `check-token`, `mount` and `logout`.
//!
//! ## Token model
//!
//! A bearer token is an opaque three-segment string (`header.claims.signature`).
//! Only the claims segment is decoded client side; signature verification is
//! the backend's job and the client trusts its `200`/non-`200` verdict. A token
//! always travels together with an opaque session id correlating the client to
//! a server-side session record.
//!
//! ## State model
//!
//! The in-memory [`auth::AuthState`] holds token, session id and user claims as
//! a single record: all three are populated together or cleared together, and
//! observers never see a partial update. The persistent store mirrors the raw
//! token only (cookie plus key/value slot) so a later run can rehydrate and
//! re-validate.
//!
//! ## Logout contract
//!
//! `logout` invalidates the server-side session best effort and then always
//! clears local state, even when the network call fails. A user never stays
//! authenticated locally after asking to leave.

pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
