//! Authentication core: token codec, shared state, persistent store and the
//! controller coordinating the backend handshakes. This module touches
//! credential material and must avoid logging tokens.
//!
//! Flow overview: `check_token` validates a token against the backend and, on
//! a 200, decodes and commits it to the shared state and the persistent
//! store. `mount` prepares the per-user backend resource once a token is
//! known valid. `logout` invalidates the server-side session best effort and
//! always clears local state afterwards.

pub mod client;
pub mod controller;
pub mod error;
pub mod state;
pub mod store;
pub mod token;

pub use client::AuthClient;
pub use controller::{AuthController, LogNavigator, Navigator, LOGIN_VIEW};
pub use error::AuthError;
pub use state::{AuthState, Session};
pub use store::{DiskStore, MemoryStore, PersistentStore};
pub use token::{parse, ClaimsPayload, TokenError, UserRecord};
