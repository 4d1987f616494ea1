//! Orchestration of the authentication flows: decode, commit, validate,
//! mount and logout. The controller owns nothing exotic; it wires the codec,
//! the network client, the in-memory state and the persistent store together
//! and upholds the one hard guarantee of the crate: logout always clears
//! local state.

use crate::auth::{
    client::AuthClient,
    error::AuthError,
    state::{AuthState, Session},
    store::PersistentStore,
    token,
};
use tracing::{debug, instrument, warn};

/// View path the user is sent to after logout.
pub const LOGIN_VIEW: &str = "/login";

/// Navigation side effect, injected so logout can be exercised without a
/// real view layer.
pub trait Navigator: Send + Sync {
    fn go(&self, path: &str);
}

/// Navigator that only notes the transition in the log. Fits headless
/// callers such as the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn go(&self, path: &str) {
        debug!("navigating to {path}");
    }
}

pub struct AuthController<S, N> {
    client: AuthClient,
    state: AuthState,
    store: S,
    navigator: N,
}

impl<S: PersistentStore, N: Navigator> AuthController<S, N> {
    pub fn new(client: AuthClient, state: AuthState, store: S, navigator: N) -> Self {
        Self {
            client,
            state,
            store,
            navigator,
        }
    }

    /// Shared authentication state, for observers outside the controller.
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Decode the token and commit it to the store and the shared state in
    /// one step. Purely local; the backend is not consulted.
    ///
    /// # Errors
    ///
    /// On a malformed token or a store failure nothing is committed and the
    /// state observed by others is exactly what it was before the call.
    #[instrument(skip_all)]
    pub fn login(&self, token: &str, session_id: &str) -> Result<(), AuthError> {
        let claims = token::parse(token)?;

        self.store.save(token)?;

        self.state.commit(Session {
            token: token.to_string(),
            session_id: session_id.to_string(),
            user: claims.user,
        });

        Ok(())
    }

    /// Validate the token against the backend, then commit it locally.
    ///
    /// # Errors
    ///
    /// A rejected or unreachable backend leaves all local state untouched.
    #[instrument(skip_all)]
    pub async fn check_token(&self, token: &str, session_id: &str) -> Result<(), AuthError> {
        self.client.validate(token, session_id).await?;

        self.login(token, session_id)
    }

    /// Ask the backend to prepare the per-user resource. No local state
    /// changes either way.
    ///
    /// # Errors
    ///
    /// Propagates the backend's rejection or a transport failure.
    #[instrument(skip_all)]
    pub async fn mount(&self, token: &str, session_id: &str) -> Result<(), AuthError> {
        self.client.mount(token, session_id).await
    }

    /// Invalidate the server-side session best effort, then unconditionally
    /// clear the persistent store and the shared state, then navigate to the
    /// login view when `navigate` is set.
    ///
    /// The cleanup block runs after the invalidate attempt settles and is
    /// never skipped: even under total network failure the caller ends up
    /// locally unauthenticated.
    ///
    /// # Errors
    ///
    /// Reports a transport failure of the invalidate call, after cleanup has
    /// already run.
    #[instrument(skip_all)]
    pub async fn logout(&self, navigate: bool) -> Result<(), AuthError> {
        let (token, session_id) = match self.state.read() {
            Some(session) => (session.token, session.session_id),
            None => (String::new(), String::new()),
        };

        let outcome = self.client.invalidate(&token, &session_id).await;

        // Cleanup block: always runs, whatever the invalidate attempt did.
        if let Err(err) = self.store.clear() {
            warn!("failed to clear persistent store on logout: {err}");
        }
        self.state.clear();

        if navigate {
            self.navigator.go(LOGIN_VIEW);
        }

        match outcome {
            Ok(status) => {
                debug!("logout acknowledged with status {status}");
                Ok(())
            }
            Err(err) => {
                warn!("logout invalidation failed: {err}");
                Err(err)
            }
        }
    }

    /// Re-enter the validate flow with a token left behind by a previous
    /// run. Returns `false` when the store holds nothing to rehydrate from;
    /// no network call is made in that case.
    ///
    /// # Errors
    ///
    /// Propagates store failures and the [`Self::check_token`] contract.
    #[instrument(skip_all)]
    pub async fn rehydrate(&self, session_id: &str) -> Result<bool, AuthError> {
        match self.store.load()? {
            Some(token) => {
                self.check_token(&token, session_id).await?;
                Ok(true)
            }
            None => {
                debug!("no persisted token to rehydrate from");
                Ok(false)
            }
        }
    }
}
