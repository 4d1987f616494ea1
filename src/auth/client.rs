//! Network boundary to the backend authority. Every handshake is a single
//! bodyless POST carrying the token and session id as headers; timeouts and
//! retries are the transport's business, not this client's.

use crate::auth::error::AuthError;
use crate::APP_USER_AGENT;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};
use url::Url;

pub const HEADER_AUTH: &str = "X-Auth";
pub const HEADER_SESSION_ID: &str = "X-Session-Id";

pub const CHECK_TOKEN_ENDPOINT: &str = "/api/check-token";
pub const MOUNT_ENDPOINT: &str = "/api/mount";
pub const LOGOUT_ENDPOINT: &str = "/api/logout";

#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    client: Client,
}

impl AuthClient {
    /// Build a client for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the underlying HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        Url::parse(base_url)?;

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn post(
        &self,
        endpoint: &'static str,
        token: &str,
        session_id: &str,
    ) -> Result<Response, reqwest::Error> {
        debug!("POST {}", endpoint);

        self.client
            .post(self.endpoint_url(endpoint))
            .header(HEADER_AUTH, token)
            .header(HEADER_SESSION_ID, session_id)
            .send()
            .await
    }

    /// Ask the backend whether the token is still good.
    ///
    /// # Errors
    ///
    /// `AuthError::Rejected` on any non-200 answer, `AuthError::Network` when
    /// the request never completes.
    #[instrument(skip(self, token))]
    pub async fn validate(&self, token: &str, session_id: &str) -> Result<(), AuthError> {
        let response = self.post(CHECK_TOKEN_ENDPOINT, token, session_id).await?;

        expect_ok(CHECK_TOKEN_ENDPOINT, response).await
    }

    /// Ask the backend to attach the per-user resource backing this session.
    /// Only meaningful once the token is known valid.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::validate`].
    #[instrument(skip(self, token))]
    pub async fn mount(&self, token: &str, session_id: &str) -> Result<(), AuthError> {
        let response = self.post(MOUNT_ENDPOINT, token, session_id).await?;

        expect_ok(MOUNT_ENDPOINT, response).await
    }

    /// Invalidate the server-side session. Any HTTP answer counts as a
    /// completed attempt; only a transport failure is an error.
    ///
    /// # Errors
    ///
    /// `AuthError::Network` when the request never completes.
    #[instrument(skip(self, token))]
    pub async fn invalidate(&self, token: &str, session_id: &str) -> Result<StatusCode, AuthError> {
        let response = self.post(LOGOUT_ENDPOINT, token, session_id).await?;

        Ok(response.status())
    }
}

async fn expect_ok(endpoint: &'static str, response: Response) -> Result<(), AuthError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(());
    }

    // Keep the body around for diagnostics; the backend explains rejections
    // in plain text.
    let body = response.text().await.unwrap_or_default();

    Err(AuthError::Rejected {
        endpoint,
        status,
        body,
    })
}
