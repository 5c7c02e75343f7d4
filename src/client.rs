use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;

use crate::config::AuthorityConfig;
use crate::error::{AuthError, AuthResult};

/// Connect timeout for the authority; generous relative to the request
/// timeout so the latter is the effective bound.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity resolved from an access token by the token authority.
///
/// Wire format: `{"id": string, "user_id": int64, "client_id": int64}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolvedIdentity {
    /// The token id as echoed back by the authority
    #[serde(rename = "id")]
    pub token_id: String,
    /// End user the token was issued for
    #[serde(rename = "user_id")]
    pub caller_id: i64,
    /// Application the token was issued to
    pub client_id: i64,
}

/// HTTP client for the remote token authority.
///
/// Constructed eagerly at startup from an [`AuthorityConfig`] and injected
/// wherever authentication happens; base URL and timeout are immutable for
/// the life of the client. Cheap to clone (the underlying connection pool
/// is shared).
#[derive(Debug, Clone)]
pub struct TokenAuthorityClient {
    client: Client,
    base_url: String,
}

impl TokenAuthorityClient {
    /// Create a client bound to the configured authority.
    pub fn new(config: &AuthorityConfig) -> AuthResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(AuthError::Config(
                "token authority base URL cannot be empty".to_string(),
            ));
        }

        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("tokengate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Strip the trailing slash for consistent path construction
        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Resolve a token id into an identity.
    ///
    /// Returns `Ok(None)` when the authority does not know the token (404);
    /// that is a normal outcome, not a failure. Any other non-2xx status,
    /// and any 2xx body that does not decode, is a [`AuthError::RemoteRejected`].
    pub async fn resolve(&self, token_id: &str) -> AuthResult<Option<ResolvedIdentity>> {
        let url = format!(
            "{}/oauth/access_token/{}",
            self.base_url,
            urlencoding::encode(token_id)
        );

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "token authority unreachable");
                AuthError::Transport(e)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(token_id, "token unknown to authority");
            return Ok(None);
        }

        let body = response.text().await?;
        if status.as_u16() > 299 {
            tracing::warn!(status = status.as_u16(), "token authority rejected lookup");
            return Err(AuthError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<ResolvedIdentity>(&body) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                tracing::warn!(error = %e, "token authority returned an undecodable body");
                Err(AuthError::RemoteRejected {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
