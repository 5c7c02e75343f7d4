//! Per-request authentication entry point.
//!
//! The authenticator classifies a request, resolves its access token against
//! the token authority, and injects the resulting identity headers. It never
//! errors for an *unauthenticated* outcome; callers distinguish
//! "authenticated" from "not authenticated" by inspecting the identity
//! headers afterwards, and only infrastructure failures surface as errors.

use http::Request;

use crate::client::TokenAuthorityClient;
use crate::config::AuthorityConfig;
use crate::error::AuthResult;
use crate::headers;

/// Query parameter carrying the access token to resolve
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// Authenticates inbound requests against a token authority.
///
/// Construct once at startup with an explicit [`TokenAuthorityClient`] and
/// share across request handlers (cheap to clone).
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    authority: TokenAuthorityClient,
}

impl RequestAuthenticator {
    pub fn new(authority: TokenAuthorityClient) -> Self {
        Self { authority }
    }

    /// Build the authenticator from environment configuration.
    pub fn from_env() -> AuthResult<Self> {
        let config = AuthorityConfig::from_env()?;
        Ok(Self::new(TokenAuthorityClient::new(&config)?))
    }

    /// Authenticate a request in place.
    ///
    /// Inbound identity headers are always cleared first, so a caller can
    /// never smuggle its own `X-Caller-Id`/`X-Client-Id` past this point.
    /// A missing or empty `access_token` parameter leaves the request
    /// unauthenticated without error, as does a token the authority does
    /// not know. Identity headers are present afterwards only if resolution
    /// succeeded.
    pub async fn authenticate<B>(&self, request: &mut Request<B>) -> AuthResult<()> {
        headers::clear_identity(request.headers_mut());

        let token_id = match access_token_param(request) {
            Some(token) => token,
            None => return Ok(()),
        };

        match self.authority.resolve(&token_id).await? {
            Some(identity) => {
                tracing::debug!(
                    caller_id = identity.caller_id,
                    client_id = identity.client_id,
                    "request authenticated"
                );
                headers::inject_identity(request.headers_mut(), &identity);
            }
            None => {
                tracing::debug!("unknown access token, request left unauthenticated");
            }
        }
        Ok(())
    }
}

/// Extract the trimmed `access_token` query parameter, if any.
fn access_token_param<B>(request: &Request<B>) -> Option<String> {
    let query = request.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == PARAM_ACCESS_TOKEN)
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty())
}
