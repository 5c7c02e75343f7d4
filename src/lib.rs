//! Request-authentication middleware for services fronted by a token authority.
//!
//! Per inbound request, this crate decides whether the caller is already
//! identified and, if not, resolves the `access_token` query parameter into
//! a caller identity by querying a remote token-authority service. The
//! resolved identity (caller id + client id) is injected into the request as
//! trusted headers so downstream handlers never talk to the authority
//! themselves.
//!
//! ## Architecture
//!
//! - [`headers`] — reads/writes/clears the three well-known identity headers
//!   (`X-Public`, `X-Client-Id`, `X-Caller-Id`). The two identity headers are
//!   a trust boundary: inbound values are always discarded before resolution.
//! - [`TokenAuthorityClient`] — HTTP client bound to the authority's base URL
//!   and a fixed lookup timeout; performs the single remote operation
//!   "resolve token id into identity".
//! - [`RequestAuthenticator`] — the per-request entry point: clears identity
//!   headers, extracts the token, resolves it, and injects the result.
//!
//! Authentication never fails a request for being unauthenticated. An absent
//! or unknown token leaves the request without identity headers and returns
//! `Ok(())`; only transport failures and authority-side rejections surface
//! as [`AuthError`]s, for the caller to turn into a 5xx-style response.
//!
//! ## Usage
//!
//! ```no_run
//! use tokengate::{AuthorityConfig, RequestAuthenticator, TokenAuthorityClient};
//!
//! # async fn example() -> Result<(), tokengate::AuthError> {
//! // At startup:
//! let config = AuthorityConfig::new("http://localhost:8080");
//! let authenticator = RequestAuthenticator::new(TokenAuthorityClient::new(&config)?);
//!
//! // Per request:
//! let mut request = http::Request::builder()
//!     .uri("http://svc/users?access_token=abc123")
//!     .body(())
//!     .unwrap();
//! authenticator.authenticate(&mut request).await?;
//!
//! if tokengate::headers::caller_id(Some(request.headers())) != 0 {
//!     // identified caller
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod middleware;

// Re-export commonly used types and functions
pub use client::{ResolvedIdentity, TokenAuthorityClient};
pub use config::{AuthorityConfig, DEFAULT_REQUEST_TIMEOUT};
pub use error::{AuthError, AuthResult};
pub use headers::{
    caller_id, clear_identity, client_id, inject_identity, is_public, HEADER_CALLER_ID,
    HEADER_CLIENT_ID, HEADER_PUBLIC,
};
pub use middleware::{RequestAuthenticator, PARAM_ACCESS_TOKEN};
