use std::env;
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Default timeout for token-authority lookups. The authority sits on the
/// hot path of every authenticated request, so the budget is deliberately
/// tight; override it through [`AuthorityConfig::with_timeout`] or
/// `TOKEN_AUTHORITY_TIMEOUT_MS` if the authority lives further away.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Token authority connection settings, resolved once at startup and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
    /// Base URL of the token authority, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Per-request timeout applied to every lookup
    pub request_timeout: Duration,
}

impl AuthorityConfig {
    /// Create a configuration with the default 200 ms lookup timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// `TOKEN_AUTHORITY_URL` takes precedence; `TOKEN_AUTHORITY_PORT` is the
    /// fallback for deployments where the authority runs next to the service
    /// and only the port varies (`http://localhost:{port}`).
    /// `TOKEN_AUTHORITY_TIMEOUT_MS` overrides the lookup timeout.
    pub fn from_env() -> AuthResult<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let base_url = match env::var("TOKEN_AUTHORITY_URL") {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => {
                let port = env::var("TOKEN_AUTHORITY_PORT").map_err(|_| {
                    AuthError::Config(
                        "TOKEN_AUTHORITY_URL or TOKEN_AUTHORITY_PORT is required".to_string(),
                    )
                })?;
                let port: u16 = port.trim().parse().map_err(|_| {
                    AuthError::Config(format!("invalid TOKEN_AUTHORITY_PORT value: {}", port))
                })?;
                format!("http://localhost:{}", port)
            }
        };

        let request_timeout = match env::var("TOKEN_AUTHORITY_TIMEOUT_MS") {
            Ok(ms) => {
                let ms: u64 = ms.trim().parse().map_err(|_| {
                    AuthError::Config(format!("invalid TOKEN_AUTHORITY_TIMEOUT_MS value: {}", ms))
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }
}
