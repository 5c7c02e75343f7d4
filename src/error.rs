use std::fmt;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Error taxonomy for token resolution and request authentication.
///
/// "Token not found" is deliberately absent: an unknown token is a normal
/// outcome, modeled as `Ok(None)` by the resolver rather than an error.
#[derive(Debug)]
pub enum AuthError {
    /// Network-level failure reaching the token authority
    /// (connection refused, DNS failure, timeout)
    Transport(reqwest::Error),
    /// The authority answered with an error status, or with a 2xx body
    /// that does not decode as an identity
    RemoteRejected { status: u16, body: String },
    /// Missing or invalid configuration
    Config(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Transport(e) => write!(f, "token authority unreachable: {}", e),
            AuthError::RemoteRejected { status, body } => {
                write!(f, "token authority rejected request ({}): {}", status, body)
            }
            AuthError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = AuthError::RemoteRejected {
            status: 503,
            body: "authority down".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("authority down"));
    }

    #[test]
    fn config_error_display() {
        let err = AuthError::Config("base URL cannot be empty".to_string());
        assert!(err.to_string().contains("base URL cannot be empty"));
    }
}
