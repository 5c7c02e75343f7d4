//! Identity header codec.
//!
//! Three well-known headers carry authentication state to downstream
//! handlers. They form a trust boundary: the two identity headers are
//! written exclusively by this crate, and any inbound values are discarded
//! before a resolution attempt so a caller can never forge its own identity.

use http::header::{HeaderMap, HeaderValue};

use crate::client::ResolvedIdentity;

/// Marks a request as not requiring identity resolution
pub const HEADER_PUBLIC: &str = "X-Public";
/// Application acting on the caller's behalf
pub const HEADER_CLIENT_ID: &str = "X-Client-Id";
/// End user the request is made for
pub const HEADER_CALLER_ID: &str = "X-Caller-Id";

/// Whether a request is explicitly flagged as public.
///
/// A missing request context (`None`) is treated as public, and only the
/// exact literal `"true"` counts; no trimming, no case folding.
pub fn is_public(headers: Option<&HeaderMap>) -> bool {
    let Some(headers) = headers else {
        return true;
    };
    headers
        .get(HEADER_PUBLIC)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "true")
        .unwrap_or(false)
}

/// The caller (end-user) id carried on the request, or 0.
///
/// Missing or malformed values degrade to 0 rather than erroring. This
/// silent default is a compatibility contract relied on by downstream
/// handlers, not an oversight.
pub fn caller_id(headers: Option<&HeaderMap>) -> i64 {
    id_header(headers, HEADER_CALLER_ID)
}

/// The client (application) id carried on the request, or 0.
///
/// Same silent-default contract as [`caller_id`].
pub fn client_id(headers: Option<&HeaderMap>) -> i64 {
    id_header(headers, HEADER_CLIENT_ID)
}

fn id_header(headers: Option<&HeaderMap>, name: &str) -> i64 {
    headers
        .and_then(|h| h.get(name))
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Remove both identity headers. Idempotent.
pub fn clear_identity(headers: &mut HeaderMap) {
    headers.remove(HEADER_CLIENT_ID);
    headers.remove(HEADER_CALLER_ID);
}

/// Write the resolved identity onto the request.
///
/// Set-semantics: a second injection overwrites, it never appends a second
/// value to the same header.
pub fn inject_identity(headers: &mut HeaderMap, identity: &ResolvedIdentity) {
    // Decimal i64 strings are always valid header values
    if let Ok(value) = HeaderValue::from_str(&identity.client_id.to_string()) {
        headers.insert(HEADER_CLIENT_ID, value);
    }
    if let Ok(value) = HeaderValue::from_str(&identity.caller_id.to_string()) {
        headers.insert(HEADER_CALLER_ID, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(caller_id: i64, client_id: i64) -> ResolvedIdentity {
        ResolvedIdentity {
            token_id: "abc123".to_string(),
            caller_id,
            client_id,
        }
    }

    #[test]
    fn missing_request_context_is_public() {
        assert!(is_public(None));
    }

    #[test]
    fn public_header_true_is_public() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_PUBLIC, HeaderValue::from_static("true"));
        assert!(is_public(Some(&headers)));
    }

    #[test]
    fn absent_public_header_is_not_public() {
        let headers = HeaderMap::new();
        assert!(!is_public(Some(&headers)));
    }

    #[test]
    fn public_header_is_exact_match_only() {
        for value in ["TRUE", "True", " true", "true ", "1", "yes", ""] {
            let mut headers = HeaderMap::new();
            headers.insert(HEADER_PUBLIC, HeaderValue::from_str(value).unwrap());
            assert!(!is_public(Some(&headers)), "{:?} must not be public", value);
        }
    }

    #[test]
    fn id_accessors_default_to_zero() {
        assert_eq!(caller_id(None), 0);
        assert_eq!(client_id(None), 0);

        let headers = HeaderMap::new();
        assert_eq!(caller_id(Some(&headers)), 0);
        assert_eq!(client_id(Some(&headers)), 0);
    }

    #[test]
    fn malformed_ids_default_to_zero() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_CALLER_ID, HeaderValue::from_static("not-a-number"));
        headers.insert(HEADER_CLIENT_ID, HeaderValue::from_static("12.5"));
        assert_eq!(caller_id(Some(&headers)), 0);
        assert_eq!(client_id(Some(&headers)), 0);
    }

    #[test]
    fn id_accessors_parse_signed_64_bit() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_CALLER_ID, HeaderValue::from_static("-42"));
        headers.insert(
            HEADER_CLIENT_ID,
            HeaderValue::from_static("9223372036854775807"),
        );
        assert_eq!(caller_id(Some(&headers)), -42);
        assert_eq!(client_id(Some(&headers)), i64::MAX);
    }

    #[test]
    fn clear_identity_is_idempotent() {
        let mut headers = HeaderMap::new();
        inject_identity(&mut headers, &identity(7, 11));

        clear_identity(&mut headers);
        assert!(headers.get(HEADER_CALLER_ID).is_none());
        assert!(headers.get(HEADER_CLIENT_ID).is_none());

        clear_identity(&mut headers);
        assert!(headers.get(HEADER_CALLER_ID).is_none());
        assert!(headers.get(HEADER_CLIENT_ID).is_none());
    }

    #[test]
    fn inject_identity_round_trips_through_accessors() {
        let mut headers = HeaderMap::new();
        inject_identity(&mut headers, &identity(i64::MAX, i64::MIN));
        assert_eq!(caller_id(Some(&headers)), i64::MAX);
        assert_eq!(client_id(Some(&headers)), i64::MIN);
    }

    #[test]
    fn inject_identity_overwrites_instead_of_appending() {
        let mut headers = HeaderMap::new();
        inject_identity(&mut headers, &identity(1, 2));
        inject_identity(&mut headers, &identity(3, 4));

        assert_eq!(headers.get_all(HEADER_CALLER_ID).iter().count(), 1);
        assert_eq!(headers.get_all(HEADER_CLIENT_ID).iter().count(), 1);
        assert_eq!(caller_id(Some(&headers)), 3);
        assert_eq!(client_id(Some(&headers)), 4);
    }
}
