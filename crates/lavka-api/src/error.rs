//! Failure classification for storefront API calls.
//!
//! Two failure kinds leave this crate: [`ApiError::Transport`] when no
//! response arrived at all, and [`ApiError::Http`] for a non-2xx response,
//! carrying the most specific human-readable message the response body
//! offers. Per-item failures during reconciliation are not represented here;
//! callers swallow those and report a dropped count instead.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by [`crate::StoreClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete; no response was received.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed as JSON but does not look like the expected entity.
    #[error("unexpected response shape for {context}")]
    UnexpectedShape { context: String },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// Classifies a `reqwest` failure that produced no response.
    ///
    /// Certificate problems get a dedicated hint: the most common cause in
    /// the field is a wrong system clock.
    pub(crate) fn transport(source: reqwest::Error) -> Self {
        let message = if is_certificate_error(&source) {
            "TLS certificate error — check the system date and time, or contact the administrator"
                .to_string()
        } else {
            format!("could not reach the server: {source}")
        };
        Self::Transport { message, source }
    }

    /// Builds an HTTP error with the best message the body offers.
    pub(crate) fn http(status: StatusCode, body: &Value) -> Self {
        Self::Http {
            status: status.as_u16(),
            message: extract_http_message(status, body),
        }
    }
}

/// Walks the error chain looking for certificate-related failure text.
fn is_certificate_error(error: &reqwest::Error) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(e) = current {
        let text = e.to_string();
        if text.to_ascii_lowercase().contains("certificate") || text.contains("CERT") {
            return true;
        }
        current = e.source();
    }
    false
}

/// Extracts a human-readable error message from a non-2xx response body.
///
/// Priority order: a plain string body; an `error` field (string, or an
/// object with a `message`); a `message` field; an `errors` array joined
/// into one string; any string-valued field found in the body; and finally
/// a generic "status code + status text" line.
pub(crate) fn extract_http_message(status: StatusCode, body: &Value) -> String {
    let fallback = || {
        format!(
            "API error: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string()
    };

    if let Value::String(s) = body {
        if !s.is_empty() {
            return s.clone();
        }
        return fallback();
    }

    let Value::Object(map) = body else {
        return fallback();
    };

    match map.get("error") {
        Some(Value::String(s)) => return s.clone(),
        Some(Value::Object(inner)) => {
            if let Some(Value::String(s)) = inner.get("message") {
                return s.clone();
            }
        }
        _ => {}
    }

    if let Some(Value::String(s)) = map.get("message") {
        return s.clone();
    }

    if let Some(Value::Array(errors)) = map.get("errors") {
        let joined = errors
            .iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                Value::Object(obj) => match (obj.get("message"), obj.get("field")) {
                    (Some(Value::String(s)), _) | (None, Some(Value::String(s))) => s.clone(),
                    _ => e.to_string(),
                },
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        if !joined.is_empty() {
            return joined;
        }
    }

    if let Some(s) = map.values().find_map(|v| v.as_str()) {
        return s.to_string();
    }

    fallback()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_body_is_the_message() {
        let msg = extract_http_message(StatusCode::BAD_REQUEST, &json!("key is missing"));
        assert_eq!(msg, "key is missing");
    }

    #[test]
    fn error_field_string() {
        let msg = extract_http_message(StatusCode::BAD_REQUEST, &json!({"error": "bad key"}));
        assert_eq!(msg, "bad key");
    }

    #[test]
    fn error_field_nested_message() {
        let body = json!({"error": {"message": "order not found"}});
        let msg = extract_http_message(StatusCode::NOT_FOUND, &body);
        assert_eq!(msg, "order not found");
    }

    #[test]
    fn message_field() {
        let msg = extract_http_message(StatusCode::BAD_REQUEST, &json!({"message": "nope"}));
        assert_eq!(msg, "nope");
    }

    #[test]
    fn errors_array_is_joined() {
        let body = json!({"errors": [{"message": "email is required"}, {"field": "phone"}]});
        let msg = extract_http_message(StatusCode::UNPROCESSABLE_ENTITY, &body);
        assert_eq!(msg, "email is required; phone");
    }

    #[test]
    fn any_string_field_is_scanned() {
        let body = json!({"detail": "quota exceeded", "code": 42});
        let msg = extract_http_message(StatusCode::FORBIDDEN, &body);
        assert_eq!(msg, "quota exceeded");
    }

    #[test]
    fn falls_back_to_status_line() {
        let msg = extract_http_message(StatusCode::INTERNAL_SERVER_ERROR, &json!({"code": 1}));
        assert_eq!(msg, "API error: 500 Internal Server Error");
        let msg = extract_http_message(StatusCode::BAD_GATEWAY, &Value::Null);
        assert_eq!(msg, "API error: 502 Bad Gateway");
    }
}
