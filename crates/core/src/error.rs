//! Outcome model shared by every repository operation.

use thiserror::Error;

/// Result type returned by repository operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Classified outcome of a failed (or empty) API interaction.
///
/// `NotFound` is the only variant that is not a failure: it reports that a
/// well-formed filtered list came back empty. Everything else means the
/// request could not be completed and must be surfaced to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A point lookup matched no resource.
    #[error("{resource} {name} not found")]
    NotFound { resource: String, name: String },

    /// The server answered with a non-2xx status.
    #[error("server error, status code: {status}, error code: {}, message: {description}", display_code(.code))]
    Http {
        status: u16,
        code: Option<i64>,
        description: String,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("error performing request: {0}")]
    Transport(String),

    /// The response body was malformed or missing required identity.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            name: name.into(),
        }
    }

    pub fn http(status: u16, code: Option<i64>, description: impl Into<String>) -> Self {
        Self::Http {
            status,
            code,
            description: description.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// A well-formed empty result for a point lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Anything that went wrong, as opposed to "no such resource".
    pub fn is_failure(&self) -> bool {
        !self.is_not_found()
    }

    /// HTTP status of the response, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn display_code(code: &Option<i64>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_not_a_failure() {
        let err = ApiError::not_found("Route", "my-cool-app");
        assert!(err.is_not_found());
        assert!(!err.is_failure());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Route my-cool-app not found");
    }

    #[test]
    fn http_errors_are_failures_with_status() {
        let err = ApiError::http(400, Some(210003), "The host is taken: my-cool-app");
        assert!(err.is_failure());
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "server error, status code: 400, error code: 210003, message: The host is taken: my-cool-app"
        );
    }

    #[test]
    fn http_error_without_code_renders_none() {
        let err = ApiError::http(502, None, "bad gateway");
        assert_eq!(
            err.to_string(),
            "server error, status code: 502, error code: none, message: bad gateway"
        );
    }

    #[test]
    fn json_errors_become_decode_failures() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.is_failure());
    }
}
