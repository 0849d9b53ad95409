use thiserror::Error;

/// Failure of a single call to the project API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-2xx status. The body is kept verbatim.
    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Connection failure or timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to parse {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 and 403 responses.
    pub fn is_auth(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// What an operator should see for a failed call: the raw body for
    /// API errors, the error text otherwise.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_includes_code_and_body() {
        let err = ApiError::Status {
            status: 404,
            body: r#"{"error":{"code":"not_found"}}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"API Error: 404 - {"error":{"code":"not_found"}}"#
        );
        assert!(!err.is_auth());
    }

    #[test]
    fn test_auth_statuses() {
        for status in [401, 403] {
            let err = ApiError::Status {
                status,
                body: String::new(),
            };
            assert!(err.is_auth());
        }
    }

    #[test]
    fn test_detail_falls_back_to_message() {
        let err = ApiError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.detail(), "API Error: 500 - ");

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Decode {
            context: "project",
            source,
        };
        assert!(err.detail().starts_with("failed to parse project response"));
    }
}
