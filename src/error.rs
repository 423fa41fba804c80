use serde_json::Value;

/// Classified failure of an upstream page fetch.
///
/// Malformed 2xx bodies are not represented here: the fetcher degrades them
/// to an empty page instead.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Upstream answered 401 or 403: unauthenticated rate limit or a bad token.
    #[error("GitHub API rejected the request with status {status}")]
    RateLimited { status: u16, message: String },
    /// Any other non-2xx answer.
    #[error("GitHub API returned status {status}")]
    Upstream { status: u16, details: Value },
    /// No response reached us (connect failure, timeout, reset).
    #[error("GitHub API request failed: {0}")]
    Transport(String),
}

impl SearchError {
    /// HTTP status forwarded to our own caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::RateLimited { status, .. } | Self::Upstream { status, .. } => *status,
            Self::Transport(_) => 500,
        }
    }

    /// User-facing details payload.
    pub fn details(&self) -> Value {
        match self {
            Self::RateLimited { status, message } => Value::String(format!(
                "GitHub API returned {status}: {message}. This commonly means you hit the \
                 unauthenticated rate limit or need to provide a token. Set GITHUB_TOKEN \
                 (a Personal Access Token) in the environment and restart the server to \
                 raise rate limits."
            )),
            Self::Upstream { details, .. } => details.clone(),
            Self::Transport(_) => {
                Value::String("Could not reach the GitHub search API.".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_details_mention_token() {
        let err = SearchError::RateLimited {
            status: 403,
            message: "API rate limit exceeded".to_string(),
        };
        assert_eq!(err.status(), 403);
        let details = err.details();
        let text = details.as_str().unwrap();
        assert!(text.contains("API rate limit exceeded"));
        assert!(text.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_upstream_forwards_status_and_body() {
        let body = serde_json::json!({ "message": "Validation Failed" });
        let err = SearchError::Upstream {
            status: 422,
            details: body.clone(),
        };
        assert_eq!(err.status(), 422);
        assert_eq!(err.details(), body);
    }

    #[test]
    fn test_transport_maps_to_500() {
        let err = SearchError::Transport("connection refused".to_string());
        assert_eq!(err.status(), 500);
        assert!(err.to_string().contains("connection refused"));
    }
}
