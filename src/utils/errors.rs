use thiserror::Error;

use crate::api::ApiError;
use crate::models::RequestState;

/// Local (non-network) failures: session persistence and configuration
#[derive(Debug, Error)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Everything a controller operation can fail with
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No credential in the session store; raised before any network I/O
    #[error("Not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Validation(String),

    #[error("Transfer request {0} is not in the list")]
    UnknownRequest(i64),

    #[error("Transfer request {id} is {state}")]
    InvalidState { id: i64, state: RequestState },

    #[error(transparent)]
    Session(#[from] AppError),
}

impl ServiceError {
    /// Message suitable for a user-facing notice
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthenticated => "Token not found. Please log in first.".to_string(),
            ServiceError::Api(ApiError::RequestError(msg)) => format!("Network error: {}", msg),
            ServiceError::Api(ApiError::DeserializationError(_)) => {
                "Unexpected response from the server".to_string()
            }
            ServiceError::Api(err) => format!("Failed: {}", err.message()),
            ServiceError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Extract a clean error message from a backend error body.
///
/// JSON bodies of the form `{"message": "..."}` (or `{"error": "..."}`) are
/// reduced to the message. Anything else is returned trimmed; an empty body
/// becomes "Unknown error".
pub fn extract_clean_error(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "Unknown error".to_string();
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let message = json
            .get("message")
            .and_then(|v| v.as_str())
            .or_else(|| json.get("error").and_then(|v| v.as_str()));
        if let Some(message) = message {
            return message.trim().to_string();
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_field() {
        let body = r#"{"message":"Insufficient balance","status":400}"#;
        assert_eq!(extract_clean_error(body), "Insufficient balance");
    }

    #[test]
    fn test_extract_error_field_fallback() {
        assert_eq!(extract_clean_error(r#"{"error":"Forbidden"}"#), "Forbidden");
    }

    #[test]
    fn test_extract_plain_text_and_empty() {
        assert_eq!(extract_clean_error("  gateway timeout \n"), "gateway timeout");
        assert_eq!(extract_clean_error(""), "Unknown error");
    }

    #[test]
    fn test_user_message_per_kind() {
        assert_eq!(
            ServiceError::Api(ApiError::RequestError("connection refused".into())).user_message(),
            "Network error: connection refused"
        );
        assert_eq!(
            ServiceError::Api(ApiError::ServerError(503, "maintenance".into())).user_message(),
            "Failed: maintenance"
        );
        assert!(ServiceError::Unauthenticated.user_message().contains("Token not found"));
    }
}
