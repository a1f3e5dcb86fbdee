use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body for POST auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for POST auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Response shared by login and register.
///
/// The backend may answer 2xx without a token (e.g. registration refused for
/// business reasons); callers must check `token` before trusting the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: f64,
    pub currency: String,
    pub rib: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub card_holder_name: String,
    pub card_last4: String,
    pub card_mask: String,
    pub card_type: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub status: String,
}

/// Body for POST cards/add
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCardRequest {
    pub card_holder_name: String,
    pub card_number: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub cvv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCardResponse {
    pub message: String,
    pub card_id: i64,
    pub card_last4: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

/// Body for POST transactions/transfer (an outgoing transfer by RIB)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub from_account_id: i64,
    pub to_rib: String,
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub message: String,
    pub transaction_id: i64,
    pub amount: f64,
    pub to_rib: String,
}

/// Body for POST transactions/request: offer money to another user, who
/// then sees it as a pending incoming transfer request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransferRequest {
    pub to_user_id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub message: String,
    pub request_id: i64,
}

/// A pending incoming transfer awaiting the recipient's decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub id: i64,
    pub sender_name: String,
    pub sender_email: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptResponse {
    pub message: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectResponse {
    pub message: String,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
    pub status: Option<i32>,
}

/// Comprehensive error type for gateway operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// The message worth showing to a user, without the status prefix
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::ServerError(_, msg)
            | ApiError::HttpError(_, msg)
            | ApiError::RequestError(msg)
            | ApiError::DeserializationError(msg) => msg,
        }
    }

    /// True when the server answered at all (non-2xx), false for transport
    /// and decoding failures.
    pub fn is_server_rejection(&self) -> bool {
        !matches!(
            self,
            ApiError::RequestError(_) | ApiError::DeserializationError(_)
        )
    }
}
