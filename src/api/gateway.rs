use async_trait::async_trait;

use super::models::{
    Account, AcceptResponse, AddCardRequest, AddCardResponse, ApiError, AuthResponse, Card,
    LoginRequest, NewTransferRequest, RegisterRequest, RejectResponse, RequestResponse,
    Transaction, TransferBody, TransferRequest, TransferResponse, User,
};
use crate::session::BearerToken;

pub type ApiResult<T> = Result<T, ApiError>;

/// Typed surface of the banking backend.
///
/// Every authenticated operation takes the caller's credential explicitly;
/// implementations never look it up on their own. No call is assumed to be
/// idempotent or retried.
#[async_trait]
pub trait BankGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    async fn user_profile(&self, token: &BearerToken) -> ApiResult<User>;

    async fn user_by_email(&self, token: &BearerToken, email: &str) -> ApiResult<User>;

    async fn accounts(&self, token: &BearerToken) -> ApiResult<Vec<Account>>;

    async fn account_details(&self, token: &BearerToken, account_id: i64) -> ApiResult<Account>;

    async fn accounts_by_user(&self, token: &BearerToken, user_id: i64) -> ApiResult<Vec<Account>>;

    async fn cards(&self, token: &BearerToken) -> ApiResult<Vec<Card>>;

    async fn add_card(
        &self,
        token: &BearerToken,
        request: &AddCardRequest,
    ) -> ApiResult<AddCardResponse>;

    async fn transactions(&self, token: &BearerToken) -> ApiResult<Vec<Transaction>>;

    async fn transfer(&self, token: &BearerToken, body: &TransferBody)
        -> ApiResult<TransferResponse>;

    async fn create_transfer_request(
        &self,
        token: &BearerToken,
        body: &NewTransferRequest,
    ) -> ApiResult<RequestResponse>;

    /// Pending incoming transfer requests for the authenticated user
    async fn transfer_requests(&self, token: &BearerToken) -> ApiResult<Vec<TransferRequest>>;

    async fn accept_transfer_request(
        &self,
        token: &BearerToken,
        request_id: i64,
    ) -> ApiResult<AcceptResponse>;

    async fn reject_transfer_request(
        &self,
        token: &BearerToken,
        request_id: i64,
    ) -> ApiResult<RejectResponse>;
}
