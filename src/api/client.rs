use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::gateway::{ApiResult, BankGateway};
use super::models::{
    Account, AcceptResponse, AddCardRequest, AddCardResponse, ApiError, AuthResponse, Card,
    LoginRequest, NewTransferRequest, RegisterRequest, RejectResponse, RequestResponse,
    Transaction, TransferBody, TransferRequest, TransferResponse, User,
};
use crate::session::BearerToken;
use crate::utils::extract_clean_error;

/// REST client for the banking backend
pub struct BankApiClient {
    http_client: HttpClient,
    base_url: Url,
}

impl BankApiClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new client against `base_url` with the default timeout
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::RequestError(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::RequestError(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::RequestError("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Create default headers, with authorization when a token is given
    fn create_headers(&self, token: Option<&BearerToken>) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let auth_value = HeaderValue::from_str(&token.header_value())
                .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&BearerToken>,
    ) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        let headers = self.create_headers(token)?;
        debug!("{} {}", method, url.path());
        Ok(self.http_client.request(method, url).headers(headers))
    }

    /// Map a non-2xx response to an error, keeping the server's message
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_clean_error(&body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            ApiError::RequestError(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: &BearerToken,
    ) -> ApiResult<T> {
        let request = self.request(Method::GET, segments, Some(token))?;
        self.execute(request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&BearerToken>,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let mut request = self.request(Method::POST, segments, token)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }
}

#[async_trait]
impl BankGateway for BankApiClient {
    /// POST auth/login
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post(&["auth", "login"], None, Some(request)).await
    }

    /// POST auth/register
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.post(&["auth", "register"], None, Some(request)).await
    }

    /// GET users/profile
    async fn user_profile(&self, token: &BearerToken) -> ApiResult<User> {
        self.get(&["users", "profile"], token).await
    }

    /// GET users/email/{email}
    async fn user_by_email(&self, token: &BearerToken, email: &str) -> ApiResult<User> {
        self.get(&["users", "email", email], token).await
    }

    /// GET accounts
    async fn accounts(&self, token: &BearerToken) -> ApiResult<Vec<Account>> {
        self.get(&["accounts"], token).await
    }

    /// GET accounts/{accountId}
    async fn account_details(&self, token: &BearerToken, account_id: i64) -> ApiResult<Account> {
        let id = account_id.to_string();
        self.get(&["accounts", id.as_str()], token).await
    }

    /// GET accounts/user/{userId}
    async fn accounts_by_user(&self, token: &BearerToken, user_id: i64) -> ApiResult<Vec<Account>> {
        let id = user_id.to_string();
        self.get(&["accounts", "user", id.as_str()], token).await
    }

    /// GET cards
    async fn cards(&self, token: &BearerToken) -> ApiResult<Vec<Card>> {
        self.get(&["cards"], token).await
    }

    /// POST cards/add
    async fn add_card(
        &self,
        token: &BearerToken,
        request: &AddCardRequest,
    ) -> ApiResult<AddCardResponse> {
        self.post(&["cards", "add"], Some(token), Some(request)).await
    }

    /// GET transactions
    async fn transactions(&self, token: &BearerToken) -> ApiResult<Vec<Transaction>> {
        self.get(&["transactions"], token).await
    }

    /// POST transactions/transfer
    async fn transfer(
        &self,
        token: &BearerToken,
        body: &TransferBody,
    ) -> ApiResult<TransferResponse> {
        self.post(&["transactions", "transfer"], Some(token), Some(body)).await
    }

    /// POST transactions/request
    async fn create_transfer_request(
        &self,
        token: &BearerToken,
        body: &NewTransferRequest,
    ) -> ApiResult<RequestResponse> {
        self.post(&["transactions", "request"], Some(token), Some(body)).await
    }

    /// GET notifications/transfer-requests
    async fn transfer_requests(&self, token: &BearerToken) -> ApiResult<Vec<TransferRequest>> {
        self.get(&["notifications", "transfer-requests"], token).await
    }

    /// POST notifications/transfer-requests/{requestId}/accept
    async fn accept_transfer_request(
        &self,
        token: &BearerToken,
        request_id: i64,
    ) -> ApiResult<AcceptResponse> {
        let id = request_id.to_string();
        self.post::<(), _>(
            &["notifications", "transfer-requests", id.as_str(), "accept"],
            Some(token),
            None,
        )
        .await
    }

    /// POST notifications/transfer-requests/{requestId}/reject
    async fn reject_transfer_request(
        &self,
        token: &BearerToken,
        request_id: i64,
    ) -> ApiResult<RejectResponse> {
        let id = request_id.to_string();
        self.post::<(), _>(
            &["notifications", "transfer-requests", id.as_str(), "reject"],
            Some(token),
            None,
        )
        .await
    }
}
