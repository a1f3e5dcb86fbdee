#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use bank_app::api::models::{
    Account, AcceptResponse, AddCardRequest, AddCardResponse, AuthResponse, Card, LoginRequest,
    NewTransferRequest, RegisterRequest, RejectResponse, RequestResponse, Transaction,
    TransferBody, TransferRequest, TransferResponse, User,
};
use bank_app::api::{ApiError, ApiResult, BankGateway};
use bank_app::models::ConfirmationPrompt;
use bank_app::session::{BearerToken, Session, SessionStore};
use bank_app::Confirmer;

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    List(String),
    Accept(String, i64),
    Reject(String, i64),
}

/// In-memory gateway with scripted answers and a call log.
///
/// Queued answers are consumed in order. When the list queue runs dry the
/// last served list is repeated; accept/reject without a scripted answer
/// fail with a 500, every other operation with a 404. Bodies sent to the
/// write operations are kept for inspection.
#[derive(Default)]
pub struct MockGateway {
    lists: Mutex<VecDeque<ApiResult<Vec<TransferRequest>>>>,
    last_list: Mutex<Vec<TransferRequest>>,
    accepts: Mutex<VecDeque<ApiResult<AcceptResponse>>>,
    rejects: Mutex<VecDeque<ApiResult<RejectResponse>>>,
    logins: Mutex<VecDeque<ApiResult<AuthResponse>>>,
    registers: Mutex<VecDeque<ApiResult<AuthResponse>>>,
    users_by_email: Mutex<VecDeque<ApiResult<User>>>,
    accounts: Mutex<VecDeque<ApiResult<Vec<Account>>>>,
    user_accounts: Mutex<VecDeque<ApiResult<Vec<Account>>>>,
    cards: Mutex<VecDeque<ApiResult<Vec<Card>>>>,
    added_cards: Mutex<VecDeque<ApiResult<AddCardResponse>>>,
    transactions: Mutex<VecDeque<ApiResult<Vec<Transaction>>>>,
    transfers: Mutex<VecDeque<ApiResult<TransferResponse>>>,
    offers: Mutex<VecDeque<ApiResult<RequestResponse>>>,
    pub sent_registrations: Mutex<Vec<RegisterRequest>>,
    pub sent_cards: Mutex<Vec<AddCardRequest>>,
    pub sent_transfers: Mutex<Vec<TransferBody>>,
    pub sent_offers: Mutex<Vec<NewTransferRequest>>,
    calls: Mutex<Vec<Call>>,
    /// When set, accept/reject signal `commit_started` and then wait here
    commit_gate: Option<Arc<Notify>>,
    pub commit_started: Arc<Notify>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits block until the returned handle is notified
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let gateway = Self {
            commit_gate: Some(gate.clone()),
            ..Self::default()
        };
        (gateway, gate)
    }

    pub fn push_list(&self, result: ApiResult<Vec<TransferRequest>>) {
        self.lists.lock().unwrap().push_back(result);
    }

    pub fn push_accept(&self, result: ApiResult<AcceptResponse>) {
        self.accepts.lock().unwrap().push_back(result);
    }

    pub fn push_reject(&self, result: ApiResult<RejectResponse>) {
        self.rejects.lock().unwrap().push_back(result);
    }

    pub fn push_login(&self, result: ApiResult<AuthResponse>) {
        self.logins.lock().unwrap().push_back(result);
    }

    pub fn push_register(&self, result: ApiResult<AuthResponse>) {
        self.registers.lock().unwrap().push_back(result);
    }

    pub fn push_user_by_email(&self, result: ApiResult<User>) {
        self.users_by_email.lock().unwrap().push_back(result);
    }

    pub fn push_accounts(&self, result: ApiResult<Vec<Account>>) {
        self.accounts.lock().unwrap().push_back(result);
    }

    pub fn push_user_accounts(&self, result: ApiResult<Vec<Account>>) {
        self.user_accounts.lock().unwrap().push_back(result);
    }

    pub fn push_cards(&self, result: ApiResult<Vec<Card>>) {
        self.cards.lock().unwrap().push_back(result);
    }

    pub fn push_add_card(&self, result: ApiResult<AddCardResponse>) {
        self.added_cards.lock().unwrap().push_back(result);
    }

    pub fn push_transactions(&self, result: ApiResult<Vec<Transaction>>) {
        self.transactions.lock().unwrap().push_back(result);
    }

    pub fn push_transfer(&self, result: ApiResult<TransferResponse>) {
        self.transfers.lock().unwrap().push_back(result);
    }

    pub fn push_offer(&self, result: ApiResult<RequestResponse>) {
        self.offers.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.commit_gate {
            self.commit_started.notify_one();
            gate.notified().await;
        }
    }
}

fn unscripted<T>(what: &str) -> ApiResult<T> {
    Err(ApiError::NotFound(format!("{} not scripted", what)))
}

fn next<T>(queue: &Mutex<VecDeque<ApiResult<T>>>, what: &str) -> ApiResult<T> {
    let scripted = queue.lock().unwrap().pop_front();
    scripted.unwrap_or_else(|| unscripted(what))
}

#[async_trait]
impl BankGateway for MockGateway {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.record(Call::Login(request.email.clone()));
        self.logins
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| unscripted("login"))
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.sent_registrations.lock().unwrap().push(request.clone());
        next(&self.registers, "register")
    }

    async fn user_profile(&self, _token: &BearerToken) -> ApiResult<User> {
        unscripted("user_profile")
    }

    async fn user_by_email(&self, _token: &BearerToken, email: &str) -> ApiResult<User> {
        match next(&self.users_by_email, "user_by_email") {
            Ok(user) if user.email == email => Ok(user),
            Ok(user) => Err(ApiError::NotFound(format!("asked for {}, scripted {}", email, user.email))),
            Err(e) => Err(e),
        }
    }

    async fn accounts(&self, _token: &BearerToken) -> ApiResult<Vec<Account>> {
        next(&self.accounts, "accounts")
    }

    async fn account_details(&self, _token: &BearerToken, _account_id: i64) -> ApiResult<Account> {
        unscripted("account_details")
    }

    async fn accounts_by_user(&self, _token: &BearerToken, user_id: i64) -> ApiResult<Vec<Account>> {
        next(&self.user_accounts, "accounts_by_user")
            .map(|accounts| accounts.into_iter().filter(|a| a.user_id == user_id).collect())
    }

    async fn cards(&self, _token: &BearerToken) -> ApiResult<Vec<Card>> {
        next(&self.cards, "cards")
    }

    async fn add_card(
        &self,
        _token: &BearerToken,
        request: &AddCardRequest,
    ) -> ApiResult<AddCardResponse> {
        self.sent_cards.lock().unwrap().push(request.clone());
        next(&self.added_cards, "add_card")
    }

    async fn transactions(&self, _token: &BearerToken) -> ApiResult<Vec<Transaction>> {
        next(&self.transactions, "transactions")
    }

    async fn transfer(&self, _token: &BearerToken, body: &TransferBody) -> ApiResult<TransferResponse> {
        self.sent_transfers.lock().unwrap().push(body.clone());
        next(&self.transfers, "transfer")
    }

    async fn create_transfer_request(
        &self,
        _token: &BearerToken,
        body: &NewTransferRequest,
    ) -> ApiResult<RequestResponse> {
        self.sent_offers.lock().unwrap().push(body.clone());
        next(&self.offers, "create_transfer_request")
    }

    async fn transfer_requests(&self, token: &BearerToken) -> ApiResult<Vec<TransferRequest>> {
        self.record(Call::List(token.as_str().to_string()));
        let next = self.lists.lock().unwrap().pop_front();
        match next {
            Some(Ok(items)) => {
                *self.last_list.lock().unwrap() = items.clone();
                Ok(items)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last_list.lock().unwrap().clone()),
        }
    }

    async fn accept_transfer_request(
        &self,
        token: &BearerToken,
        request_id: i64,
    ) -> ApiResult<AcceptResponse> {
        self.record(Call::Accept(token.as_str().to_string(), request_id));
        self.wait_for_gate().await;
        self.accepts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::ServerError(500, "accept not scripted".to_string())))
    }

    async fn reject_transfer_request(
        &self,
        token: &BearerToken,
        request_id: i64,
    ) -> ApiResult<RejectResponse> {
        self.record(Call::Reject(token.as_str().to_string(), request_id));
        self.wait_for_gate().await;
        self.rejects
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::ServerError(500, "reject not scripted".to_string())))
    }
}

/// Answers dialogs from a fixed script; runs out as "no"
#[derive(Default)]
pub struct ScriptedConfirmer {
    answers: VecDeque<bool>,
    pub prompts: Vec<ConfirmationPrompt>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            prompts: Vec::new(),
        }
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool {
        self.prompts.push(prompt.clone());
        self.answers.pop_front().unwrap_or(false)
    }
}

pub fn signed_in() -> Arc<SessionStore> {
    Arc::new(SessionStore::in_memory(Some(Session {
        token: "tok-123".to_string(),
        user_id: 4,
        email: "leila@bank.tn".to_string(),
        name: "Leila Trabelsi".to_string(),
    })))
}

pub fn signed_out() -> Arc<SessionStore> {
    Arc::new(SessionStore::in_memory(None))
}

pub fn request(id: i64, sender: &str, amount: f64) -> TransferRequest {
    TransferRequest {
        id,
        sender_name: sender.to_string(),
        sender_email: format!("{}@bank.tn", sender.to_lowercase()),
        amount,
        description: Some(format!("From {}", sender)),
        created_at: "2024-03-01T09:15:00".to_string(),
    }
}

pub fn account(id: i64, user_id: i64, balance: f64) -> Account {
    Account {
        id,
        user_id,
        account_type: "checking".to_string(),
        balance,
        currency: "TND".to_string(),
        rib: format!("TN59{:016}", id),
    }
}

pub fn user(id: i64, first: &str, last: &str, email: &str) -> User {
    User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: None,
        status: "active".to_string(),
        created_at: "2024-01-01T00:00:00".to_string(),
    }
}
