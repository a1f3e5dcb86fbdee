//! Incoming transfer requests: fetch, display, and the accept/reject flow.
//!
//! Both decisions move money irreversibly once the backend processes them,
//! so each one goes through two confirmations before the network is touched.
//! The working list is only a view: a refresh always supersedes it, and a
//! settled decision removes the entry by id without waiting for a refresh.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::api::{BankGateway, TransferRequest};
use crate::models::{
    CommitTicket, ConfirmationPrompt, Decision, ListChange, Notice, RequestList, RequestState,
    TransferRequestRow,
};
use crate::session::{BearerToken, SessionStore};
use crate::utils::{format_amount, ServiceError};

/// Answers yes/no dialogs on behalf of the user
#[async_trait]
pub trait Confirmer: Send {
    async fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool;
}

#[derive(Default)]
struct ControllerState {
    list: RequestList,
    // Only non-Pending items are tracked; anything listed without an entry is Pending.
    states: HashMap<i64, RequestState>,
}

impl ControllerState {
    fn state_of(&self, id: i64) -> Option<RequestState> {
        match self.states.get(&id) {
            Some(state) => Some(*state),
            None if self.list.contains(id) => Some(RequestState::Pending),
            None => None,
        }
    }
}

pub struct TransferRequestController {
    gateway: Arc<dyn BankGateway>,
    session: Arc<SessionStore>,
    state: Mutex<ControllerState>,
}

impl TransferRequestController {
    pub fn new(gateway: Arc<dyn BankGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: Mutex::new(ControllerState::default()),
        }
    }

    fn credential(&self) -> Result<BearerToken, ServiceError> {
        self.session.credential().ok_or(ServiceError::Unauthenticated)
    }

    /// Subscribe to list mutations (for renderers)
    pub async fn subscribe(&self) -> broadcast::Receiver<ListChange> {
        self.state.lock().await.list.subscribe()
    }

    pub async fn snapshot(&self) -> Vec<TransferRequest> {
        self.state.lock().await.list.items().to_vec()
    }

    pub async fn rows(&self) -> Vec<TransferRequestRow> {
        self.state
            .lock()
            .await
            .list
            .items()
            .iter()
            .map(TransferRequestRow::from)
            .collect()
    }

    pub async fn state_of(&self, id: i64) -> Option<RequestState> {
        self.state.lock().await.state_of(id)
    }

    /// Replace the working list with the server's pending requests.
    ///
    /// On failure the previous list is kept as is.
    pub async fn refresh(&self) -> Result<Notice, ServiceError> {
        let token = self.credential()?;

        let items = match self.gateway.transfer_requests(&token).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to fetch transfer requests: {}", e);
                return Err(e.into());
            }
        };

        let count = {
            let mut state = self.state.lock().await;
            // In-flight commits keep their state; everything else starts over as Pending.
            state.states.retain(|_, s| s.is_committing());
            let version = state.list.replace(items);
            debug!("Transfer request list replaced (version {}, {} items)", version, state.list.len());
            state.list.len()
        };

        info!("Fetched {} pending transfer request(s)", count);
        Ok(if count == 0 {
            Notice::info("No transfer requests")
        } else {
            Notice::info(format!("You have {} pending transfer request(s)", count))
        })
    }

    /// Look up a listed request that is free for a new decision
    async fn pending_request(&self, id: i64) -> Result<TransferRequest, ServiceError> {
        let state = self.state.lock().await;
        let request = state
            .list
            .get(id)
            .cloned()
            .ok_or(ServiceError::UnknownRequest(id))?;
        match state.state_of(id) {
            Some(RequestState::Pending) => Ok(request),
            Some(other) => Err(ServiceError::InvalidState { id, state: other }),
            None => Err(ServiceError::UnknownRequest(id)),
        }
    }

    /// Record that the first dialog was accepted
    pub async fn confirm_first(
        &self,
        id: i64,
        decision: Decision,
    ) -> Result<TransferRequest, ServiceError> {
        let mut state = self.state.lock().await;
        let request = state
            .list
            .get(id)
            .cloned()
            .ok_or(ServiceError::UnknownRequest(id))?;
        let current = state.state_of(id).unwrap_or(RequestState::Pending);
        let next = current
            .confirm_first(decision)
            .ok_or(ServiceError::InvalidState { id, state: current })?;
        state.states.insert(id, next);
        debug!("Transfer request {}: {} -> {}", id, current, next);
        Ok(request)
    }

    /// Record that the final dialog was accepted and hand out the commit ticket
    pub async fn confirm_second(&self, id: i64) -> Result<CommitTicket, ServiceError> {
        let mut state = self.state.lock().await;
        // A refresh between the two dialogs resets or drops the first confirmation.
        let current = match state.state_of(id) {
            None | Some(RequestState::Pending) => return Err(list_changed()),
            Some(current) => current,
        };
        let next = current
            .confirm_second()
            .ok_or(ServiceError::InvalidState { id, state: current })?;

        let Some(request) = state.list.get(id).cloned() else {
            // Superseded by a refresh between the two dialogs.
            state.states.remove(&id);
            return Err(list_changed());
        };
        let RequestState::Committing(decision) = next else {
            return Err(ServiceError::InvalidState { id, state: next });
        };

        state.states.insert(id, next);
        debug!("Transfer request {}: {} -> {}", id, current, next);
        Ok(CommitTicket::new(request, decision))
    }

    /// A dialog was declined: back to Pending, nothing else changes
    pub async fn abort(&self, id: i64) {
        let mut state = self.state.lock().await;
        if let Some(current) = state.states.get(&id).copied() {
            let next = current.abort();
            if next == RequestState::Pending {
                state.states.remove(&id);
            } else {
                state.states.insert(id, next);
            }
        }
    }

    pub async fn request_accept<C: Confirmer + ?Sized>(
        &self,
        id: i64,
        confirmer: &mut C,
    ) -> Result<Notice, ServiceError> {
        self.request_decision(id, Decision::Accept, confirmer).await
    }

    pub async fn request_reject<C: Confirmer + ?Sized>(
        &self,
        id: i64,
        confirmer: &mut C,
    ) -> Result<Notice, ServiceError> {
        self.request_decision(id, Decision::Reject, confirmer).await
    }

    /// Run both dialogs, then commit. Declining either one has no side effect.
    async fn request_decision<C: Confirmer + ?Sized>(
        &self,
        id: i64,
        decision: Decision,
        confirmer: &mut C,
    ) -> Result<Notice, ServiceError> {
        let request = self.pending_request(id).await?;

        if !confirmer.confirm(&decision.first_prompt(&request)).await {
            debug!("Transfer request {}: first confirmation declined", id);
            return Ok(Notice::info("Cancelled"));
        }
        let request = self.confirm_first(id, decision).await?;

        if !confirmer.confirm(&decision.second_prompt(&request)).await {
            debug!("Transfer request {}: final confirmation declined", id);
            self.abort(id).await;
            return Ok(Notice::info("Cancelled"));
        }
        let ticket = self.confirm_second(id).await?;

        match decision {
            Decision::Accept => self.commit_accept(ticket).await,
            Decision::Reject => self.commit_reject(ticket).await,
        }
    }

    pub async fn commit_accept(&self, ticket: CommitTicket) -> Result<Notice, ServiceError> {
        self.commit(ticket, Decision::Accept).await
    }

    pub async fn commit_reject(&self, ticket: CommitTicket) -> Result<Notice, ServiceError> {
        self.commit(ticket, Decision::Reject).await
    }

    async fn commit(&self, ticket: CommitTicket, expected: Decision) -> Result<Notice, ServiceError> {
        let id = ticket.id();
        if ticket.decision() != expected {
            // The ticket is spent either way; release the item so it can be decided again.
            self.settle(id, false).await;
            return Err(ServiceError::InvalidState {
                id,
                state: RequestState::Committing(ticket.decision()),
            });
        }

        let token = match self.credential() {
            Ok(token) => token,
            Err(e) => {
                self.settle(id, false).await;
                return Err(e);
            }
        };

        info!(
            "Committing {} for transfer request {} from {}",
            expected,
            id,
            ticket.request().sender_email
        );
        let outcome = match expected {
            Decision::Accept => self
                .gateway
                .accept_transfer_request(&token, id)
                .await
                .map(|r| Notice::success(format!("Transfer accepted! {} received", format_amount(r.amount)))),
            Decision::Reject => self
                .gateway
                .reject_transfer_request(&token, id)
                .await
                .map(|_| Notice::success("Transfer request rejected")),
        };

        match outcome {
            Ok(notice) => {
                self.settle(id, true).await;
                info!("Transfer request {} settled ({})", id, expected);
                Ok(notice)
            }
            Err(e) => {
                warn!("Failed to {} transfer request {}: {}", expected.label().to_lowercase(), id, e);
                self.settle(id, false).await;
                Err(e.into())
            }
        }
    }

    async fn settle(&self, id: i64, succeeded: bool) {
        let mut state = self.state.lock().await;
        let current = state
            .states
            .get(&id)
            .copied()
            .unwrap_or(RequestState::Pending);
        match current.settle(succeeded) {
            RequestState::Removed => {
                // Settled items leave both the list and the state map.
                state.states.remove(&id);
                if state.list.remove_by_id(id).is_none() {
                    debug!("Transfer request {} already gone from the list", id);
                }
            }
            RequestState::Pending => {
                state.states.remove(&id);
            }
            other => {
                state.states.insert(id, other);
            }
        }
    }
}

fn list_changed() -> ServiceError {
    ServiceError::Validation(
        "The transfer request list changed, please review it and try again".to_string(),
    )
}
