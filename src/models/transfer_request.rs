//! Incoming transfer request models: display rows, the per-item
//! confirmation state machine and the commit ticket.

use std::fmt;

use crate::api::TransferRequest;
use crate::utils::{description_or_placeholder, format_amount, format_created_at};

/// Display-ready view of a pending transfer request
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequestRow {
    pub id: i64,
    pub sender_name: String,
    pub sender_email: String,
    pub amount: String,
    pub description: String,
    pub date: String,
}

impl From<&TransferRequest> for TransferRequestRow {
    fn from(request: &TransferRequest) -> Self {
        Self {
            id: request.id,
            sender_name: request.sender_name.clone(),
            sender_email: request.sender_email.clone(),
            amount: format_amount(request.amount),
            description: description_or_placeholder(request.description.as_deref()).to_string(),
            date: format_created_at(&request.created_at),
        }
    }
}

/// The two terminal actions on a transfer request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Accept => "Accept",
            Decision::Reject => "Reject",
        }
    }

    /// First dialog: states the action, amount and sender
    pub fn first_prompt(&self, request: &TransferRequest) -> ConfirmationPrompt {
        let message = match self {
            Decision::Accept => format!(
                "Accept transfer of {} from {}?",
                format_amount(request.amount),
                request.sender_name
            ),
            Decision::Reject => format!("Reject transfer request from {}?", request.sender_name),
        };
        ConfirmationPrompt {
            title: format!("{} Transfer Request", self.label()),
            message,
            confirm_label: format!("Yes, {}", self.label()),
        }
    }

    /// Second dialog: stresses that the action cannot be undone
    pub fn second_prompt(&self, request: &TransferRequest) -> ConfirmationPrompt {
        let message = match self {
            Decision::Accept => format!(
                "This action cannot be undone!\n\nAre you absolutely sure you want to accept {} from {}?",
                format_amount(request.amount),
                request.sender_name
            ),
            Decision::Reject => {
                "This action cannot be undone!\n\nAre you absolutely sure you want to reject this transfer request?"
                    .to_string()
            }
        };
        ConfirmationPrompt {
            title: "Final Confirmation".to_string(),
            message,
            confirm_label: format!("Yes, Confirm {}", self.label()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text of a yes/no confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

/// Lifecycle of one request on screen.
///
/// `Pending -> FirstConfirmed -> Committing -> Removed`, with aborts and
/// failed commits falling back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    FirstConfirmed(Decision),
    Committing(Decision),
    Removed,
}

impl RequestState {
    pub fn confirm_first(self, decision: Decision) -> Option<Self> {
        match self {
            RequestState::Pending => Some(RequestState::FirstConfirmed(decision)),
            _ => None,
        }
    }

    pub fn confirm_second(self) -> Option<Self> {
        match self {
            RequestState::FirstConfirmed(decision) => Some(RequestState::Committing(decision)),
            _ => None,
        }
    }

    /// A declined dialog. Only meaningful before the commit starts.
    pub fn abort(self) -> Self {
        match self {
            RequestState::FirstConfirmed(_) => RequestState::Pending,
            other => other,
        }
    }

    pub fn settle(self, succeeded: bool) -> Self {
        match self {
            RequestState::Committing(_) if succeeded => RequestState::Removed,
            RequestState::Committing(_) => RequestState::Pending,
            other => other,
        }
    }

    pub fn is_committing(&self) -> bool {
        matches!(self, RequestState::Committing(_))
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Pending => f.write_str("pending"),
            RequestState::FirstConfirmed(d) => write!(f, "awaiting final confirmation to {}", d.label().to_lowercase()),
            RequestState::Committing(d) => write!(f, "being processed ({})", d.label().to_lowercase()),
            RequestState::Removed => f.write_str("already settled"),
        }
    }
}

/// Proof that both confirmations were given for one request.
///
/// Issued by the controller on the second confirmation and consumed by the
/// commit, so each confirmation round can reach the network at most once.
#[derive(Debug)]
pub struct CommitTicket {
    request: TransferRequest,
    decision: Decision,
}

impl CommitTicket {
    pub(crate) fn new(request: TransferRequest, decision: Decision) -> Self {
        Self { request, decision }
    }

    pub fn id(&self) -> i64 {
        self.request.id
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn request(&self) -> &TransferRequest {
        &self.request
    }
}
