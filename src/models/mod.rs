//! Display and state models for the client's screens
//!
//! Wire types live in `api::models`; everything here is derived from them
//! for presentation or for tracking local state.

pub mod card;
pub mod dashboard;
pub mod notice;
pub mod request_list;
pub mod transfer_request;

// Re-export commonly used types for convenience
pub use card::{CardStatus, CardView};
pub use dashboard::{BalanceView, DashboardSummary, Direction, TransactionLine};
pub use notice::{Notice, NoticeKind};
pub use request_list::{ListChange, RequestList};
pub use transfer_request::{
    CommitTicket, ConfirmationPrompt, Decision, RequestState, TransferRequestRow,
};
