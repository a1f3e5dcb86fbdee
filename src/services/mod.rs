pub mod auth_service;
pub mod card_service;
pub mod dashboard_service;
pub mod profile_service;
pub mod transfer_request_service;
pub mod transfer_service;

pub use transfer_request_service::{Confirmer, TransferRequestController};
