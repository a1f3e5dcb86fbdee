//! Banking client: a typed gateway to the bank's REST backend, a persistent
//! session, and the controllers behind each screen. The incoming
//! transfer-request flow (double confirmation, optimistic removal) lives in
//! [`services::TransferRequestController`].

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use api::{ApiError, BankApiClient, BankGateway};
pub use config::AppConfig;
pub use services::{Confirmer, TransferRequestController};
pub use session::{BearerToken, Session, SessionStore};
pub use utils::{AppError, ServiceError};
