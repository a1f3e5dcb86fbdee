pub mod client;
pub mod gateway;
pub mod models;

pub use client::BankApiClient;
pub use gateway::{ApiResult, BankGateway};
pub use models::{ApiError, TransferRequest};
