pub mod auth;
pub mod cards;
pub mod console;
pub mod help;
pub mod home;
pub mod profile;
pub mod requests;
pub mod transfer;

use std::sync::Arc;

use tracing::{debug, error};

use crate::api::BankGateway;
use crate::config::AppConfig;
use crate::models::Notice;
use crate::services::{Confirmer, TransferRequestController};
use crate::session::SessionStore;
use crate::utils::ServiceError;

pub use console::Console;

/// Everything a command needs, shared for the life of the process
pub struct AppContext {
    pub gateway: Arc<dyn BankGateway>,
    pub session: Arc<SessionStore>,
    pub requests: TransferRequestController,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(gateway: Arc<dyn BankGateway>, session: Arc<SessionStore>, config: AppConfig) -> Self {
        let requests = TransferRequestController::new(gateway.clone(), session.clone());
        Self {
            gateway,
            session,
            requests,
            config,
        }
    }
}

/// What the input loop should do after a line
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub type CommandResult = Result<String, ServiceError>;

/// Parse one input line and run the matching command.
///
/// Command errors never escape: they become an error notice in the output.
pub async fn handle_line<C: Confirmer + ?Sized>(
    ctx: &AppContext,
    line: &str,
    confirmer: &mut C,
) -> Flow {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Flow::Continue(String::new());
    };
    debug!("Command {} with {} arg(s)", command, args.len());

    let result = match command {
        "help" | "?" => Ok(help::render()),
        "login" => auth::login(ctx, args).await,
        "signup" | "register" => auth::signup(ctx, args).await,
        "home" | "balance" => home::execute(ctx, args).await,
        "cards" | "card" => cards::execute(ctx, args).await,
        "send" | "transfer" => transfer::send(ctx, args).await,
        "offer" => transfer::offer(ctx, args).await,
        "requests" | "notifications" => requests::list(ctx).await,
        "accept" => requests::accept(ctx, args, confirmer).await,
        "reject" => requests::reject(ctx, args, confirmer).await,
        "profile" | "me" => Ok(profile::show(ctx)),
        "logout" => profile::logout(ctx),
        "quit" | "exit" => return Flow::Quit,
        other => Ok(Notice::error(format!("Unknown command '{}'. Type `help` for the list.", other)).to_string()),
    };

    match result {
        Ok(output) => Flow::Continue(output),
        Err(e) => {
            match &e {
                ServiceError::Session(inner) => error!("Session error in {}: {}", command, inner),
                other => debug!("Command {} failed: {}", command, other),
            }
            Flow::Continue(Notice::error(e.user_message()).to_string())
        }
    }
}

/// Parse a positive amount argument
pub(crate) fn parse_amount(raw: &str) -> Result<f64, ServiceError> {
    raw.parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| ServiceError::Validation(format!("Invalid amount '{}'", raw)))
}

pub(crate) fn parse_id(raw: Option<&&str>, what: &str) -> Result<i64, ServiceError> {
    let raw = raw.ok_or_else(|| ServiceError::Validation(format!("Please specify a {}", what)))?;
    raw.trim_start_matches('#')
        .parse::<i64>()
        .map_err(|_| ServiceError::Validation(format!("Invalid {} '{}'", what, raw)))
}

pub(crate) fn usage(text: &str) -> ServiceError {
    ServiceError::Validation(format!("Usage: {}", text))
}
