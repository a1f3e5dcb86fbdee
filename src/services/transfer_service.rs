use tracing::{info, warn};

use crate::api::models::{NewTransferRequest, TransferBody};
use crate::api::BankGateway;
use crate::models::Notice;
use crate::session::SessionStore;
use crate::utils::{format_amount, ServiceError};

fn validate_amount(amount: f64) -> Result<(), ServiceError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ServiceError::Validation("Amount must be positive".to_string()));
    }
    Ok(())
}

/// Send money from one of the user's accounts to a RIB
pub async fn send_transfer(
    gateway: &dyn BankGateway,
    session: &SessionStore,
    from_account_id: i64,
    to_rib: &str,
    amount: f64,
    description: &str,
) -> Result<Notice, ServiceError> {
    validate_amount(amount)?;
    let to_rib = to_rib.trim();
    if to_rib.is_empty() {
        return Err(ServiceError::Validation("Recipient RIB is required".to_string()));
    }
    let token = session.credential().ok_or(ServiceError::Unauthenticated)?;

    let body = TransferBody {
        from_account_id,
        to_rib: to_rib.to_string(),
        amount,
        description: description.trim().to_string(),
    };
    let response = gateway.transfer(&token, &body).await.map_err(|e| {
        warn!("Transfer from account {} failed: {}", from_account_id, e);
        e
    })?;

    info!(
        "Transfer {} completed: {} to {}",
        response.transaction_id, response.amount, response.to_rib
    );
    Ok(Notice::success(format!(
        "Transfer of {} sent to {} (transaction #{})",
        format_amount(response.amount),
        response.to_rib,
        response.transaction_id
    )))
}

/// Offer money to another user by email.
///
/// The recipient gets a pending transfer request and decides whether to
/// accept it. The caller's first account pays; the recipient's first account
/// receives.
pub async fn offer_transfer(
    gateway: &dyn BankGateway,
    session: &SessionStore,
    recipient_email: &str,
    amount: f64,
    description: &str,
) -> Result<Notice, ServiceError> {
    validate_amount(amount)?;
    let recipient_email = recipient_email.trim();
    if recipient_email.is_empty() {
        return Err(ServiceError::Validation("Recipient email is required".to_string()));
    }
    let token = session.credential().ok_or(ServiceError::Unauthenticated)?;

    let recipient = gateway.user_by_email(&token, recipient_email).await?;
    if session
        .current()
        .is_some_and(|s| s.user_id == recipient.id)
    {
        return Err(ServiceError::Validation(
            "Cannot send a transfer request to yourself".to_string(),
        ));
    }

    let (own_accounts, recipient_accounts) = tokio::join!(
        gateway.accounts(&token),
        gateway.accounts_by_user(&token, recipient.id),
    );
    let from_account = own_accounts?
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Validation("You have no account to pay from".to_string()))?;
    let to_account = recipient_accounts?
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Validation(format!("{} has no account", recipient_email)))?;

    let body = NewTransferRequest {
        to_user_id: recipient.id,
        from_account_id: from_account.id,
        to_account_id: to_account.id,
        amount,
        description: description.trim().to_string(),
    };
    let response = gateway.create_transfer_request(&token, &body).await.map_err(|e| {
        warn!("Creating transfer request for {} failed: {}", recipient_email, e);
        e
    })?;

    info!("Transfer request {} created for user {}", response.request_id, recipient.id);
    Ok(Notice::success(format!(
        "Transfer request #{} of {} sent to {} {}",
        response.request_id,
        format_amount(amount),
        recipient.first_name,
        recipient.last_name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_must_be_positive() {
        assert!(validate_amount(10.0).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
    }
}
