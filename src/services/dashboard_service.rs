use tracing::{debug, warn};

use crate::api::models::{Account, Transaction};
use crate::api::BankGateway;
use crate::models::{BalanceView, DashboardSummary, Direction, TransactionLine};
use crate::session::SessionStore;
use crate::utils::ServiceError;

/// Load balance, card and recent transactions in one go.
///
/// The three fetches run concurrently. Account and transaction failures are
/// reported as warnings; a card failure only hides the card.
pub async fn load_dashboard(
    gateway: &dyn BankGateway,
    session: &SessionStore,
) -> Result<DashboardSummary, ServiceError> {
    let token = session.credential().ok_or(ServiceError::Unauthenticated)?;

    let (accounts, cards, transactions) = tokio::join!(
        gateway.accounts(&token),
        gateway.cards(&token),
        gateway.transactions(&token),
    );

    let mut summary = DashboardSummary::default();

    let accounts = match accounts {
        Ok(accounts) => accounts,
        Err(e) => {
            warn!("Failed to load accounts: {}", e);
            summary
                .warnings
                .push(format!("Failed to load accounts: {}", e.message()));
            Vec::new()
        }
    };
    summary.balance = accounts.first().map(|account| BalanceView {
        account_id: account.id,
        currency: account.currency.clone(),
        amount: account.balance,
    });

    summary.card_last4 = match cards {
        Ok(cards) => cards.into_iter().next().map(|card| card.card_last4),
        Err(e) => {
            debug!("Card lookup failed, hiding card: {}", e);
            None
        }
    };

    match transactions {
        Ok(transactions) => {
            summary.transactions = transaction_lines(&accounts, &transactions);
        }
        Err(e) => {
            warn!("Failed to load transactions: {}", e);
            summary
                .warnings
                .push(format!("Error loading transactions: {}", e.message()));
        }
    }

    Ok(summary)
}

/// Sign each transaction relative to the primary (first) account.
///
/// Only money landing in the primary account counts as incoming, including
/// transfers from the user's other accounts.
pub fn transaction_lines(accounts: &[Account], transactions: &[Transaction]) -> Vec<TransactionLine> {
    let primary = accounts.first();
    let primary_id = primary.map(|a| a.id);
    let currency = primary.map(|a| a.currency.clone()).unwrap_or_default();

    transactions
        .iter()
        .map(|tx| {
            let direction = if primary_id == Some(tx.to_account_id) {
                Direction::Incoming
            } else {
                Direction::Outgoing
            };
            let label = match tx.description.as_deref() {
                Some(text) if !text.trim().is_empty() => text.to_string(),
                _ => match direction {
                    Direction::Incoming => "Transfer received".to_string(),
                    Direction::Outgoing => "Transfer sent".to_string(),
                },
            };
            TransactionLine {
                id: tx.id,
                label,
                amount: tx.amount,
                currency: currency.clone(),
                direction,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64) -> Account {
        Account {
            id,
            user_id: 1,
            account_type: "checking".to_string(),
            balance: 100.0,
            currency: "TND".to_string(),
            rib: format!("RIB{}", id),
        }
    }

    fn tx(id: i64, from: i64, to: i64, description: Option<&str>) -> Transaction {
        Transaction {
            id,
            from_account_id: from,
            to_account_id: to,
            amount: 25.0,
            description: description.map(str::to_string),
            created_at: "2024-05-01T10:00:00".to_string(),
        }
    }

    #[test]
    fn test_direction_and_labels() {
        let lines = transaction_lines(
            &[account(10), account(11)],
            &[
                tx(1, 99, 10, None),
                tx(2, 10, 99, Some("groceries")),
                tx(3, 11, 10, Some("savings top-up")),
                tx(4, 10, 11, None),
            ],
        );
        assert_eq!(lines[0].direction, Direction::Incoming);
        assert_eq!(lines[0].label, "Transfer received");
        assert_eq!(lines[0].display_amount(), "+25.00 TND");
        assert_eq!(lines[1].direction, Direction::Outgoing);
        assert_eq!(lines[1].label, "groceries");
        assert_eq!(lines[1].display_amount(), "-25.00 TND");
        // Between the user's own accounts the primary account decides the sign
        assert_eq!(lines[2].direction, Direction::Incoming);
        assert_eq!(lines[2].display_amount(), "+25.00 TND");
        assert_eq!(lines[3].direction, Direction::Outgoing);
        assert_eq!(lines[3].label, "Transfer sent");
    }
}
