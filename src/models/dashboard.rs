//! Home dashboard models

use crate::utils::format_amount;

/// Balance of the primary (first) account
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceView {
    pub account_id: i64,
    pub currency: String,
    pub amount: f64,
}

impl BalanceView {
    pub fn display(&self, visible: bool) -> String {
        if visible {
            format!("{} {}", self.currency, format_amount(self.amount))
        } else {
            format!("{} ••••", self.currency)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// One line of the recent-transactions list
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionLine {
    pub id: i64,
    pub label: String,
    pub amount: f64,
    pub currency: String,
    pub direction: Direction,
}

impl TransactionLine {
    /// Signed amount, e.g. `+12.00 TND` or `-3.50 TND`
    pub fn display_amount(&self) -> String {
        let sign = match self.direction {
            Direction::Incoming => '+',
            Direction::Outgoing => '-',
        };
        format!("{}{} {}", sign, format_amount(self.amount.abs()), self.currency)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub balance: Option<BalanceView>,
    pub card_last4: Option<String>,
    pub transactions: Vec<TransactionLine>,
    /// Non-fatal load failures to show alongside the data
    pub warnings: Vec<String>,
}

impl DashboardSummary {
    pub fn card_display(&self) -> String {
        match &self.card_last4 {
            Some(last4) => format!("•••• •••• •••• {}", last4),
            None => "No card linked".to_string(),
        }
    }
}
