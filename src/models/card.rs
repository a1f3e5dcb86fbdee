//! Card display models

use std::fmt;

use crate::api::models::Card;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    Active,
    Blocked,
    Suspended,
    Expired,
    Other(String),
}

impl CardStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "active" => CardStatus::Active,
            "blocked" => CardStatus::Blocked,
            "suspended" => CardStatus::Suspended,
            "expired" => CardStatus::Expired,
            _ => CardStatus::Other(raw.to_string()),
        }
    }

    /// Whether the card can currently be used for payments
    pub fn is_usable(&self) -> bool {
        matches!(self, CardStatus::Active)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardStatus::Active => f.write_str("Active"),
            CardStatus::Blocked => f.write_str("Blocked"),
            CardStatus::Suspended => f.write_str("Suspended"),
            CardStatus::Expired => f.write_str("Expired"),
            CardStatus::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: i64,
    pub card_type: String,
    pub masked_number: String,
    pub holder: String,
    pub expiry: String,
    pub status: CardStatus,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            card_type: card.card_type.clone(),
            masked_number: format!("**** **** **** {}", card.card_last4),
            holder: card.card_holder_name.to_uppercase(),
            expiry: format!("{:02}/{:02}", card.expiry_month, card.expiry_year % 100),
            status: CardStatus::parse(&card.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_view_formatting() {
        let card = Card {
            id: 3,
            card_holder_name: "Nour Haddad".to_string(),
            card_last4: "9012".to_string(),
            card_mask: "**** **** **** 9012".to_string(),
            card_type: "VISA".to_string(),
            expiry_month: 4,
            expiry_year: 2027,
            status: "Suspended".to_string(),
        };
        let view = CardView::from(&card);
        assert_eq!(view.masked_number, "**** **** **** 9012");
        assert_eq!(view.holder, "NOUR HADDAD");
        assert_eq!(view.expiry, "04/27");
        assert_eq!(view.status, CardStatus::Suspended);
        assert!(!view.status.is_usable());
    }

    #[test]
    fn test_unknown_status_kept_verbatim() {
        assert_eq!(CardStatus::parse("pending_activation").to_string(), "pending_activation");
        assert_eq!(CardStatus::parse(" ACTIVE "), CardStatus::Active);
    }
}
