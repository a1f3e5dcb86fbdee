use tracing::{debug, info, warn};

use crate::api::models::AddCardRequest;
use crate::api::BankGateway;
use crate::models::{CardView, Notice};
use crate::session::SessionStore;
use crate::utils::ServiceError;

/// Raw add-card input, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct NewCardForm {
    pub holder: String,
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
}

pub async fn list_cards(
    gateway: &dyn BankGateway,
    session: &SessionStore,
) -> Result<Vec<CardView>, ServiceError> {
    let token = session.credential().ok_or(ServiceError::Unauthenticated)?;

    let cards = gateway.cards(&token).await.map_err(|e| {
        warn!("Failed to load cards: {}", e);
        e
    })?;
    debug!("Cards received: {}", cards.len());

    Ok(cards.iter().map(CardView::from).collect())
}

pub async fn add_card(
    gateway: &dyn BankGateway,
    session: &SessionStore,
    form: &NewCardForm,
) -> Result<Notice, ServiceError> {
    let request = validate_card(form)?;
    let token = session.credential().ok_or(ServiceError::Unauthenticated)?;

    info!("Adding card for {}", request.card_holder_name);
    let response = gateway.add_card(&token, &request).await.map_err(|e| {
        warn!("Failed to add card: {}", e);
        e
    })?;
    debug!("Card {} added, last4 {}", response.card_id, response.card_last4);

    Ok(Notice::success(format!(
        "Card added successfully! (•••• {})",
        response.card_last4
    )))
}

pub fn validate_card(form: &NewCardForm) -> Result<AddCardRequest, ServiceError> {
    let holder = form.holder.trim();
    let number = form.number.trim();
    let month = form.expiry_month.trim();
    let year = form.expiry_year.trim();
    let cvv = form.cvv.trim();

    if holder.is_empty() || number.is_empty() || month.is_empty() || year.is_empty() || cvv.is_empty() {
        return Err(ServiceError::Validation("Please fill all fields".to_string()));
    }
    if number.len() != 16 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ServiceError::Validation(
            "Card number must be 16 digits".to_string(),
        ));
    }
    let expiry_month = month
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| ServiceError::Validation("Invalid expiry month (1-12)".to_string()))?;
    let expiry_year = year
        .parse::<u32>()
        .map_err(|_| ServiceError::Validation("Invalid expiry year".to_string()))?;
    if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ServiceError::Validation("CVV must be 3 digits".to_string()));
    }

    Ok(AddCardRequest {
        card_holder_name: holder.to_string(),
        card_number: number.to_string(),
        expiry_month,
        expiry_year,
        cvv: cvv.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewCardForm {
        NewCardForm {
            holder: "Nour Haddad".to_string(),
            number: "4000123412341234".to_string(),
            expiry_month: "09".to_string(),
            expiry_year: "2028".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn validation_message(form: &NewCardForm) -> String {
        match validate_card(form) {
            Err(ServiceError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_card() {
        let request = validate_card(&form()).unwrap();
        assert_eq!(request.expiry_month, 9);
        assert_eq!(request.expiry_year, 2028);
    }

    #[test]
    fn test_card_rules() {
        let mut f = form();
        f.cvv.clear();
        assert_eq!(validation_message(&f), "Please fill all fields");

        let mut f = form();
        f.number = "4000 1234".to_string();
        assert_eq!(validation_message(&f), "Card number must be 16 digits");

        let mut f = form();
        f.expiry_month = "13".to_string();
        assert_eq!(validation_message(&f), "Invalid expiry month (1-12)");

        let mut f = form();
        f.expiry_year = "20x8".to_string();
        assert_eq!(validation_message(&f), "Invalid expiry year");

        let mut f = form();
        f.cvv = "12a".to_string();
        assert_eq!(validation_message(&f), "CVV must be 3 digits");
    }
}
