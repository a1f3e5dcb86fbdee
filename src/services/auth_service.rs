use tracing::{info, warn};

use crate::api::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::api::BankGateway;
use crate::models::Notice;
use crate::session::{Session, SessionStore};
use crate::utils::ServiceError;

const MIN_PASSWORD_LEN: usize = 4;

/// Raw signup input, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign in and start a session
pub async fn login(
    gateway: &dyn BankGateway,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Notice, ServiceError> {
    let email = email.trim();
    let password = password.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ServiceError::Validation(
            "Please enter your email and password".to_string(),
        ));
    }

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let response = gateway.login(&request).await.map_err(|e| {
        warn!("Login failed for {}: {}", email, e);
        e
    })?;

    let user = begin_session(session, response, "Login failed")?;
    info!("User {} logged in", user.user_id);
    Ok(Notice::success("Login successful!"))
}

/// Create an account and start a session with it
pub async fn register(
    gateway: &dyn BankGateway,
    session: &SessionStore,
    form: &RegistrationForm,
) -> Result<Notice, ServiceError> {
    let request = validate_registration(form)?;

    let response = gateway.register(&request).await.map_err(|e| {
        warn!("Registration failed for {}: {}", request.email, e);
        e
    })?;

    let user = begin_session(session, response, "Registration failed")?;
    info!("User {} registered", user.user_id);
    Ok(Notice::success("Account created successfully!"))
}

fn begin_session(
    session: &SessionStore,
    response: AuthResponse,
    fallback: &str,
) -> Result<Session, ServiceError> {
    let token = match response.token {
        Some(token) if !token.trim().is_empty() => token,
        _ => {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            return Err(ServiceError::Validation(message));
        }
    };

    let new_session = Session {
        token,
        user_id: response.user_id,
        email: response.email,
        name: format!("{} {}", response.first_name, response.last_name),
    };
    session.begin(new_session.clone())?;
    Ok(new_session)
}

pub fn validate_registration(form: &RegistrationForm) -> Result<RegisterRequest, ServiceError> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = form.email.trim();
    let phone = form.phone.trim();
    let password = form.password.trim();
    let confirm_password = form.confirm_password.trim();

    if first_name.is_empty() || last_name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ServiceError::Validation(
            "Please fill all required fields".to_string(),
        ));
    }
    if !is_valid_email(email) {
        return Err(ServiceError::Validation("Invalid email format".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password != confirm_password {
        return Err(ServiceError::Validation("Passwords don't match".to_string()));
    }

    Ok(RegisterRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: if phone.is_empty() {
            None
        } else {
            Some(phone.to_string())
        },
        password: password.to_string(),
    })
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2 && !host.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: " Amine ".to_string(),
            last_name: "Gharbi".to_string(),
            email: "amine@bank.tn".to_string(),
            phone: String::new(),
            password: "s3cret".to_string(),
            confirm_password: "s3cret".to_string(),
        }
    }

    #[test]
    fn test_valid_form_builds_request() {
        let request = validate_registration(&form()).unwrap();
        assert_eq!(request.first_name, "Amine");
        assert_eq!(request.phone, None);
    }

    #[test]
    fn test_registration_rules() {
        let mut f = form();
        f.last_name.clear();
        assert!(matches!(validate_registration(&f), Err(ServiceError::Validation(m)) if m.contains("required")));

        let mut f = form();
        f.email = "amine.bank.tn".to_string();
        assert!(matches!(validate_registration(&f), Err(ServiceError::Validation(m)) if m == "Invalid email format"));

        let mut f = form();
        f.password = "abc".to_string();
        f.confirm_password = "abc".to_string();
        assert!(matches!(validate_registration(&f), Err(ServiceError::Validation(m)) if m.contains("at least 4")));

        let mut f = form();
        f.confirm_password = "other".to_string();
        assert!(matches!(validate_registration(&f), Err(ServiceError::Validation(m)) if m == "Passwords don't match"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.tn"));
        assert!(is_valid_email("first.last+tag@mail.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.tn"));
        assert!(!is_valid_email("a@@b.tn"));
        assert!(!is_valid_email("a b@c.tn"));
    }
}
