use crate::models::Notice;
use crate::session::SessionStore;
use crate::utils::ServiceError;

const DEFAULT_NAME: &str = "User";
const DEFAULT_EMAIL: &str = "user@example.com";

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
}

/// Profile fields kept in the session; placeholders when signed out
pub fn profile(session: &SessionStore) -> ProfileView {
    match session.current() {
        Some(s) => ProfileView {
            name: if s.name.trim().is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                s.name
            },
            email: if s.email.trim().is_empty() {
                DEFAULT_EMAIL.to_string()
            } else {
                s.email
            },
        },
        None => ProfileView {
            name: DEFAULT_NAME.to_string(),
            email: DEFAULT_EMAIL.to_string(),
        },
    }
}

pub fn logout(session: &SessionStore) -> Result<Notice, ServiceError> {
    session.end()?;
    Ok(Notice::success("Logged out successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_placeholders_when_signed_out() {
        let store = SessionStore::in_memory(None);
        let view = profile(&store);
        assert_eq!(view.name, "User");
        assert_eq!(view.email, "user@example.com");
    }

    #[test]
    fn test_logout_clears_session() {
        let store = SessionStore::in_memory(Some(Session {
            token: "t".to_string(),
            user_id: 1,
            email: "rim@bank.tn".to_string(),
            name: "Rim Jaziri".to_string(),
        }));
        assert_eq!(profile(&store).name, "Rim Jaziri");

        let notice = logout(&store).unwrap();
        assert_eq!(notice.message, "Logged out successfully");
        assert!(!store.is_authenticated());
    }
}
