use serde::{Deserialize, Serialize};

use crate::domain::{errors::ValidationError, value_objects::Role};

/// Unique identifier for users (database BIGSERIAL)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// An account able to open sessions.
///
/// Before sign-up persists it, `password` holds what the caller typed; after
/// [`User::set_credentials`] or when loaded from storage it holds the hash.
/// [`User::sanitize`] wipes both secrets before a user leaves the auth
/// service.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    mail: String,
    password: String,
    salt: String,
    role: Role,
}

impl User {
    pub const MAX_NAME_LEN: usize = 255;
    pub const MAX_MAIL_LEN: usize = 255;

    pub fn new(
        id: i64,
        name: impl Into<String>,
        mail: impl Into<String>,
        password: impl Into<String>,
        salt: impl Into<String>,
        role: i32,
    ) -> Result<Self, ValidationError> {
        let (name, mail, password) = (name.into(), mail.into(), password.into());

        if id < 0 {
            return Err(ValidationError::Negative { field: "id" });
        }
        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(ValidationError::TooLong { field: "name", max: Self::MAX_NAME_LEN });
        }
        if mail.is_empty() {
            return Err(ValidationError::Required { field: "mail" });
        }
        if mail.chars().count() > Self::MAX_MAIL_LEN {
            return Err(ValidationError::TooLong { field: "mail", max: Self::MAX_MAIL_LEN });
        }
        if password.is_empty() {
            return Err(ValidationError::Required { field: "password" });
        }
        let role = Role::try_from(role)?;

        Ok(Self { id: UserId::new(id), name, mail, password, salt: salt.into(), role })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mail(&self) -> &str {
        &self.mail
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Replace the typed password with its hash and the salt used for it
    pub fn set_credentials(&mut self, password_hash: String, salt: String) {
        self.password = password_hash;
        self.salt = salt;
    }

    pub fn sanitize(&mut self) {
        self.password.clear();
        self.salt.clear();
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mail", &self.mail)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_user() {
        let user = User::new(0, "Ann", "ann@example.com", "secret", "", 0).unwrap();
        assert_eq!(user.id(), UserId::new(0));
        assert_eq!(user.mail(), "ann@example.com");
        assert_eq!(user.role(), Role::User);
    }

    #[rstest]
    #[case(-1, "Ann", "a@b.c", "pw", 0, ValidationError::Negative { field: "id" })]
    #[case(0, "", "a@b.c", "pw", 0, ValidationError::Required { field: "name" })]
    #[case(0, "Ann", "", "pw", 0, ValidationError::Required { field: "mail" })]
    #[case(0, "Ann", "a@b.c", "", 0, ValidationError::Required { field: "password" })]
    #[case(0, "Ann", "a@b.c", "pw", -1, ValidationError::Negative { field: "role" })]
    fn test_invalid_user(
        #[case] id: i64,
        #[case] name: &str,
        #[case] mail: &str,
        #[case] password: &str,
        #[case] role: i32,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(User::new(id, name, mail, password, "", role).unwrap_err(), expected);
    }

    #[rstest]
    #[case(255, true)]
    #[case(256, false)]
    fn test_name_and_mail_length_boundary(#[case] len: usize, #[case] ok: bool) {
        let long = "x".repeat(len);
        assert_eq!(User::new(0, long.as_str(), "a@b.c", "pw", "", 0).is_ok(), ok);
        assert_eq!(User::new(0, "Ann", long.as_str(), "pw", "", 0).is_ok(), ok);
    }

    #[test]
    fn test_too_long_name_names_the_field() {
        let err = User::new(0, "n".repeat(300), "a@b.c", "pw", "", 0).unwrap_err();
        assert_eq!(err, ValidationError::TooLong { field: "name", max: 255 });
    }

    #[test]
    fn test_sanitize_clears_secrets() {
        let mut user = User::new(3, "Ann", "a@b.c", "pw", "", 1).unwrap();
        user.set_credentials("hash".to_string(), "salt".to_string());
        assert_eq!(user.password(), "hash");
        assert_eq!(user.salt(), "salt");

        user.sanitize();
        assert!(user.password().is_empty());
        assert!(user.salt().is_empty());
        assert_eq!(user.role(), Role::Admin);
    }

    #[test]
    fn test_debug_hides_password() {
        let user = User::new(1, "Ann", "a@b.c", "hunter2", "pepper", 0).unwrap();
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("pepper"));
    }
}
