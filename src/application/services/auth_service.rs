use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{User, UserId},
        repositories::{SessionStore, UserRepository},
        value_objects::Role,
    },
    infrastructure::security::{PasswordHasher, generate_salt},
    presentation::middleware::error::AppError,
};

/// Account and session policy.
///
/// Raw passwords never reach the user repository, and users handed back to
/// callers are sanitized.
pub struct AuthService<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    users: Arc<U>,
    sessions: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    session_ttl: Duration,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        session_ttl: Duration,
    ) -> Self {
        Self { users, sessions, hasher, session_ttl }
    }

    /// Salt and hash the user's password, then persist the account
    pub async fn create_user(&self, mut user: User) -> Result<UserId, AppError> {
        let salt = generate_salt();
        let hash = self.hasher.hash(user.password(), &salt)?;
        user.set_credentials(hash, salt);

        let id = self.users.create(&user).await?;
        tracing::info!("Registered user {}", id);
        Ok(id)
    }

    /// Check credentials.
    ///
    /// An unknown mail is `NotFound`; a wrong password is `InvalidPassword`.
    pub async fn get_user(&self, mail: &str, password: &str) -> Result<User, AppError> {
        let mut user = self.users.find_by_mail(mail).await?;

        if !self.hasher.verify(password, user.salt(), user.password())? {
            tracing::warn!("Password mismatch for user {}", user.id());
            return Err(AppError::InvalidPassword);
        }

        user.sanitize();
        Ok(user)
    }

    /// Open a session for `role` and return its id
    pub async fn generate_cookie(&self, role: Role) -> Result<String, AppError> {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.set(&session_id, role, self.session_ttl).await?;
        Ok(session_id)
    }

    pub async fn delete_cookie(&self, session_id: &str) -> Result<(), AppError> {
        self.sessions.delete(session_id).await
    }

    pub async fn get_session_value(&self, session_id: &str) -> Result<Role, AppError> {
        self.sessions.get(session_id).await
    }
}
