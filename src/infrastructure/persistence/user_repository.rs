use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use super::mapper::UserRecord;
use crate::domain::entities::{User, UserId};
use crate::domain::repositories::UserRepository;
use crate::presentation::middleware::error::AppError;

/// `PostgreSQL` implementation of `UserRepository`
#[derive(Clone)]
pub struct PostgreSqlUserRepository {
    pool: PgPool,
}

impl PostgreSqlUserRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgreSqlUserRepository {
    async fn create(&self, user: &User) -> Result<UserId, AppError> {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (name, mail, password_hash, salt, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(user.name())
        .bind(user.mail())
        .bind(user.password())
        .bind(user.salt())
        .bind(user.role().as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create user"))?;

        Ok(UserId::new(id))
    }

    async fn find_by_mail(&self, mail: &str) -> Result<User, AppError> {
        let record: Option<UserRecord> = sqlx::query_as(
            r"
            SELECT id, name, mail, password_hash, salt, role
            FROM users
            WHERE mail = $1
            ",
        )
        .bind(mail)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find user by mail"))?;

        record.ok_or_else(|| AppError::not_found("user"))?.into_domain()
    }
}
