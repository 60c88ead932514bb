pub mod actor_repository;
pub mod connection;
pub mod film_repository;
pub mod mapper;
pub mod user_repository;

pub use actor_repository::PostgreSqlActorRepository;
pub use connection::Database;
pub use film_repository::PostgreSqlFilmRepository;
pub use user_repository::PostgreSqlUserRepository;

use crate::presentation::middleware::error::AppError;

/// Log a failed statement with the operation it belonged to, then convert it
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        if !matches!(err, sqlx::Error::RowNotFound) {
            tracing::error!(operation, error = %err, "Database operation failed");
        }
        AppError::from(err)
    }
}
