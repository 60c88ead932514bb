use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::{Actor, ActorId, Film, FilmId, User, UserId};
use crate::domain::value_objects::{FilmSort, Role};
use crate::presentation::middleware::error::AppError;

/// Persistence for films and their actor association.
///
/// Single-row lookups report a miss as [`AppError::NotFound`]; every other
/// store failure is returned as an opaque 5xx error.
#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// Insert a film and return it with the id the store assigned
    async fn create(&self, film: &Film) -> Result<Film, AppError>;

    /// Find a film with its actors hydrated one level deep
    async fn find_by_id(&self, id: FilmId) -> Result<Film, AppError>;

    /// Overwrite the scalar fields of an existing film; actors are untouched
    async fn update(&self, film: &Film) -> Result<Film, AppError>;

    async fn delete(&self, id: FilmId) -> Result<(), AppError>;

    /// Every film with its actors, in the requested order
    async fn get_all(&self, sort: FilmSort) -> Result<Vec<Film>, AppError>;

    /// Films whose title or any actor's name contains `fragment`
    /// (case-insensitive), best rated first, without actors
    async fn search(&self, fragment: &str) -> Result<Vec<Film>, AppError>;

    /// Replace the film's actor set, then return the re-fetched film
    async fn replace_actors(&self, id: FilmId, actor_ids: &[ActorId]) -> Result<Film, AppError>;
}

/// Persistence for actors
#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn create(&self, actor: &Actor) -> Result<Actor, AppError>;

    /// Find an actor with their films hydrated one level deep
    async fn find_by_id(&self, id: ActorId) -> Result<Actor, AppError>;

    async fn update(&self, actor: &Actor) -> Result<Actor, AppError>;

    async fn delete(&self, id: ActorId) -> Result<(), AppError>;

    /// Every actor with their films, ordered by id
    async fn get_all(&self) -> Result<Vec<Actor>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user whose password has already been hashed
    async fn create(&self, user: &User) -> Result<UserId, AppError>;

    /// Load a user, hash and salt included
    async fn find_by_mail(&self, mail: &str) -> Result<User, AppError>;
}

/// Key-value store mapping opaque session ids to roles.
///
/// Expiry is left to the store; an expired id reads as a miss.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn set(&self, session_id: &str, role: Role, ttl: Duration) -> Result<(), AppError>;

    /// Resolve a session id; a miss is [`AppError::NotFound`]
    async fn get(&self, session_id: &str) -> Result<Role, AppError>;

    async fn delete(&self, session_id: &str) -> Result<(), AppError>;
}
