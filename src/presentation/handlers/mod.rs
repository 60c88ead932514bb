use std::sync::Arc;

use crate::application::services::{ActorService, AuthService, FilmService};
use crate::domain::repositories::{ActorRepository, FilmRepository, SessionStore, UserRepository};
use crate::infrastructure::config::SessionConfig;
use crate::presentation::middleware::error::AppError;

pub mod actor;
pub mod auth;
pub mod film;

pub type SharedFilmService = Arc<FilmService<dyn FilmRepository>>;
pub type SharedActorService = Arc<ActorService<dyn ActorRepository>>;
pub type SharedAuthService = Arc<AuthService<dyn UserRepository, dyn SessionStore>>;

/// State shared by every handler and the session middleware
#[derive(Clone)]
pub struct AppState {
    pub films: SharedFilmService,
    pub actors: SharedActorService,
    pub auth: SharedAuthService,
    pub session: SessionConfig,
}

impl AppState {
    pub fn new(
        films: Arc<dyn FilmRepository>,
        actors: Arc<dyn ActorRepository>,
        auth: SharedAuthService,
        session: SessionConfig,
    ) -> Self {
        Self {
            films: Arc::new(FilmService::new(films)),
            actors: Arc::new(ActorService::new(actors)),
            auth,
            session,
        }
    }
}

/// Fallback for a known path hit with the wrong method
#[allow(clippy::unused_async)]
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
pub fn test_state(sessions: crate::test_utils::mocks::InMemorySessionStore) -> AppState {
    use crate::infrastructure::security::HmacSha256Hasher;
    use crate::test_utils::mocks::{InMemoryFilmRepository, InMemoryUserRepository};

    let films = InMemoryFilmRepository::new();
    let session = SessionConfig::default();
    let auth = AuthService::new(
        Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>,
        Arc::new(sessions) as Arc<dyn SessionStore>,
        Arc::new(HmacSha256Hasher),
        session.ttl(),
    );

    AppState::new(Arc::new(films.clone()), Arc::new(films.actors()), Arc::new(auth), session)
}

#[cfg(test)]
impl AppState {
    /// Replace the film service, sharing the catalog of `films`
    #[must_use]
    pub fn with_films(mut self, films: crate::test_utils::mocks::InMemoryFilmRepository) -> Self {
        self.actors = Arc::new(ActorService::new(Arc::new(films.actors()) as Arc<dyn ActorRepository>));
        self.films = Arc::new(FilmService::new(Arc::new(films) as Arc<dyn FilmRepository>));
        self
    }
}
