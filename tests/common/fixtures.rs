use film_library::domain::{
    entities::{Actor, ActorId, Film, FilmId, User, UserId},
    repositories::{ActorRepository, FilmRepository, SessionStore, UserRepository},
    value_objects::{FilmSort, Role},
};
use film_library::presentation::middleware::error::AppError;
use mockall::mock;
use std::time::Duration;

mock! {
    pub FilmRepo {}

    #[async_trait::async_trait]
    impl FilmRepository for FilmRepo {
        async fn create(&self, film: &Film) -> Result<Film, AppError>;
        async fn find_by_id(&self, id: FilmId) -> Result<Film, AppError>;
        async fn update(&self, film: &Film) -> Result<Film, AppError>;
        async fn delete(&self, id: FilmId) -> Result<(), AppError>;
        async fn get_all(&self, sort: FilmSort) -> Result<Vec<Film>, AppError>;
        async fn search(&self, fragment: &str) -> Result<Vec<Film>, AppError>;
        async fn replace_actors(&self, id: FilmId, actor_ids: &[ActorId]) -> Result<Film, AppError>;
    }
}

mock! {
    pub ActorRepo {}

    #[async_trait::async_trait]
    impl ActorRepository for ActorRepo {
        async fn create(&self, actor: &Actor) -> Result<Actor, AppError>;
        async fn find_by_id(&self, id: ActorId) -> Result<Actor, AppError>;
        async fn update(&self, actor: &Actor) -> Result<Actor, AppError>;
        async fn delete(&self, id: ActorId) -> Result<(), AppError>;
        async fn get_all(&self) -> Result<Vec<Actor>, AppError>;
    }
}

mock! {
    pub UserRepo {}

    #[async_trait::async_trait]
    impl UserRepository for UserRepo {
        async fn create(&self, user: &User) -> Result<UserId, AppError>;
        async fn find_by_mail(&self, mail: &str) -> Result<User, AppError>;
    }
}

mock! {
    pub Sessions {}

    #[async_trait::async_trait]
    impl SessionStore for Sessions {
        async fn set(&self, session_id: &str, role: Role, ttl: Duration) -> Result<(), AppError>;
        async fn get(&self, session_id: &str) -> Result<Role, AppError>;
        async fn delete(&self, session_id: &str) -> Result<(), AppError>;
    }
}

/// Session store mock that resolves every id to `role`
pub fn sessions_with_role(role: Role) -> MockSessions {
    let mut sessions = MockSessions::new();
    sessions.expect_get().returning(move |_| Ok(role));
    sessions
}

pub fn film_not_found(id: FilmId) -> AppError {
    AppError::not_found(format!("Film with ID {id}"))
}

pub fn actor_not_found(id: ActorId) -> AppError {
    AppError::not_found(format!("Actor with ID {id}"))
}
