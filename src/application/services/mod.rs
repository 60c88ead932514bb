mod actor_service;
mod auth_service;
mod film_service;

pub use actor_service::ActorService;
pub use auth_service::AuthService;
pub use film_service::FilmService;
