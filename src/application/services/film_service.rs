use std::sync::Arc;

use crate::{
    domain::{
        entities::{ActorId, Film, FilmId},
        repositories::FilmRepository,
        value_objects::FilmSort,
    },
    presentation::middleware::error::AppError,
};

/// Film operations.
///
/// Update, delete, and actor replacement only reach the repository after a
/// successful lookup of the same id; a failed lookup is returned as is.
pub struct FilmService<R>
where
    R: FilmRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> FilmService<R>
where
    R: FilmRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_film(&self, film: Film) -> Result<Film, AppError> {
        let created = self.repository.create(&film).await?;
        tracing::info!("Created film {} ({})", created.title(), created.id());
        Ok(created)
    }

    pub async fn get_film_by_id(&self, id: FilmId) -> Result<Film, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn update_film(&self, film: Film) -> Result<Film, AppError> {
        self.repository.find_by_id(film.id()).await?;

        let updated = self.repository.update(&film).await?;
        tracing::info!("Updated film {}", updated.id());
        Ok(updated)
    }

    pub async fn update_film_actors(
        &self,
        id: FilmId,
        actor_ids: &[ActorId],
    ) -> Result<Film, AppError> {
        self.repository.find_by_id(id).await?;

        let film = self.repository.replace_actors(id, actor_ids).await?;
        tracing::info!("Film {} now has {} actors", id, film.actors().len());
        Ok(film)
    }

    pub async fn delete_film(&self, id: FilmId) -> Result<(), AppError> {
        self.repository.find_by_id(id).await?;

        self.repository.delete(id).await?;
        tracing::info!("Deleted film {}", id);
        Ok(())
    }

    pub async fn search_films(&self, fragment: &str) -> Result<Vec<Film>, AppError> {
        self.repository.search(fragment).await
    }

    pub async fn get_all_films(&self, sort: FilmSort) -> Result<Vec<Film>, AppError> {
        tracing::debug!("Listing films by {}", sort);
        self.repository.get_all(sort).await
    }
}
