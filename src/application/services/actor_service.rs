use std::sync::Arc;

use crate::{
    domain::{
        entities::{Actor, ActorId},
        repositories::ActorRepository,
    },
    presentation::middleware::error::AppError,
};

/// Actor operations; mutations are gated on the actor existing
pub struct ActorService<R>
where
    R: ActorRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> ActorService<R>
where
    R: ActorRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_actor(&self, actor: Actor) -> Result<Actor, AppError> {
        let created = self.repository.create(&actor).await?;
        tracing::info!("Created actor {} ({})", created.name(), created.id());
        Ok(created)
    }

    pub async fn get_actor_by_id(&self, id: ActorId) -> Result<Actor, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn update_actor(&self, actor: Actor) -> Result<Actor, AppError> {
        self.repository.find_by_id(actor.id()).await?;

        let updated = self.repository.update(&actor).await?;
        tracing::info!("Updated actor {}", updated.id());
        Ok(updated)
    }

    pub async fn delete_actor(&self, id: ActorId) -> Result<(), AppError> {
        self.repository.find_by_id(id).await?;

        self.repository.delete(id).await?;
        tracing::info!("Deleted actor {}", id);
        Ok(())
    }

    pub async fn get_all_actors(&self) -> Result<Vec<Actor>, AppError> {
        self.repository.get_all().await
    }
}
