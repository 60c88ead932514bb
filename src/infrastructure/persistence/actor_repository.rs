use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::db_error;
use super::mapper::{ActorFilmRow, ActorRecord, group_actor_rows};
use crate::domain::entities::{Actor, ActorId};
use crate::domain::repositories::ActorRepository;
use crate::presentation::middleware::error::AppError;

const ACTOR_WITH_FILMS: &str = r"
    SELECT a.id, a.name, a.gender, a.birth_date,
           f.id AS film_id, f.title AS film_title, f.description AS film_description,
           f.release_date AS film_release_date, f.rating AS film_rating
    FROM actor a
    LEFT JOIN film_actor fa ON fa.actor_id = a.id
    LEFT JOIN film f ON f.id = fa.film_id
";

/// `PostgreSQL` implementation of `ActorRepository`
#[derive(Clone)]
pub struct PostgreSqlActorRepository {
    pool: PgPool,
}

impl PostgreSqlActorRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorRepository for PostgreSqlActorRepository {
    async fn create(&self, actor: &Actor) -> Result<Actor, AppError> {
        let record = ActorRecord::from(actor);

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO actor (name, gender, birth_date)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(&record.name)
        .bind(&record.gender)
        .bind(record.birth_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create actor"))?;

        debug!(actor_id = id, "Inserted actor");
        Ok(actor.clone().with_id(ActorId::new(id)))
    }

    async fn find_by_id(&self, id: ActorId) -> Result<Actor, AppError> {
        let rows: Vec<ActorFilmRow> =
            sqlx::query_as(&format!("{ACTOR_WITH_FILMS} WHERE a.id = $1 ORDER BY f.id"))
                .bind(id.as_i64())
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("find actor by id"))?;

        group_actor_rows(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Actor with ID {id}")))
    }

    async fn update(&self, actor: &Actor) -> Result<Actor, AppError> {
        let record = ActorRecord::from(actor);

        let updated: Option<ActorRecord> = sqlx::query_as(
            r"
            UPDATE actor
            SET name = $1, gender = $2, birth_date = $3
            WHERE id = $4
            RETURNING id, name, gender, birth_date
            ",
        )
        .bind(&record.name)
        .bind(&record.gender)
        .bind(record.birth_date)
        .bind(record.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update actor"))?;

        updated
            .ok_or_else(|| AppError::not_found(format!("Actor with ID {}", actor.id())))?
            .into_domain()
    }

    async fn delete(&self, id: ActorId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM actor WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete actor"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Actor with ID {id}")));
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Actor>, AppError> {
        let rows: Vec<ActorFilmRow> =
            sqlx::query_as(&format!("{ACTOR_WITH_FILMS} ORDER BY a.id, f.id"))
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("list actors"))?;

        group_actor_rows(rows)
    }
}
