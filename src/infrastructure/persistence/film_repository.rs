use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};

use super::db_error;
use super::mapper::{FilmActorRow, FilmRecord, group_film_rows};
use crate::domain::entities::{ActorId, Film, FilmId};
use crate::domain::repositories::FilmRepository;
use crate::domain::value_objects::{FilmSort, SortField};
use crate::presentation::middleware::error::AppError;

const FILM_WITH_ACTORS: &str = r"
    SELECT f.id, f.title, f.description, f.release_date, f.rating,
           a.id AS actor_id, a.name AS actor_name, a.gender AS actor_gender,
           a.birth_date AS actor_birth_date
    FROM film f
    LEFT JOIN film_actor fa ON fa.film_id = f.id
    LEFT JOIN actor a ON a.id = fa.actor_id
";

/// `PostgreSQL` implementation of `FilmRepository`
#[derive(Clone)]
pub struct PostgreSqlFilmRepository {
    pool: PgPool,
}

impl PostgreSqlFilmRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Title => "f.title",
        SortField::Rating => "f.rating",
        SortField::ReleaseDate => "f.release_date",
    }
}

/// Wrap `fragment` for `ILIKE ... ESCAPE '\'` so it matches literally
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl FilmRepository for PostgreSqlFilmRepository {
    async fn create(&self, film: &Film) -> Result<Film, AppError> {
        let record = FilmRecord::from(film);

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO film (title, description, release_date, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.release_date)
        .bind(record.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create film"))?;

        debug!(film_id = id, "Inserted film");
        Ok(film.clone().with_id(FilmId::new(id)))
    }

    async fn find_by_id(&self, id: FilmId) -> Result<Film, AppError> {
        let rows: Vec<FilmActorRow> =
            sqlx::query_as(&format!("{FILM_WITH_ACTORS} WHERE f.id = $1 ORDER BY a.id"))
                .bind(id.as_i64())
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("find film by id"))?;

        group_film_rows(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Film with ID {id}")))
    }

    async fn update(&self, film: &Film) -> Result<Film, AppError> {
        let record = FilmRecord::from(film);

        let updated: Option<FilmRecord> = sqlx::query_as(
            r"
            UPDATE film
            SET title = $1, description = $2, release_date = $3, rating = $4
            WHERE id = $5
            RETURNING id, title, description, release_date, rating
            ",
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.release_date)
        .bind(record.rating)
        .bind(record.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update film"))?;

        updated
            .ok_or_else(|| AppError::not_found(format!("Film with ID {}", film.id())))?
            .into_domain()
    }

    async fn delete(&self, id: FilmId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM film WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete film"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Film with ID {id}")));
        }
        Ok(())
    }

    async fn get_all(&self, sort: FilmSort) -> Result<Vec<Film>, AppError> {
        // The id tiebreak keeps each film's rows contiguous for grouping.
        let query = format!(
            "{FILM_WITH_ACTORS} ORDER BY {} {}, f.id, a.id",
            sort_column(sort.field),
            sort.order.as_sql()
        );

        let rows: Vec<FilmActorRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list films"))?;

        group_film_rows(rows)
    }

    async fn search(&self, fragment: &str) -> Result<Vec<Film>, AppError> {
        let records: Vec<FilmRecord> = sqlx::query_as(
            r"
            SELECT DISTINCT f.id, f.title, f.description, f.release_date, f.rating
            FROM film f
            LEFT JOIN film_actor fa ON fa.film_id = f.id
            LEFT JOIN actor a ON a.id = fa.actor_id
            WHERE f.title ILIKE $1 ESCAPE '\' OR a.name ILIKE $1 ESCAPE '\'
            ORDER BY f.rating DESC, f.id
            ",
        )
        .bind(contains_pattern(fragment))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("search films"))?;

        records.into_iter().map(FilmRecord::into_domain).collect()
    }

    async fn replace_actors(&self, id: FilmId, actor_ids: &[ActorId]) -> Result<Film, AppError> {
        let mut unique = actor_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let mut tx = self.pool.begin().await.map_err(db_error("begin actor replacement"))?;

        sqlx::query("DELETE FROM film_actor WHERE film_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(db_error("clear film actors"))?;

        for actor_id in &unique {
            // Dropping `tx` on the error path rolls the whole replacement back.
            sqlx::query("INSERT INTO film_actor (film_id, actor_id) VALUES ($1, $2)")
                .bind(id.as_i64())
                .bind(actor_id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!(film_id = %id, actor_id = %actor_id, error = %e, "Failed to link actor");
                    AppError::from(e)
                })?;
        }

        tx.commit().await.map_err(db_error("commit actor replacement"))?;

        self.find_by_id(id).await
    }
}
