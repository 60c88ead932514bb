//! Conversion between domain entities and their persisted row shapes.
//!
//! Joined listings come back as one row per (primary, associated) pair. The
//! `group_*` functions fold those rows into entities with their association
//! hydrated one level deep: attached entities always carry an empty
//! reciprocal collection.

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::domain::entities::{Actor, ActorId, Film, FilmId, User};
use crate::presentation::middleware::error::AppError;

/// Row of the `film` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FilmRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: f64,
}

impl FilmRecord {
    pub fn into_domain(self) -> Result<Film, AppError> {
        Film::new(FilmId::new(self.id), self.title, self.description, self.release_date, self.rating)
            .map_err(|e| corrupt_row("film", self.id, &e))
    }
}

impl From<&Film> for FilmRecord {
    fn from(film: &Film) -> Self {
        Self {
            id: film.id().as_i64(),
            title: film.title().to_string(),
            description: film.description().to_string(),
            release_date: film.release_date(),
            rating: film.rating(),
        }
    }
}

/// Row of the `actor` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ActorRecord {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
}

impl ActorRecord {
    pub fn into_domain(self) -> Result<Actor, AppError> {
        Actor::new(ActorId::new(self.id), self.name, &self.gender, self.birth_date)
            .map_err(|e| corrupt_row("actor", self.id, &e))
    }
}

impl From<&Actor> for ActorRecord {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id().as_i64(),
            name: actor.name().to_string(),
            gender: actor.gender().as_str().to_string(),
            birth_date: actor.birth_date(),
        }
    }
}

/// Row of the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub mail: String,
    pub password_hash: String,
    pub salt: String,
    pub role: i32,
}

impl UserRecord {
    pub fn into_domain(self) -> Result<User, AppError> {
        User::new(self.id, self.name, self.mail, self.password_hash, self.salt, self.role)
            .map_err(|e| corrupt_row("users", self.id, &e))
    }
}

/// `film LEFT JOIN film_actor LEFT JOIN actor`, one row per pair
#[derive(Debug, Clone, FromRow)]
pub struct FilmActorRow {
    #[sqlx(flatten)]
    pub film: FilmRecord,
    pub actor_id: Option<i64>,
    pub actor_name: Option<String>,
    pub actor_gender: Option<String>,
    pub actor_birth_date: Option<NaiveDate>,
}

impl FilmActorRow {
    fn actor(self) -> Result<Option<ActorRecord>, AppError> {
        let Some(id) = self.actor_id else {
            return Ok(None);
        };
        match (self.actor_name, self.actor_gender, self.actor_birth_date) {
            (Some(name), Some(gender), Some(birth_date)) => {
                Ok(Some(ActorRecord { id, name, gender, birth_date }))
            }
            _ => Err(incomplete_row("actor", id)),
        }
    }
}

/// `actor LEFT JOIN film_actor LEFT JOIN film`, one row per pair
#[derive(Debug, Clone, FromRow)]
pub struct ActorFilmRow {
    #[sqlx(flatten)]
    pub actor: ActorRecord,
    pub film_id: Option<i64>,
    pub film_title: Option<String>,
    pub film_description: Option<String>,
    pub film_release_date: Option<NaiveDate>,
    pub film_rating: Option<f64>,
}

impl ActorFilmRow {
    fn film(self) -> Result<Option<FilmRecord>, AppError> {
        let Some(id) = self.film_id else {
            return Ok(None);
        };
        match (self.film_title, self.film_description, self.film_release_date, self.film_rating) {
            (Some(title), Some(description), Some(release_date), Some(rating)) => {
                Ok(Some(FilmRecord { id, title, description, release_date, rating }))
            }
            _ => Err(incomplete_row("film", id)),
        }
    }
}

/// Fold films joined with their actors. Rows of one film must be contiguous;
/// the output keeps the order in which films first appear.
pub fn group_film_rows(rows: Vec<FilmActorRow>) -> Result<Vec<Film>, AppError> {
    collapse(
        rows,
        |row| row.film.id,
        |row| row.film.clone().into_domain(),
        |film, row| {
            if let Some(actor) = row.actor()? {
                film.add_actor(actor.into_domain()?);
            }
            Ok(())
        },
    )
}

/// Fold actors joined with their films. Same contract as [`group_film_rows`].
pub fn group_actor_rows(rows: Vec<ActorFilmRow>) -> Result<Vec<Actor>, AppError> {
    collapse(
        rows,
        |row| row.actor.id,
        |row| row.actor.clone().into_domain(),
        |actor, row| {
            if let Some(film) = row.film()? {
                actor.add_film(film.into_domain()?);
            }
            Ok(())
        },
    )
}

/// Single pass over rows grouped by primary id.
///
/// A new accumulator starts whenever the id changes; `attach` then sees every
/// row, including the one that opened the group.
fn collapse<R, T>(
    rows: Vec<R>,
    primary_id: impl Fn(&R) -> i64,
    start: impl Fn(&R) -> Result<T, AppError>,
    attach: impl Fn(&mut T, R) -> Result<(), AppError>,
) -> Result<Vec<T>, AppError> {
    let mut grouped = Vec::new();
    let mut current: Option<(i64, T)> = None;

    for row in rows {
        let id = primary_id(&row);
        let continues = matches!(&current, Some((current_id, _)) if *current_id == id);

        if !continues {
            if let Some((_, finished)) = current.take() {
                grouped.push(finished);
            }
            current = Some((id, start(&row)?));
        }

        if let Some((_, accumulator)) = current.as_mut() {
            attach(accumulator, row)?;
        }
    }

    if let Some((_, finished)) = current {
        grouped.push(finished);
    }

    Ok(grouped)
}

fn corrupt_row(table: &str, id: i64, err: &dyn std::fmt::Display) -> AppError {
    AppError::Internal { message: format!("Stored {table} row {id} failed validation: {err}") }
}

fn incomplete_row(table: &str, id: i64) -> AppError {
    AppError::Internal { message: format!("Joined {table} row {id} has null columns") }
}
