use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::film::Film;
use crate::domain::{errors::ValidationError, value_objects::Gender};

/// Unique identifier for actors (database BIGSERIAL)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(i64);

impl ActorId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ActorId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// An actor in the catalog, optionally carrying the films they appear in
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    id: ActorId,
    name: String,
    gender: Gender,
    birth_date: NaiveDate,
    films: Vec<Film>,
}

impl Actor {
    pub const MAX_NAME_LEN: usize = 255;

    /// Build a validated actor with an empty film list.
    ///
    /// `gender` is the raw wire/storage value and must be one of
    /// `male`, `female`, `other`.
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        gender: &str,
        birth_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(ValidationError::TooLong { field: "name", max: Self::MAX_NAME_LEN });
        }
        let gender = gender.parse::<Gender>()?;
        if birth_date > Utc::now().date_naive() {
            return Err(ValidationError::InFuture { field: "birth date" });
        }

        Ok(Self { id, name, gender, birth_date, films: Vec::new() })
    }

    #[must_use]
    pub fn with_id(mut self, id: ActorId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn add_film(&mut self, film: Film) {
        self.films.push(film);
    }
}
