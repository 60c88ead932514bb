use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use crate::domain::errors::ValidationError;

/// Unique identifier for films (database BIGSERIAL)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilmId(i64);

impl FilmId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FilmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FilmId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A film in the catalog.
///
/// Every field is checked in [`Film::new`]; once built, a film can only
/// gain actors through [`Film::add_actor`], which repository hydration uses.
/// The actor list is never written back on update.
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    id: FilmId,
    title: String,
    description: String,
    release_date: NaiveDate,
    rating: f64,
    actors: Vec<Actor>,
}

impl Film {
    pub const MAX_TITLE_LEN: usize = 150;
    pub const MAX_DESCRIPTION_LEN: usize = 1000;
    pub const MIN_RATING: f64 = 0.0;
    pub const MAX_RATING: f64 = 10.0;

    /// Build a validated film with an empty actor list
    pub fn new(
        id: FilmId,
        title: impl Into<String>,
        description: impl Into<String>,
        release_date: NaiveDate,
        rating: f64,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let description = description.into();

        if title.is_empty() {
            return Err(ValidationError::Required { field: "title" });
        }
        if title.chars().count() > Self::MAX_TITLE_LEN {
            return Err(ValidationError::TooLong { field: "title", max: Self::MAX_TITLE_LEN });
        }
        if description.chars().count() > Self::MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: Self::MAX_DESCRIPTION_LEN,
            });
        }
        // NaN falls outside the range too
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&rating) {
            return Err(ValidationError::OutOfRange { field: "rating", min: 0, max: 10 });
        }
        if release_date > Utc::now().date_naive() {
            return Err(ValidationError::InFuture { field: "release date" });
        }

        Ok(Self { id, title, description, release_date, rating, actors: Vec::new() })
    }

    /// Same film under a store-assigned id
    #[must_use]
    pub fn with_id(mut self, id: FilmId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> FilmId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Append an actor to the hydrated association
    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_film() {
        let film = Film::new(FilmId::new(1), "Heat", "Crime epic", date(1995, 12, 15), 8.3).unwrap();
        assert_eq!(film.id(), FilmId::new(1));
        assert_eq!(film.title(), "Heat");
        assert_eq!(film.description(), "Crime epic");
        assert_eq!(film.release_date(), date(1995, 12, 15));
        assert!((film.rating() - 8.3).abs() < f64::EPSILON);
        assert!(film.actors().is_empty());
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = Film::new(FilmId::default(), "", "", date(2000, 1, 1), 5.0).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "title" });
    }

    #[test]
    fn test_whitespace_title_is_non_empty() {
        let film = Film::new(FilmId::default(), " ", "", date(2000, 1, 1), 5.0).unwrap();
        assert_eq!(film.title(), " ");
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let title = "é".repeat(Film::MAX_TITLE_LEN);
        assert!(Film::new(FilmId::default(), title, "", date(2000, 1, 1), 5.0).is_ok());
    }

    #[test]
    fn test_description_limit() {
        let ok = "d".repeat(Film::MAX_DESCRIPTION_LEN);
        let too_long = "d".repeat(Film::MAX_DESCRIPTION_LEN + 1);
        assert!(Film::new(FilmId::default(), "t", ok, date(2000, 1, 1), 5.0).is_ok());
        assert_eq!(
            Film::new(FilmId::default(), "t", too_long, date(2000, 1, 1), 5.0).unwrap_err(),
            ValidationError::TooLong { field: "description", max: 1000 }
        );
    }

    #[test]
    fn test_nan_rating_rejected() {
        assert!(Film::new(FilmId::default(), "t", "", date(2000, 1, 1), f64::NAN).is_err());
    }

    #[test]
    fn test_release_date_today_allowed_tomorrow_rejected() {
        let today = Utc::now().date_naive();
        assert!(Film::new(FilmId::default(), "t", "", today, 5.0).is_ok());

        let err = Film::new(FilmId::default(), "t", "", today + Duration::days(1), 5.0)
            .unwrap_err();
        assert_eq!(err.to_string(), "release date cannot be in the future");
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let film = Film::new(FilmId::default(), "Alien", "", date(1979, 5, 25), 8.5)
            .unwrap()
            .with_id(FilmId::new(42));
        assert_eq!(film.id().as_i64(), 42);
        assert_eq!(film.title(), "Alien");
    }
}
