use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Actor, ActorId, Film, FilmId, User, UserId};
use crate::domain::errors::ValidationError;

/// Data Transfer Object for films.
///
/// `actors` is output only: incoming values are ignored, since the actor set
/// is changed through the dedicated association endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "calendar_date")]
    pub release_date: NaiveDate,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_deserializing)]
    pub actors: Vec<ActorDto>,
}

/// Data Transfer Object for actors; `films` is output only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(with = "calendar_date")]
    pub birth_date: NaiveDate,
    #[serde(default, skip_deserializing)]
    pub films: Vec<FilmDto>,
}

impl TryFrom<FilmDto> for Film {
    type Error = ValidationError;

    fn try_from(dto: FilmDto) -> Result<Self, Self::Error> {
        Film::new(FilmId::new(dto.id), dto.title, dto.description, dto.release_date, dto.rating)
    }
}

impl From<&Film> for FilmDto {
    fn from(film: &Film) -> Self {
        Self {
            id: film.id().as_i64(),
            title: film.title().to_string(),
            description: film.description().to_string(),
            release_date: film.release_date(),
            rating: film.rating(),
            actors: film.actors().iter().map(ActorDto::from).collect(),
        }
    }
}

impl TryFrom<ActorDto> for Actor {
    type Error = ValidationError;

    fn try_from(dto: ActorDto) -> Result<Self, Self::Error> {
        Actor::new(ActorId::new(dto.id), dto.name, &dto.gender, dto.birth_date)
    }
}

impl From<&Actor> for ActorDto {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id().as_i64(),
            name: actor.name().to_string(),
            gender: actor.gender().to_string(),
            birth_date: actor.birth_date(),
            films: actor.films().iter().map(FilmDto::from).collect(),
        }
    }
}

/// Request body for `POST /api/auth/sign-up`
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<SignUpRequest> for User {
    type Error = ValidationError;

    /// New accounts always start with the standard role
    fn try_from(request: SignUpRequest) -> Result<Self, Self::Error> {
        User::new(0, request.name, request.mail, request.password, String::new(), 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub id: UserId,
}

/// Request body for `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters for `GET /api/films`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmListQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Dates travel as `YYYY-MM-DD` on input and as a midnight UTC timestamp on
/// output. Full RFC 3339 timestamps are also accepted on input; their
/// calendar date in the given offset is kept.
pub mod calendar_date {
    use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        let timestamp = date.and_time(NaiveTime::MIN).and_utc();
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
    }
}
