use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};

use super::AppState;
use crate::application::dto::{FilmDto, FilmListQuery};
use crate::domain::entities::{ActorId, Film, FilmId};
use crate::domain::value_objects::FilmSort;
use crate::presentation::middleware::error::AppError;
use crate::presentation::response::ApiResponse;

pub const FILM_DELETED_MESSAGE: &str = "Film deleted successfully";

fn film_id(path: Result<Path<i64>, PathRejection>) -> Result<FilmId, AppError> {
    let Path(id) = path.map_err(|_| AppError::bad_request("invalid film ID"))?;
    Ok(FilmId::new(id))
}

fn to_dtos(films: &[Film]) -> Vec<FilmDto> {
    films.iter().map(FilmDto::from).collect()
}

/// `GET /api/films?sort_by=&order=`
///
/// Sort options are checked here; a bad value never reaches the service.
pub async fn get_all_films(
    State(state): State<AppState>,
    query: Result<Query<FilmListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<FilmDto>>, AppError> {
    let Query(query) = query?;
    let sort = FilmSort::parse(query.sort_by.as_deref(), query.order.as_deref())
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let films = state.films.get_all_films(sort).await?;
    Ok(ApiResponse::success(to_dtos(&films)))
}

/// `GET /api/films/{id}`
pub async fn get_film(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<FilmDto>, AppError> {
    let id = film_id(path)?;
    let film = state.films.get_film_by_id(id).await?;
    Ok(ApiResponse::success(FilmDto::from(&film)))
}

/// `POST /api/create_films`
pub async fn create_film(
    State(state): State<AppState>,
    body: Result<Json<FilmDto>, JsonRejection>,
) -> Result<ApiResponse<FilmDto>, AppError> {
    let Json(dto) = body?;
    let film = Film::try_from(dto)?;

    let created = state.films.create_film(film).await?;
    Ok(ApiResponse::success(FilmDto::from(&created)))
}

/// `PUT /api/update_films`
pub async fn update_film(
    State(state): State<AppState>,
    body: Result<Json<FilmDto>, JsonRejection>,
) -> Result<ApiResponse<FilmDto>, AppError> {
    let Json(dto) = body?;
    let film = Film::try_from(dto)?;

    let updated = state.films.update_film(film).await?;
    Ok(ApiResponse::success(FilmDto::from(&updated)))
}

/// `POST /api/update_films_actors/{id}` with a JSON array of actor ids.
/// The film's actor set becomes exactly that list.
pub async fn update_film_actors(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Vec<i64>>, JsonRejection>,
) -> Result<ApiResponse<FilmDto>, AppError> {
    let id = film_id(path)?;
    let Json(raw_ids) = body?;
    let actor_ids: Vec<ActorId> = raw_ids.into_iter().map(ActorId::new).collect();

    let film = state.films.update_film_actors(id, &actor_ids).await?;
    Ok(ApiResponse::success(FilmDto::from(&film)))
}

/// `DELETE /api/films/{id}`
pub async fn delete_film(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let id = film_id(path)?;
    state.films.delete_film(id).await?;
    Ok(ApiResponse::success(FILM_DELETED_MESSAGE))
}

/// `GET /api/search_films/{pattern}`: substring match on title or actor name
pub async fn search_films(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Vec<FilmDto>>, AppError> {
    let Path(pattern) = path.map_err(|_| AppError::bad_request("invalid search pattern"))?;
    let films = state.films.search_films(&pattern).await?;
    Ok(ApiResponse::success(to_dtos(&films)))
}
