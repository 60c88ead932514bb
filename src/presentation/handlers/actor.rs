use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use super::AppState;
use crate::application::dto::ActorDto;
use crate::domain::entities::{Actor, ActorId};
use crate::presentation::middleware::error::AppError;
use crate::presentation::response::ApiResponse;

pub const ACTOR_DELETED_MESSAGE: &str = "Actor deleted successfully";

fn actor_id(path: Result<Path<i64>, PathRejection>) -> Result<ActorId, AppError> {
    let Path(id) = path.map_err(|_| AppError::bad_request("invalid actor ID"))?;
    Ok(ActorId::new(id))
}

pub async fn get_all_actors(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ActorDto>>, AppError> {
    let actors = state.actors.get_all_actors().await?;
    Ok(ApiResponse::success(actors.iter().map(ActorDto::from).collect()))
}

pub async fn get_actor(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<ActorDto>, AppError> {
    let actor = state.actors.get_actor_by_id(actor_id(path)?).await?;
    Ok(ApiResponse::success(ActorDto::from(&actor)))
}

pub async fn create_actor(
    State(state): State<AppState>,
    body: Result<Json<ActorDto>, JsonRejection>,
) -> Result<ApiResponse<ActorDto>, AppError> {
    let Json(dto) = body?;
    let created = state.actors.create_actor(Actor::try_from(dto)?).await?;
    Ok(ApiResponse::success(ActorDto::from(&created)))
}

pub async fn update_actor(
    State(state): State<AppState>,
    body: Result<Json<ActorDto>, JsonRejection>,
) -> Result<ApiResponse<ActorDto>, AppError> {
    let Json(dto) = body?;
    let updated = state.actors.update_actor(Actor::try_from(dto)?).await?;
    Ok(ApiResponse::success(ActorDto::from(&updated)))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<&'static str>, AppError> {
    state.actors.delete_actor(actor_id(path)?).await?;
    Ok(ApiResponse::success(ACTOR_DELETED_MESSAGE))
}
