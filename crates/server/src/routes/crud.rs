//! CRUD handlers shared by every entity type.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use models::Record;

use crate::errors::JsonApiError;
use crate::state::{AppState, RepoFor};

pub async fn get_one<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, JsonApiError>
where
    AppState: RepoFor<T>,
{
    RepoFor::<T>::repo(&state)
        .get_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(T::ENTITY))
}

pub async fn create<T: Record>(
    State(state): State<AppState>,
    body: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), JsonApiError>
where
    AppState: RepoFor<T>,
{
    let Json(candidate) = body?;
    let created = RepoFor::<T>::repo(&state).create(candidate).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, JsonApiError>
where
    AppState: RepoFor<T>,
{
    let Json(candidate) = body?;
    RepoFor::<T>::repo(&state)
        .update(&id, candidate)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(T::ENTITY))
}

pub async fn delete<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError>
where
    AppState: RepoFor<T>,
{
    if RepoFor::<T>::repo(&state).delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found(T::ENTITY))
    }
}
