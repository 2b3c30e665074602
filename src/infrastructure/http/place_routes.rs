//! Place API routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::application::dto::{
    CreatePlaceClassRequest, CreatePlaceRequest, PlaceClassResponse, PlaceResponse,
    UpdatePlaceRequest,
};
use crate::application::ports::outbound::WorldContext;
use crate::application::services::{PlaceService, PlaceServiceError};
use crate::domain::value_objects::PlaceId;
use crate::infrastructure::state::AppState;

/// Header carrying the caller's current world name
const WORLD_NAME_HEADER: &str = "x-world-name";

pub async fn get_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PlaceResponse>, (StatusCode, String)> {
    let id = parse_place_id(&id)?;

    let place = state
        .place_service
        .get_place(id)
        .await
        .map_err(error_response)?;

    Ok(Json(place))
}

pub async fn update_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<UpdatePlaceRequest>,
) -> Result<Json<PlaceResponse>, (StatusCode, String)> {
    let id = parse_place_id(&id)?;
    let ctx = world_context(&headers);

    let place = state
        .place_service
        .update_place(id, request, &ctx)
        .await
        .map_err(error_response)?;

    Ok(Json(place))
}

pub async fn create_place(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<PlaceResponse>), (StatusCode, String)> {
    let ctx = world_context(&headers);

    let place = state
        .place_service
        .create_place(request, &ctx)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(place)))
}

pub async fn destroy_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = parse_place_id(&id)?;
    let ctx = world_context(&headers);

    state
        .place_service
        .destroy_place(id, &ctx)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_place_classes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlaceClassResponse>>, (StatusCode, String)> {
    let classes = state
        .place_classes
        .list()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(classes.into_iter().map(Into::into).collect()))
}

pub async fn get_place_class(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<PlaceClassResponse>, (StatusCode, String)> {
    let class = state
        .place_classes
        .get(&code)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Place class not found: {code}"),
            )
        })?;

    Ok(Json(class.into()))
}

pub async fn create_place_class(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePlaceClassRequest>,
) -> Result<(StatusCode, Json<PlaceClassResponse>), (StatusCode, String)> {
    let place_class = request.into();

    state
        .place_classes
        .save(&place_class)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((StatusCode::CREATED, Json(place_class.into())))
}

fn parse_place_id(raw: &str) -> Result<PlaceId, (StatusCode, String)> {
    Uuid::parse_str(raw)
        .map(PlaceId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid place ID".to_string()))
}

/// Resolve the caller context from optional request headers; absence of
/// either header is a normal state
fn world_context(headers: &HeaderMap) -> WorldContext {
    let world_name = headers
        .get(WORLD_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let auth_token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    WorldContext::new(world_name, auth_token)
}

fn error_response(error: PlaceServiceError) -> (StatusCode, String) {
    let status = match &error {
        PlaceServiceError::PlaceNotFound(_) | PlaceServiceError::PlaceClassNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        PlaceServiceError::ExitAlreadyExists(_) => StatusCode::BAD_REQUEST,
        PlaceServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}
