//! Room registry HTTP handlers (read-only; room CRUD is owned by the
//! hotel-management collaborator)

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;

use super::dto::*;

/// Application state for room handlers.
#[derive(Clone)]
pub struct RoomAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{hotel_id}/rooms",
    tag = "Rooms",
    params(("hotel_id" = String, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "All rooms of the hotel (empty list when none)", body = ApiResponse<Vec<RoomDto>>)
    )
)]
pub async fn list_hotel_rooms(
    State(state): State<RoomAppState>,
    Path(hotel_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<Vec<RoomDto>>>)> {
    let rooms = state
        .repos
        .rooms()
        .find_by_hotel(&hotel_id)
        .await
        .map_err(|e| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let dtos: Vec<RoomDto> = rooms.into_iter().map(RoomDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = String, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomAppState>,
    Path(room_id): Path<String>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
    let room = state.repos.rooms().find_by_id(&room_id).await.map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let Some(room) = room else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Room {} not found", room_id))),
        ));
    };

    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}
