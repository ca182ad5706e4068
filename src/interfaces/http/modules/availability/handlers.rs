//! Availability HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::AvailabilityService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{parse_instant, ApiResponse};

use super::dto::*;

/// Application state for availability handlers.
#[derive(Clone)]
pub struct AvailabilityAppState {
    pub availability: Arc<AvailabilityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{hotel_id}/availability",
    tag = "Availability",
    params(
        ("hotel_id" = String, Path, description = "Hotel ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Rooms free over the range", body = ApiResponse<Vec<AvailableRoomDto>>),
        (status = 400, description = "Invalid range or dates"),
        (status = 404, description = "Hotel has no registered rooms")
    )
)]
pub async fn get_availability(
    State(state): State<AvailabilityAppState>,
    Path(hotel_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<
    Json<ApiResponse<Vec<AvailableRoomDto>>>,
    (StatusCode, Json<ApiResponse<Vec<AvailableRoomDto>>>),
> {
    let check_in = parse_instant(&query.check_in).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Invalid check_in: {}", e))),
        )
    })?;
    let check_out = parse_instant(&query.check_out).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Invalid check_out: {}", e))),
        )
    })?;

    let rooms = state
        .availability
        .find_available_rooms(&hotel_id, check_in, check_out)
        .await
        .map_err(|e| {
            let status = match &e {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::SERVICE_UNAVAILABLE,
            };
            (status, Json(ApiResponse::error(e.to_string())))
        })?;

    let dtos: Vec<AvailableRoomDto> = rooms.into_iter().map(AvailableRoomDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
