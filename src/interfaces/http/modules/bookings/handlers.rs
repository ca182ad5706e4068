//! Booking HTTP handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::{ReservationRequest, ReservationService};
use crate::domain::{DomainError, GuestContact, RepositoryProvider};
use crate::interfaces::http::common::{parse_instant, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub reservations: Arc<ReservationService>,
}

fn invalid(
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<CreateBookingResponse>>) {
    let message = message.into();
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(
            CreateBookingResponse {
                booking_id: None,
                status: "invalid".to_string(),
                rooms: None,
                message: Some(message.clone()),
            },
            message,
        )),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = ApiResponse<CreateBookingResponse>),
        (status = 409, description = "Room(s) no longer available", body = ApiResponse<CreateBookingResponse>),
        (status = 400, description = "Invalid request", body = ApiResponse<CreateBookingResponse>),
        (status = 404, description = "Unknown hotel or room", body = ApiResponse<CreateBookingResponse>),
        (status = 503, description = "Temporarily unable to commit; retry", body = ApiResponse<CreateBookingResponse>)
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> (StatusCode, Json<ApiResponse<CreateBookingResponse>>) {
    let check_in = match parse_instant(&request.check_in) {
        Ok(dt) => dt,
        Err(e) => return invalid(format!("Invalid check_in: {}", e)),
    };
    let check_out = match parse_instant(&request.check_out) {
        Ok(dt) => dt,
        Err(e) => return invalid(format!("Invalid check_out: {}", e)),
    };
    let total_price = match Decimal::from_str(&request.total_price) {
        Ok(price) => price,
        Err(e) => return invalid(format!("Invalid total_price: {}", e)),
    };

    let reservation = ReservationRequest {
        hotel_id: request.hotel_id,
        room_ids: request.room_ids,
        check_in,
        check_out,
        guest: GuestContact {
            name: request.guest.name,
            email: request.guest.email,
            phone: request.guest.phone,
        },
        total_price,
    };

    match state.reservations.reserve(reservation).await {
        Ok(booking) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(CreateBookingResponse {
                booking_id: Some(booking.id.to_string()),
                status: "confirmed".to_string(),
                rooms: Some(booking.room_ids),
                message: Some("Booking confirmed".to_string()),
            })),
        ),
        Err(DomainError::RoomConflict { rooms }) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::failure(
                CreateBookingResponse {
                    booking_id: None,
                    status: "conflict".to_string(),
                    rooms: Some(rooms),
                    message: Some(
                        "Room(s) no longer available for the requested dates".to_string(),
                    ),
                },
                "Room(s) no longer available",
            )),
        ),
        Err(e @ DomainError::Validation(_)) => invalid(e.to_string()),
        Err(e @ DomainError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failure(
                CreateBookingResponse {
                    booking_id: None,
                    status: "not_found".to_string(),
                    rooms: None,
                    message: Some(e.to_string()),
                },
                e.to_string(),
            )),
        ),
        // LockTimeout / exhausted transient retries: the caller may try
        // again, nobody necessarily took the room.
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure(
                CreateBookingResponse {
                    booking_id: None,
                    status: "retry".to_string(),
                    rooms: None,
                    message: Some(e.to_string()),
                },
                e.to_string(),
            )),
        ),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Cancellation result", body = ApiResponse<CancelBookingResponse>),
        (status = 404, description = "Booking not found", body = ApiResponse<CancelBookingResponse>)
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<CancelBookingResponse>>) {
    let not_found = |message: String| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failure(
                CancelBookingResponse {
                    status: "not_found".to_string(),
                    message: Some(message.clone()),
                },
                message,
            )),
        )
    };

    let Ok(id) = Uuid::parse_str(&booking_id) else {
        return not_found(format!("Booking {} not found", booking_id));
    };

    match state.reservations.cancel(id).await {
        Ok(booking) => (
            StatusCode::OK,
            Json(ApiResponse::success(CancelBookingResponse {
                status: "cancelled".to_string(),
                message: Some(format!("Booking {} cancelled", booking.id)),
            })),
        ),
        Err(DomainError::NotFound { .. }) => not_found(format!("Booking {} not found", id)),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure(
                CancelBookingResponse {
                    status: "retry".to_string(),
                    message: Some(e.to_string()),
                },
                e.to_string(),
            )),
        ),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Booking {} not found",
                booking_id
            ))),
        )
    };

    let Ok(id) = Uuid::parse_str(&booking_id) else {
        return Err(not_found());
    };

    let booking = state.repos.bookings().find_by_id(id).await.map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    match booking {
        Some(b) => Ok(Json(ApiResponse::success(BookingDto::from(b)))),
        None => Err(not_found()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All ledger entries", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)>
{
    let bookings = state.repos.bookings().find_all().await.map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let dtos: Vec<BookingDto> = bookings.into_iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
