//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AvailabilityService, ReservationService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;

use super::modules::{availability, bookings, health, metrics, rooms};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Availability
        availability::handlers::get_availability,
        // Rooms
        rooms::handlers::list_hotel_rooms,
        rooms::handlers::get_room,
        // Bookings
        bookings::handlers::create_booking,
        bookings::handlers::cancel_booking,
        bookings::handlers::get_booking,
        bookings::handlers::list_bookings,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::HealthResponse,
            // Availability
            availability::AvailabilityQuery,
            availability::AvailableRoomDto,
            // Rooms
            rooms::RoomDto,
            // Bookings
            bookings::CreateBookingRequest,
            bookings::CreateBookingResponse,
            bookings::GuestContactDto,
            bookings::BookingDto,
            bookings::CancelBookingResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Availability", description = "Room availability snapshots over a date range"),
        (name = "Rooms", description = "Read-only room registry views"),
        (name = "Bookings", description = "Reservation commits and cancellations"),
    ),
    info(
        title = "Tripnest Booking Core API",
        version = "1.0.0",
        description = "REST API for hotel room availability and atomic reservation commits",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    availability_service: Arc<AvailabilityService>,
    reservation_service: Arc<ReservationService>,
    prometheus_handle: PrometheusHandle,
) -> Router {
    // ── Per-module states ──────────────────────────────────────
    let hotel_room_state = rooms::RoomAppState {
        repos: repos.clone(),
    };

    let availability_state = availability::AvailabilityAppState {
        availability: availability_service,
    };

    let booking_state = bookings::BookingAppState {
        repos: repos.clone(),
        reservations: reservation_service,
    };

    let health_state = health::HealthState {
        repos,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = metrics::MetricsState {
        handle: prometheus_handle,
    };

    // ── Routers ────────────────────────────────────────────────
    let hotel_routes = Router::new()
        .route(
            "/{hotel_id}/availability",
            get(availability::get_availability).with_state(availability_state),
        )
        .route(
            "/{hotel_id}/rooms",
            get(rooms::list_hotel_rooms).with_state(hotel_room_state.clone()),
        );

    let room_routes = Router::new()
        .route("/{room_id}", get(rooms::get_room))
        .with_state(hotel_room_state);

    let booking_routes = Router::new()
        .route(
            "/",
            post(bookings::create_booking).get(bookings::list_bookings),
        )
        .route(
            "/{booking_id}",
            get(bookings::get_booking).delete(bookings::cancel_booking),
        )
        .with_state(booking_state);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .route(
            "/health",
            get(health::health_check).with_state(health_state),
        )
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics_state),
        )
        // Hotels (availability + registry views)
        .nest("/api/v1/hotels", hotel_routes)
        // Rooms (standalone lookup)
        .nest("/api/v1/rooms", room_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
