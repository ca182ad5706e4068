//! # Tripnest Booking Core
//!
//! Hotel reservation subsystem: availability snapshots over arbitrary date
//! ranges, and reservation commits that never allow two confirmed bookings
//! to overlap on the same room.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, value types and repository traits
//! - **application**: Use cases — availability snapshots, the reservation
//!   transaction manager, the occupancy expiry sweeper
//! - **infrastructure**: Storage backends (in-memory store behind the
//!   repository traits)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, retry, graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export storage and services for easy access
pub use application::{AvailabilityService, ExpirySweeper, ReservationService};
pub use infrastructure::InMemoryStorage;

// Re-export API router
pub use interfaces::http::create_api_router;
