//! Business logic and use cases.

pub mod services;

pub use services::{
    AvailabilityService, ExpirySweeper, ReservationConfig, ReservationRequest,
    ReservationService, SweeperConfig,
};
