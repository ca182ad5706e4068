pub mod availability;
pub mod expiry_sweeper;
pub mod reservation;
pub mod room_locks;

pub use availability::AvailabilityService;
pub use expiry_sweeper::{ExpirySweeper, SweeperConfig};
pub use reservation::{ReservationConfig, ReservationRequest, ReservationService};
pub use room_locks::RoomLocks;
