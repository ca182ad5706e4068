pub mod booking;
pub mod date_range;
pub mod repositories;
pub mod room;

// Re-export commonly used types
pub use booking::{Booking, BookingRepository, GuestContact};
pub use date_range::DateRange;
pub use repositories::{DomainResult, RepositoryProvider};
pub use room::{Room, RoomCategory, RoomRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
