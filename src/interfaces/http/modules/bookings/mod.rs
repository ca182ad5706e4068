pub mod dto;
pub mod handlers;

pub use dto::{
    BookingDto, CancelBookingResponse, CreateBookingRequest, CreateBookingResponse,
    GuestContactDto,
};
pub use handlers::{
    cancel_booking, create_booking, get_booking, list_bookings, BookingAppState,
};
