mod booking_service;
mod errors;

pub use booking_service::{
    BookingStats, ServiceDependencies, availability_summary, booking_stats, cancel_booking,
    check_availability, confirm_booking, get_booking, list_bookings, submit_booking,
};
pub use errors::{BookingApplicationError, Result};
