pub mod availability;
pub mod booking;
pub mod commands;
pub mod errors;
pub mod inventory;
pub mod overlap;
pub mod value_objects;

pub use availability::{
    AvailabilityResult, AvailabilitySummary, BookingPolicy, Rejection, RoomAvailability,
    availability_summary, validate_booking,
};
pub use booking::{Booking, BookingRequest, BookingStatus, ExistingBooking, GuestDetails};
pub use errors::*;
pub use inventory::{RoomInventory, RoomType};
pub use overlap::overlaps;
pub use value_objects::*;
