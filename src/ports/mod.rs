pub mod booking_store;

pub use booking_store::BookingStore;
