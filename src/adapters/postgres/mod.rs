pub mod booking_store;

// パブリックに型を再エクスポート
pub use booking_store::BookingStore as PostgresBookingStore;
