use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, availability_summary, cancel_booking, check_availability, confirm_booking,
    dashboard, get_booking, list_bookings, list_room_types, submit_booking,
};

/// Creates the API router with all booking endpoints
///
/// Availability (read-only):
/// - GET /rooms - Room inventory catalog
/// - POST /availability - Check a single booking request
/// - GET /availability/summary - Availability of every room type for a date range
///
/// Bookings:
/// - POST /bookings - Submit a booking inquiry
/// - GET /bookings - List bookings (optional status filter)
/// - GET /bookings/:id - Get booking details
/// - POST /bookings/:id/confirm - Confirm a pending booking
/// - POST /bookings/:id/cancel - Cancel a booking
///
/// Admin:
/// - GET /admin/dashboard - Booking counts
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Availability endpoints
        .route("/rooms", get(list_room_types))
        .route("/availability", post(check_availability))
        .route("/availability/summary", get(availability_summary))
        // Booking endpoints
        .route("/bookings", post(submit_booking).get(list_bookings))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/:id/confirm", post(confirm_booking))
        .route("/bookings/:id/cancel", post(cancel_booking))
        // Admin endpoints
        .route("/admin/dashboard", get(dashboard))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
