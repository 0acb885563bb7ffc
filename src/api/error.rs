use crate::application::booking::BookingApplicationError;
use crate::domain::Rejection;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーとリクエストパラメータの不備を、
/// HTTPレスポンスへマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(BookingApplicationError),
    BadRequest(String),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            // 400 Bad Request - クエリパラメータの不備
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse::new("BAD_REQUEST", msg));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ApiError::Application(err) => err,
        };

        let (status, body) = match err {
            // 404 Not Found - リクエストされたリソースが存在しない
            BookingApplicationError::BookingNotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("BOOKING_NOT_FOUND", "Booking not found"),
            ),

            // 409 Conflict - 期間中に空きがない、または状態遷移の競合
            BookingApplicationError::BookingRejected(result)
                if result.rejection == Some(Rejection::RoomUnavailable) =>
            {
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("ROOM_UNAVAILABLE", result.message.clone())
                        .with_availability(result),
                )
            }
            BookingApplicationError::InvalidStatusTransition(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("INVALID_STATUS_TRANSITION", msg),
            ),

            // 422 Unprocessable Entity - ビジネスルール違反
            BookingApplicationError::BookingRejected(result) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("INVALID_DATES", result.message.clone())
                    .with_availability(result),
            ),
            BookingApplicationError::UnknownRoomType(key) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("UNKNOWN_ROOM_TYPE", format!("Unknown room type: {}", key)),
            ),
            BookingApplicationError::InvalidGuestDetails(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("INVALID_GUEST_DETAILS", msg),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookingApplicationError::StoreError(ref e) => {
                tracing::error!("Booking store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("STORE_ERROR", "An unexpected error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
