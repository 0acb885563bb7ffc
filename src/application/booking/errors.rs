use thiserror::Error;

use crate::domain::{AvailabilityResult, CancelBookingError, ConfirmBookingError, RoomTypeKey};

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// カタログに存在しない部屋タイプ
    #[error("Unknown room type: {0}")]
    UnknownRoomType(RoomTypeKey),

    /// 宿泊者情報が不正
    #[error("Invalid guest details: {0}")]
    InvalidGuestDetails(String),

    /// 日付が不正、または空きがない
    #[error("Booking rejected: {}", .0.message)]
    BookingRejected(AvailabilityResult),

    /// 予約が見つからない
    #[error("Booking not found")]
    BookingNotFound,

    /// 予約の状態遷移が不正（例: キャンセル済みの確定）
    #[error("Invalid status transition: {0}")]
    InvalidStatusTransition(String),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;

impl From<ConfirmBookingError> for BookingApplicationError {
    fn from(err: ConfirmBookingError) -> Self {
        match err {
            ConfirmBookingError::AlreadyConfirmed => BookingApplicationError::InvalidStatusTransition(
                "booking is already confirmed".to_string(),
            ),
            ConfirmBookingError::Cancelled => BookingApplicationError::InvalidStatusTransition(
                "cancelled booking cannot be confirmed".to_string(),
            ),
        }
    }
}

impl From<CancelBookingError> for BookingApplicationError {
    fn from(err: CancelBookingError) -> Self {
        match err {
            CancelBookingError::AlreadyCancelled => BookingApplicationError::InvalidStatusTransition(
                "booking is already cancelled".to_string(),
            ),
        }
    }
}
