use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    AvailabilityResult, Booking, BookingRequest, BookingStatus, GuestCount, GuestDetails,
    RoomTypeKey,
};

/// 空室確認リクエスト（POST /availability）
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: RoomTypeKey,
    #[serde(default = "default_guest_count")]
    pub guest_count: GuestCount,
}

fn default_guest_count() -> GuestCount {
    GuestCount::ONE
}

impl AvailabilityRequest {
    pub fn to_request(self) -> BookingRequest {
        BookingRequest {
            check_in: self.check_in,
            check_out: self.check_out,
            room_type: self.room_type,
            guest_count: self.guest_count,
        }
    }
}

/// 空室状況サマリーのクエリパラメータ（GET /availability/summary）
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// 予約問い合わせリクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
pub struct SubmitBookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: RoomTypeKey,
    pub guest_count: GuestCount,
    pub guest_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
}

impl SubmitBookingRequest {
    pub fn into_parts(self) -> (BookingRequest, GuestDetails) {
        let request = BookingRequest {
            check_in: self.check_in,
            check_out: self.check_out,
            room_type: self.room_type,
            guest_count: self.guest_count,
        };
        let guest = GuestDetails {
            name: self.guest_name,
            email: self.email,
            phone: self.phone,
            special_requests: self.special_requests,
        };
        (request, guest)
    }
}

/// 予約作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingCreatedResponse {
    pub booking_id: Uuid,
    pub status: BookingStatus,
    pub message: String,
}

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// ステータスでフィルタリング
    pub status: Option<String>,
}

/// 予約レスポンス（GET /bookings/:id と GET /bookings）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: String,
    pub guest_count: u32,
    pub guest_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.booking_id.value(),
            check_in: booking.check_in,
            check_out: booking.check_out,
            room_type: booking.room_type.as_str().to_string(),
            guest_count: booking.guest_count.value(),
            guest_name: booking.guest.name,
            email: booking.guest.email,
            phone: booking.guest.phone,
            special_requests: booking.guest.special_requests,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// 予約が受け付けられなかった場合の判定結果
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AvailabilityResult>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            availability: None,
        }
    }

    pub fn with_availability(mut self, result: AvailabilityResult) -> Self {
        self.availability = Some(result);
        self
    }
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(status: &str) -> Result<BookingStatus, String> {
    status.parse::<BookingStatus>()
}
