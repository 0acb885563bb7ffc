use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingRequest, GuestDetails};

/// クエリ：予約リクエストの空室を確認する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAvailability {
    pub request: BookingRequest,
    /// 判定の基準日
    pub today: NaiveDate,
}

/// クエリ：期間内の全部屋タイプの空室状況を取得する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeAvailability {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub today: NaiveDate,
}

/// コマンド：予約問い合わせを送信する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBooking {
    pub request: BookingRequest,
    pub guest: GuestDetails,
    pub submitted_at: DateTime<Utc>,
}

/// コマンド：予約を確定する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmBooking {
    pub booking_id: BookingId,
    pub confirmed_at: DateTime<Utc>,
}

/// コマンド：予約をキャンセルする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub cancelled_at: DateTime<Utc>,
}
