use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookingId, CancelBookingError, ConfirmBookingError, GuestCount, RoomTypeKey, overlaps,
};

/// 予約ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// 問い合わせ受付済み（在庫を確保しない）
    Pending,
    /// 確定済み（在庫を確保する）
    Confirmed,
    /// キャンセル済み
    Cancelled,
}

impl BookingStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// 空室判定の入力となる予約リクエスト（一時的、永続化しない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: RoomTypeKey,
    pub guest_count: GuestCount,
}

/// 既存予約のスナップショット（判定エンジンからは読み取り専用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    pub id: BookingId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: RoomTypeKey,
    pub status: BookingStatus,
}

impl ExistingBooking {
    /// 指定期間と宿泊期間が重なるか
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        overlaps(check_in, check_out, self.check_in, self.check_out)
    }
}

/// 宿泊者情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
}

/// 予約集約 - 1件の予約問い合わせ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: RoomTypeKey,
    pub guest_count: GuestCount,
    pub guest: GuestDetails,
    pub status: BookingStatus,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// 判定エンジンに渡すスナップショット形式に変換する
    pub fn to_existing(&self) -> ExistingBooking {
        ExistingBooking {
            id: self.booking_id,
            check_in: self.check_in,
            check_out: self.check_out,
            room_type: self.room_type.clone(),
            status: self.status,
        }
    }

    /// 空室判定用のリクエストに変換する
    pub fn to_request(&self) -> BookingRequest {
        BookingRequest {
            check_in: self.check_in,
            check_out: self.check_out,
            room_type: self.room_type.clone(),
            guest_count: self.guest_count,
        }
    }
}

/// 純粋関数：予約問い合わせを作成する
///
/// 状態はPending。空室判定は呼び出し側（アプリケーション層）の責務。
pub fn submit_inquiry(
    request: BookingRequest,
    guest: GuestDetails,
    submitted_at: DateTime<Utc>,
) -> Booking {
    Booking {
        booking_id: BookingId::new(),
        check_in: request.check_in,
        check_out: request.check_out,
        room_type: request.room_type,
        guest_count: request.guest_count,
        guest,
        status: BookingStatus::Pending,
        created_at: submitted_at,
        updated_at: submitted_at,
    }
}

/// 純粋関数：予約を確定する
///
/// ビジネスルール：
/// - Pendingのみ確定可能
///
/// 副作用なし。新しいBookingを返す。
pub fn confirm(booking: &Booking, confirmed_at: DateTime<Utc>) -> Result<Booking, ConfirmBookingError> {
    match booking.status {
        BookingStatus::Pending => Ok(Booking {
            status: BookingStatus::Confirmed,
            updated_at: confirmed_at,
            ..booking.clone()
        }),
        BookingStatus::Confirmed => Err(ConfirmBookingError::AlreadyConfirmed),
        BookingStatus::Cancelled => Err(ConfirmBookingError::Cancelled),
    }
}

/// 純粋関数：予約をキャンセルする
///
/// ビジネスルール：
/// - PendingとConfirmedはキャンセル可能
/// - キャンセル済みは終端状態
pub fn cancel(booking: &Booking, cancelled_at: DateTime<Utc>) -> Result<Booking, CancelBookingError> {
    if booking.status == BookingStatus::Cancelled {
        return Err(CancelBookingError::AlreadyCancelled);
    }

    Ok(Booking {
        status: BookingStatus::Cancelled,
        updated_at: cancelled_at,
        ..booking.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_booking() -> Booking {
        let request = BookingRequest {
            check_in: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
            room_type: RoomTypeKey::from("master-suite"),
            guest_count: GuestCount::try_from(4).unwrap(),
        };
        let guest = GuestDetails {
            name: "Test Guest".to_string(),
            email: "test@example.com".to_string(),
            phone: None,
            special_requests: Some("Late arrival".to_string()),
        };
        submit_inquiry(request, guest, Utc::now())
    }

    #[test]
    fn test_submit_inquiry_is_pending() {
        let booking = create_test_booking();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.created_at, booking.updated_at);
        assert_eq!(booking.guest_count.value(), 4);
    }

    #[test]
    fn test_confirm_pending_booking() {
        let booking = create_test_booking();
        let confirmed_at = booking.created_at + chrono::Duration::hours(1);

        let confirmed = confirm(&booking, confirmed_at).unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.updated_at, confirmed_at);
        assert_eq!(confirmed.booking_id, booking.booking_id);
    }

    #[test]
    fn test_confirm_twice_fails() {
        let booking = create_test_booking();
        let confirmed = confirm(&booking, Utc::now()).unwrap();
        assert_eq!(
            confirm(&confirmed, Utc::now()),
            Err(ConfirmBookingError::AlreadyConfirmed)
        );
    }

    #[test]
    fn test_confirm_cancelled_fails() {
        let booking = create_test_booking();
        let cancelled = cancel(&booking, Utc::now()).unwrap();
        assert_eq!(
            confirm(&cancelled, Utc::now()),
            Err(ConfirmBookingError::Cancelled)
        );
    }

    #[test]
    fn test_cancel_confirmed_booking() {
        let booking = create_test_booking();
        let confirmed = confirm(&booking, Utc::now()).unwrap();
        let cancelled = cancel(&confirmed, Utc::now()).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_cancel_twice_fails() {
        let booking = create_test_booking();
        let cancelled = cancel(&booking, Utc::now()).unwrap();
        assert_eq!(
            cancel(&cancelled, Utc::now()),
            Err(CancelBookingError::AlreadyCancelled)
        );
    }

    #[test]
    fn test_to_existing_keeps_dates_and_status() {
        let booking = create_test_booking();
        let existing = booking.to_existing();
        assert_eq!(existing.id, booking.booking_id);
        assert_eq!(existing.check_in, booking.check_in);
        assert_eq!(existing.check_out, booking.check_out);
        assert_eq!(existing.status, BookingStatus::Pending);
    }

    #[test]
    fn test_booking_status_round_trip_through_str() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
        assert!("tentative".parse::<BookingStatus>().is_err());
    }
}
