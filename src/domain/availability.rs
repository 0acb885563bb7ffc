use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    BookingRequest, BookingStatus, ExistingBooking, GuestCount, RoomInventory, RoomType,
    RoomTypeKey,
};

// ============================================================================
// ポリシー
// ============================================================================

/// 予約受付ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    /// 今日から最短チェックイン日までの日数
    ///
    /// 1の場合は当日チェックイン不可（チェックインは明日以降）。
    /// 0の場合は当日チェックインを受け付ける。
    pub min_lead_days: u32,
}

impl BookingPolicy {
    pub fn new(min_lead_days: u32) -> Self {
        Self { min_lead_days }
    }

    /// 受け付け可能な最も早いチェックイン日
    pub fn earliest_check_in(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.min_lead_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    fn lead_time_message(&self) -> String {
        match self.min_lead_days {
            0 => "Check-in date cannot be in the past".to_string(),
            1 => "Check-in date must be in the future".to_string(),
            n => format!("Check-in date must be at least {} days from today", n),
        }
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self { min_lead_days: 1 }
    }
}

// ============================================================================
// 判定結果
// ============================================================================

/// 予約を受け付けられない理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// チェックアウトがチェックイン以前
    InvalidDateOrder,
    /// チェックインが受付可能日より前
    CheckInInPast,
    /// 期間中に空きがない
    RoomUnavailable,
}

/// 空室判定の結果
///
/// 判定エンジンはエラーを返さない。受け付けられない理由はすべてこの値で表現する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// 日付の構造的な検証に通ったか
    pub is_valid: bool,
    /// 期間全体で部屋（または一棟）が空いているか
    pub is_available: bool,
    /// 競合の説明（空いている場合は空）
    pub conflicts: Vec<String>,
    pub message: String,
    /// 受け付けられない理由（空いている場合はNone）
    pub rejection: Option<Rejection>,
}

impl AvailabilityResult {
    fn invalid(rejection: Rejection, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            is_available: false,
            conflicts: Vec::new(),
            message: message.into(),
            rejection: Some(rejection),
        }
    }

    fn available(room_type: &RoomType) -> Self {
        Self {
            is_valid: true,
            is_available: true,
            conflicts: Vec::new(),
            message: format!("{} is available for your dates", room_type.name),
            rejection: None,
        }
    }

    fn unavailable(room_type: &RoomType, conflicts: Vec<String>) -> Self {
        let message = format!("{} not available: {}", room_type.name, conflicts.join(", "));
        Self {
            is_valid: true,
            is_available: false,
            conflicts,
            message,
            rejection: Some(Rejection::RoomUnavailable),
        }
    }
}

/// 部屋タイプごとの空室状況
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// 全部屋タイプの空室状況（カレンダー表示用）
pub type AvailabilitySummary = BTreeMap<RoomTypeKey, RoomAvailability>;

// ============================================================================
// 判定エンジン
// ============================================================================

/// 純粋関数：予約リクエストが受け付け可能か判定する
///
/// 判定手順：
/// 1. 日付の構造的な検証（チェックアウト > チェックイン、チェックインが受付可能日以降）。
///    失敗した場合は競合判定を行わずに返す。
/// 2. 確定済み（Confirmed）の予約のみを対象とする。PendingとCancelledは無視する。
/// 3. 期間が重なる予約を一度だけ抽出する。
/// 4. 一棟貸しのリクエスト：重なる予約が1件でもあれば不可。すべての競合を報告する。
///    個別の部屋のリクエスト：
///    - 一棟貸しの予約が重なれば不可。その一棟貸しの予約1件のみを報告する。
///    - 同じ部屋タイプの重なる予約数が部屋数以上なら不可。集約メッセージを1件報告する。
///    - それ以外は可。他の部屋タイプの予約は無関係。
///
/// 副作用なし。同じ入力に対して常に同じ結果を返す。
///
/// # パニック
/// `request.room_type`がカタログに存在しない場合（呼び出し側の誤用）
pub fn validate_booking(
    inventory: &RoomInventory,
    policy: &BookingPolicy,
    request: &BookingRequest,
    existing_bookings: &[ExistingBooking],
    today: NaiveDate,
) -> AvailabilityResult {
    if request.check_out <= request.check_in {
        return AvailabilityResult::invalid(
            Rejection::InvalidDateOrder,
            "Check-out date must be after check-in date",
        );
    }

    if request.check_in < policy.earliest_check_in(today) {
        return AvailabilityResult::invalid(Rejection::CheckInInPast, policy.lead_time_message());
    }

    let room_type = inventory
        .get(&request.room_type)
        .unwrap_or_else(|| panic!("unknown room type: {}", request.room_type));

    let conflicts: Vec<&ExistingBooking> = existing_bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .filter(|b| b.overlaps(request.check_in, request.check_out))
        .collect();

    let reported = if room_type.is_whole_property {
        whole_property_conflicts(inventory, &conflicts)
    } else {
        individual_room_conflicts(inventory, room_type, &conflicts)
    };

    if reported.is_empty() {
        AvailabilityResult::available(room_type)
    } else {
        AvailabilityResult::unavailable(room_type, reported)
    }
}

/// 一棟貸し：どの部屋タイプの予約でも重なれば競合
fn whole_property_conflicts(inventory: &RoomInventory, conflicts: &[&ExistingBooking]) -> Vec<String> {
    conflicts
        .iter()
        .map(|b| {
            format!(
                "{} ({} to {})",
                inventory.display_name(&b.room_type),
                b.check_in,
                b.check_out
            )
        })
        .collect()
}

/// 個別の部屋：一棟貸しの予約、または同じ部屋タイプの満室が競合
fn individual_room_conflicts(
    inventory: &RoomInventory,
    room_type: &RoomType,
    conflicts: &[&ExistingBooking],
) -> Vec<String> {
    let whole = inventory.whole_property();
    if let Some(villa) = conflicts.iter().find(|b| b.room_type == whole.key) {
        return vec![format!(
            "{} is booked ({} to {})",
            whole.name, villa.check_in, villa.check_out
        )];
    }

    let same_type = conflicts
        .iter()
        .filter(|b| b.room_type == room_type.key)
        .count();
    if same_type >= room_type.unit_quantity.value() as usize {
        return vec![format!(
            "All {} rooms are booked during this period",
            room_type.name
        )];
    }

    Vec::new()
}

/// 純粋関数：全部屋タイプの空室状況を取得する
///
/// 部屋タイプごとに`validate_booking`を呼び出すだけで、追加の検証は行わない。
/// 計算量は O(部屋タイプ数 × 既存予約数)。
pub fn availability_summary(
    inventory: &RoomInventory,
    policy: &BookingPolicy,
    check_in: NaiveDate,
    check_out: NaiveDate,
    existing_bookings: &[ExistingBooking],
    today: NaiveDate,
) -> AvailabilitySummary {
    inventory
        .room_types()
        .iter()
        .map(|room_type| {
            let request = BookingRequest {
                check_in,
                check_out,
                room_type: room_type.key.clone(),
                guest_count: GuestCount::ONE,
            };
            let result = validate_booking(inventory, policy, &request, existing_bookings, today);
            let availability = RoomAvailability {
                available: result.is_available,
                reason: (!result.is_available).then_some(result.message),
            };
            (room_type.key.clone(), availability)
        })
        .collect()
}
