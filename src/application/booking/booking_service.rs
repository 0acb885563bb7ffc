use crate::domain::{
    self, AvailabilityResult, AvailabilitySummary, Booking, BookingId, BookingPolicy,
    BookingStatus, ExistingBooking, GuestDetails, RoomInventory, RoomTypeKey, booking,
    commands::*,
};
use crate::ports::BookingStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub inventory: Arc<RoomInventory>,
    pub policy: BookingPolicy,
}

/// 管理画面のダッシュボード集計
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingStats {
    pub total_bookings: usize,
    pub confirmed_bookings: usize,
    pub pending_bookings: usize,
    pub cancelled_bookings: usize,
    /// 確定済み予約の宿泊人数合計
    pub total_guests: u64,
}

/// 部屋タイプがカタログに存在することを確認する
///
/// 判定エンジンは未知の部屋タイプでパニックするため、
/// 利用者の入力はここで通常のエラーに変換する。
fn ensure_known_room_type(inventory: &RoomInventory, key: &RoomTypeKey) -> Result<()> {
    if inventory.get(key).is_none() {
        return Err(BookingApplicationError::UnknownRoomType(key.clone()));
    }
    Ok(())
}

/// 空室判定用のスナップショットを取得するヘルパー関数
///
/// ストアから期間が重なる予約を1回の呼び出しで取得する。
/// ステータスによる絞り込みは判定エンジン側で行う。
async fn load_snapshot(
    store: &Arc<dyn BookingStore>,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<Vec<ExistingBooking>> {
    let bookings = store
        .find_overlapping(check_in, check_out)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    Ok(bookings.iter().map(Booking::to_existing).collect())
}

/// IDで予約を取得するヘルパー関数
async fn load_booking(store: &Arc<dyn BookingStore>, booking_id: BookingId) -> Result<Booking> {
    store
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::BookingNotFound)
}

/// 宿泊者情報を検証し、空文字の任意項目をNoneに揃える
fn normalize_guest_details(guest: GuestDetails) -> Result<GuestDetails> {
    let name = guest.name.trim().to_string();
    if name.is_empty() {
        return Err(BookingApplicationError::InvalidGuestDetails(
            "guest name is required".to_string(),
        ));
    }

    let email = guest.email.trim().to_string();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err(BookingApplicationError::InvalidGuestDetails(format!(
            "invalid email address: {}",
            email
        )));
    }

    let non_empty = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    Ok(GuestDetails {
        name,
        email,
        phone: non_empty(guest.phone),
        special_requests: non_empty(guest.special_requests),
    })
}

/// 予約リクエストの空室を確認する
///
/// 予約は作成しない。スナップショットは呼び出しごとにストアから取得する。
pub async fn check_availability(
    deps: &ServiceDependencies,
    query: CheckAvailability,
) -> Result<AvailabilityResult> {
    ensure_known_room_type(&deps.inventory, &query.request.room_type)?;

    let snapshot = load_snapshot(
        &deps.booking_store,
        query.request.check_in,
        query.request.check_out,
    )
    .await?;

    let result = domain::validate_booking(
        &deps.inventory,
        &deps.policy,
        &query.request,
        &snapshot,
        query.today,
    );

    tracing::debug!(
        room_type = %query.request.room_type,
        check_in = %query.request.check_in,
        check_out = %query.request.check_out,
        available = result.is_available,
        "Availability checked"
    );

    Ok(result)
}

/// 期間内の全部屋タイプの空室状況を取得する
pub async fn availability_summary(
    deps: &ServiceDependencies,
    query: SummarizeAvailability,
) -> Result<AvailabilitySummary> {
    let snapshot = load_snapshot(&deps.booking_store, query.check_in, query.check_out).await?;

    Ok(domain::availability_summary(
        &deps.inventory,
        &deps.policy,
        query.check_in,
        query.check_out,
        &snapshot,
        query.today,
    ))
}

/// 予約問い合わせを送信する
///
/// ビジネスルール：
/// - 宿泊者の名前とメールアドレスが必須
/// - 部屋タイプがカタログに存在すること
/// - 日付が正しく、期間中に空きがあること
/// - 作成される予約はPending（在庫を確保しない）
///
/// # 一貫性保証
///
/// 空室判定と保存は別々の呼び出しであり、同時に送信された問い合わせが
/// 同じスナップショットに対してどちらも受け付けられる可能性がある。
/// Pendingの予約は在庫を確保しないため、最終的な判定は`confirm_booking`で再度行う。
pub async fn submit_booking(deps: &ServiceDependencies, cmd: SubmitBooking) -> Result<BookingId> {
    let guest = normalize_guest_details(cmd.guest)?;
    ensure_known_room_type(&deps.inventory, &cmd.request.room_type)?;

    let snapshot =
        load_snapshot(&deps.booking_store, cmd.request.check_in, cmd.request.check_out).await?;

    let result = domain::validate_booking(
        &deps.inventory,
        &deps.policy,
        &cmd.request,
        &snapshot,
        cmd.submitted_at.date_naive(),
    );

    if !result.is_available {
        tracing::warn!(
            room_type = %cmd.request.room_type,
            check_in = %cmd.request.check_in,
            check_out = %cmd.request.check_out,
            "Booking rejected: {}",
            result.message
        );
        return Err(BookingApplicationError::BookingRejected(result));
    }

    let new_booking = booking::submit_inquiry(cmd.request, guest, cmd.submitted_at);
    let booking_id = new_booking.booking_id;

    deps.booking_store
        .save(new_booking)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::info!(booking_id = %booking_id, "Booking inquiry submitted");

    Ok(booking_id)
}

/// 予約を確定する
///
/// ビジネスルール：
/// - Pendingの予約のみ確定可能
/// - 確定時点のスナップショットで空室を再判定する
///   （Pendingの問い合わせ同士は互いに在庫を確保しないため）
/// - 受付日数の判定は問い合わせ受付日を基準にする（チェックイン当日でも確定できる）
pub async fn confirm_booking(deps: &ServiceDependencies, cmd: ConfirmBooking) -> Result<Booking> {
    let current = load_booking(&deps.booking_store, cmd.booking_id).await?;
    let confirmed = booking::confirm(&current, cmd.confirmed_at)?;

    ensure_known_room_type(&deps.inventory, &current.room_type)?;

    let snapshot = load_snapshot(&deps.booking_store, current.check_in, current.check_out).await?;
    let result = domain::validate_booking(
        &deps.inventory,
        &deps.policy,
        &current.to_request(),
        &snapshot,
        current.created_at.date_naive(),
    );

    if !result.is_available {
        tracing::warn!(
            booking_id = %cmd.booking_id,
            "Booking can no longer be confirmed: {}",
            result.message
        );
        return Err(BookingApplicationError::BookingRejected(result));
    }

    deps.booking_store
        .save(confirmed.clone())
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::info!(booking_id = %cmd.booking_id, "Booking confirmed");

    Ok(confirmed)
}

/// 予約をキャンセルする
///
/// ビジネスルール：
/// - PendingとConfirmedはキャンセル可能
/// - キャンセル済みの予約は再度キャンセルできない
pub async fn cancel_booking(deps: &ServiceDependencies, cmd: CancelBooking) -> Result<Booking> {
    let current = load_booking(&deps.booking_store, cmd.booking_id).await?;
    let cancelled = booking::cancel(&current, cmd.cancelled_at)?;

    deps.booking_store
        .save(cancelled.clone())
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::info!(
        booking_id = %cmd.booking_id,
        previous_status = current.status.as_str(),
        "Booking cancelled"
    );

    Ok(cancelled)
}

/// IDで予約を取得する
pub async fn get_booking(deps: &ServiceDependencies, booking_id: BookingId) -> Result<Booking> {
    load_booking(&deps.booking_store, booking_id).await
}

/// 予約一覧を取得する（管理画面用）
pub async fn list_bookings(
    deps: &ServiceDependencies,
    status: Option<BookingStatus>,
) -> Result<Vec<Booking>> {
    deps.booking_store
        .list(status)
        .await
        .map_err(BookingApplicationError::StoreError)
}

/// ダッシュボード用の集計を取得する
pub async fn booking_stats(deps: &ServiceDependencies) -> Result<BookingStats> {
    let bookings = list_bookings(deps, None).await?;

    let count = |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count();

    Ok(BookingStats {
        total_bookings: bookings.len(),
        confirmed_bookings: count(BookingStatus::Confirmed),
        pending_bookings: count(BookingStatus::Pending),
        cancelled_bookings: count(BookingStatus::Cancelled),
        total_guests: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .map(|b| u64::from(b.guest_count.value()))
            .sum(),
    })
}
