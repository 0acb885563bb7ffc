use crate::application::booking::{
    BookingStats, ServiceDependencies, availability_summary as execute_availability_summary,
    booking_stats as execute_booking_stats, cancel_booking as execute_cancel_booking,
    check_availability as execute_check_availability, confirm_booking as execute_confirm_booking,
    get_booking as execute_get_booking, list_bookings as execute_list_bookings,
    submit_booking as execute_submit_booking,
};
use crate::domain::{
    AvailabilityResult, AvailabilitySummary, BookingId, BookingStatus, RoomType, commands::*,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        AvailabilityRequest, BookingCreatedResponse, BookingResponse, ListBookingsQuery,
        SubmitBookingRequest, SummaryQuery, parse_status_filter,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Availability handlers
// ============================================================================

/// GET /rooms - 部屋在庫カタログ
pub async fn list_room_types(State(state): State<Arc<AppState>>) -> Json<Vec<RoomType>> {
    Json(state.service_deps.inventory.room_types().to_vec())
}

/// POST /availability - 予約リクエストの空室確認
///
/// 予約は作成しない。空きがない場合も200で判定結果を返す。
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResult>, ApiError> {
    let query = CheckAvailability {
        request: req.to_request(),
        today: Utc::now().date_naive(),
    };

    let result = execute_check_availability(&state.service_deps, query).await?;

    Ok(Json(result))
}

/// GET /availability/summary - 全部屋タイプの空室状況
///
/// クエリパラメータ:
/// - check_in: チェックイン日（YYYY-MM-DD）
/// - check_out: チェックアウト日（YYYY-MM-DD）
pub async fn availability_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<AvailabilitySummary>, ApiError> {
    let query = SummarizeAvailability {
        check_in: query.check_in,
        check_out: query.check_out,
        today: Utc::now().date_naive(),
    };

    let summary = execute_availability_summary(&state.service_deps, query).await?;

    Ok(Json(summary))
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /bookings - 予約問い合わせを送信
///
/// 強制されるビジネスルール:
/// - 部屋タイプがカタログに存在すること
/// - 宿泊者の名前とメールアドレスがあること
/// - チェックアウトがチェックインより後で、チェックインが受付可能日以降であること
/// - 期間中に空きがあること（空きがない場合は409）
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    let (request, guest) = req.into_parts();
    let cmd = SubmitBooking {
        request,
        guest,
        submitted_at: Utc::now(),
    };

    let booking_id = execute_submit_booking(&state.service_deps, cmd).await?;

    let response = BookingCreatedResponse {
        booking_id: booking_id.value(),
        status: BookingStatus::Pending,
        message: "Booking inquiry submitted successfully".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /bookings/:id/confirm - 予約を確定
///
/// 確定時点の予約状況で空室を再判定する。
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = ConfirmBooking {
        booking_id: BookingId::from_uuid(booking_id),
        confirmed_at: Utc::now(),
    };

    let booking = execute_confirm_booking(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// POST /bookings/:id/cancel - 予約をキャンセル
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = CancelBooking {
        booking_id: BookingId::from_uuid(booking_id),
        cancelled_at: Utc::now(),
    };

    let booking = execute_cancel_booking(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings/:id - 予約詳細をIDで取得
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking =
        execute_get_booking(&state.service_deps, BookingId::from_uuid(booking_id)).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings - 予約一覧取得
///
/// クエリパラメータ:
/// - status: ステータスでフィルタリング（pending, confirmed, cancelled）（オプション）
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(parse_status_filter)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let bookings = execute_list_bookings(&state.service_deps, status).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /admin/dashboard - 予約件数の集計
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<BookingStats>, ApiError> {
    let stats = execute_booking_stats(&state.service_deps).await?;

    Ok(Json(stats))
}
