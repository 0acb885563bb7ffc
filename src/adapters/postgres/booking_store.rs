use crate::domain::{
    Booking, BookingId, BookingStatus, GuestCount, GuestDetails, RoomTypeKey,
};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

const SELECT_COLUMNS: &str = r#"
    SELECT
        booking_id,
        check_in,
        check_out,
        room_type,
        guest_count,
        guest_name,
        email,
        phone,
        special_requests,
        status,
        created_at,
        updated_at
    FROM bookings
"#;

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// PostgreSQLの行データをBookingに変換する
///
/// guest_countのi32から`GuestCount`への変換と、statusの文字列からの変換で
/// エラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let guest_count_i32: i32 = row.try_get("guest_count")?;
    let guest_count = u32::try_from(guest_count_i32)
        .ok()
        .and_then(|n| GuestCount::try_from(n).ok())
        .ok_or_else(|| invalid_data(format!("guest_count out of range: {}", guest_count_i32)))?;

    let status_str: &str = row.try_get("status")?;
    let status = BookingStatus::from_str(status_str).map_err(invalid_data)?;

    let room_type: String = row.try_get("room_type")?;

    Ok(Booking {
        booking_id: BookingId::from_uuid(row.try_get("booking_id")?),
        check_in: row.try_get("check_in")?,
        check_out: row.try_get("check_out")?,
        room_type: RoomTypeKey::new(room_type),
        guest_count,
        guest: GuestDetails {
            name: row.try_get("guest_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            special_requests: row.try_get("special_requests")?,
        },
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// BookingStoreのPostgreSQL実装
///
/// 1回の呼び出しは1つのSELECTで完結するため、返すスナップショットは
/// その時点で整合している。
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 予約を保存（upsert）
    ///
    /// INSERT ... ON CONFLICT UPDATEで新規作成とステータス更新を同じ経路で扱う。
    /// created_atは初回保存時の値を保持する。
    async fn save(&self, booking: Booking) -> Result<()> {
        let guest_count = i32::try_from(booking.guest_count.value()).map_err(|_| {
            invalid_data(format!(
                "guest_count out of range: {}",
                booking.guest_count.value()
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                check_in,
                check_out,
                room_type,
                guest_count,
                guest_name,
                email,
                phone,
                special_requests,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (booking_id)
            DO UPDATE SET
                check_in = EXCLUDED.check_in,
                check_out = EXCLUDED.check_out,
                room_type = EXCLUDED.room_type,
                guest_count = EXCLUDED.guest_count,
                guest_name = EXCLUDED.guest_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                special_requests = EXCLUDED.special_requests,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(booking.booking_id.value())
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.room_type.as_str())
        .bind(guest_count)
        .bind(booking.guest.name)
        .bind(booking.guest.email)
        .bind(booking.guest.phone)
        .bind(booking.guest.special_requests)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE booking_id = $1"))
            .bind(booking_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// 期間が重なる予約を取得（空室スナップショット）
    ///
    /// 半開区間の重なり判定 `check_in < $2 AND check_out > $1` をSQL側で行う。
    async fn find_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE check_in < $2 AND check_out > $1 ORDER BY check_in ASC, created_at ASC"
        ))
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} WHERE status = $1 ORDER BY check_in ASC, created_at ASC"
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} ORDER BY check_in ASC, created_at ASC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(map_row_to_booking).collect()
    }
}
