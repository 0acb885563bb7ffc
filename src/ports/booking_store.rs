use crate::domain::{Booking, BookingId, BookingStatus};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ストアポート
///
/// 空室判定エンジンに渡す予約スナップショットの取得と、予約の永続化を担う。
///
/// スナップショットの一貫性（1回の呼び出しで内部的に整合した一覧を返すこと）は
/// ストア側の責務。判定から保存までの間の競合（check-then-insert）も
/// このポートの実装側で閉じる必要がある。
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 予約を保存する（新規ならINSERT、既存ならUPDATE）
    async fn save(&self, booking: Booking) -> Result<()>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// 期間 `[check_in, check_out)` と宿泊期間が重なる予約を取得する
    ///
    /// ステータスに関係なく返す。確定済みのみを対象にするのは判定エンジンの責務。
    async fn find_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Booking>>;

    /// 予約一覧をチェックイン日順で取得する
    ///
    /// `status`を指定した場合はそのステータスの予約のみを返す。
    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>>;
}
