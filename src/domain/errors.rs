use thiserror::Error;

use super::RoomTypeKey;

/// 宿泊人数のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestCountError {
    /// 0名は不可
    #[error("guest count must be at least 1")]
    Zero,

    /// 上限を超えている
    #[error("guest count {0} exceeds the maximum")]
    TooLarge(u32),
}

/// 部屋数のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitQuantityError {
    /// 0室は不可
    #[error("unit quantity must be at least 1")]
    Zero,
}

/// 在庫カタログの設定エラー
///
/// 起動時のカタログ構築で検出される。リクエスト単位では発生しない。
#[derive(Debug, Error)]
pub enum InventoryError {
    /// 部屋タイプが1つも定義されていない
    #[error("room inventory is empty")]
    Empty,

    /// 同じキーの部屋タイプが複数定義されている
    #[error("duplicate room type key: {0}")]
    DuplicateKey(RoomTypeKey),

    /// 一棟貸しの部屋タイプが1つではない
    #[error("expected exactly one whole-property room type, found {0}")]
    WholePropertyCount(usize),

    /// カタログJSONの読み込み失敗
    #[error("invalid room inventory definition")]
    Parse(#[from] serde_json::Error),
}

/// 予約確定のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmBookingError {
    /// 既に確定済み
    AlreadyConfirmed,
    /// キャンセル済みの予約は確定不可
    Cancelled,
}

/// 予約キャンセルのエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelBookingError {
    /// 既にキャンセル済み
    AlreadyCancelled,
}
