use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{GuestCountError, UnitQuantityError};

/// 予約ID - 予約集約のID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 部屋タイプのキー（例: "entire-villa", "triple-room"）
///
/// 在庫カタログ内で部屋タイプを一意に識別する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomTypeKey(String);

impl RoomTypeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomTypeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// 宿泊人数
///
/// 不変条件：1名以上、`GuestCount::MAX`以下。
/// 空室判定には使用しない（料金・表示用に保持するのみ）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GuestCount(u32);

impl GuestCount {
    /// 1名
    pub const ONE: GuestCount = GuestCount(1);

    /// 上限（ストアのINTEGER列に収まる値）
    pub const MAX: u32 = i32::MAX as u32;

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for GuestCount {
    type Error = GuestCountError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(GuestCountError::Zero);
        }
        if value > Self::MAX {
            return Err(GuestCountError::TooLarge(value));
        }
        Ok(Self(value))
    }
}

impl From<GuestCount> for u32 {
    fn from(count: GuestCount) -> Self {
        count.0
    }
}

/// 同一部屋タイプの物理的な部屋数
///
/// 不変条件：1以上。0の部屋数は型として作成できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct UnitQuantity(u32);

impl UnitQuantity {
    /// 組み込みカタログ用。0を渡してはならない。
    pub(super) const fn known(value: u32) -> Self {
        assert!(value > 0);
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for UnitQuantity {
    type Error = UnitQuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(UnitQuantityError::Zero);
        }
        Ok(Self(value))
    }
}

impl From<UnitQuantity> for u32 {
    fn from(quantity: UnitQuantity) -> Self {
        quantity.0
    }
}
