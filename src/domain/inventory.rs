use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{InventoryError, RoomTypeKey, UnitQuantity};

/// 部屋タイプ（設定値、実行時は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    pub key: RoomTypeKey,
    /// メッセージ表示用の名前
    pub name: String,
    pub unit_quantity: UnitQuantity,
    /// 一棟貸し（Entire Villa）かどうか
    ///
    /// 一棟貸しの予約は期間中の他の全部屋タイプを排除し、
    /// 他の部屋タイプの予約は期間中の一棟貸しを排除する。
    #[serde(default)]
    pub is_whole_property: bool,
}

/// 部屋在庫カタログ
///
/// 不変条件（構築時に検証）：
/// - 部屋タイプが1つ以上ある
/// - キーが一意
/// - 一棟貸しの部屋タイプがちょうど1つ
/// - 部屋数は1以上（`UnitQuantity`の型で保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInventory {
    room_types: Vec<RoomType>,
    whole_property: usize,
}

impl RoomInventory {
    /// 部屋タイプの一覧からカタログを構築する
    ///
    /// # エラー
    /// 不変条件に違反する場合は`InventoryError`を返す
    pub fn new(room_types: Vec<RoomType>) -> Result<Self, InventoryError> {
        if room_types.is_empty() {
            return Err(InventoryError::Empty);
        }

        let mut seen = HashSet::new();
        for room_type in &room_types {
            if !seen.insert(&room_type.key) {
                return Err(InventoryError::DuplicateKey(room_type.key.clone()));
            }
        }

        let whole: Vec<usize> = room_types
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_whole_property)
            .map(|(i, _)| i)
            .collect();
        if whole.len() != 1 {
            return Err(InventoryError::WholePropertyCount(whole.len()));
        }

        Ok(Self {
            room_types,
            whole_property: whole[0],
        })
    }

    /// JSON配列からカタログを構築する
    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        let room_types: Vec<RoomType> = serde_json::from_str(json)?;
        Self::new(room_types)
    }

    /// Ko Lake Villaの標準カタログ
    pub fn ko_lake_villa() -> Self {
        let room = |key: &str, name: &str, quantity: u32, whole: bool| RoomType {
            key: RoomTypeKey::from(key),
            name: name.to_string(),
            unit_quantity: UnitQuantity::known(quantity),
            is_whole_property: whole,
        };

        Self {
            room_types: vec![
                room("entire-villa", "Entire Villa", 1, true),
                room("master-suite", "Master Family Suite", 1, false),
                room("triple-room", "Triple/Twin Room", 4, false),
                room("group-room", "Group Room", 1, false),
            ],
            whole_property: 0,
        }
    }

    pub fn room_types(&self) -> &[RoomType] {
        &self.room_types
    }

    pub fn get(&self, key: &RoomTypeKey) -> Option<&RoomType> {
        self.room_types.iter().find(|r| &r.key == key)
    }

    pub fn whole_property(&self) -> &RoomType {
        &self.room_types[self.whole_property]
    }

    /// 表示名を取得する。カタログにないキーはキー文字列をそのまま返す。
    pub fn display_name<'a>(&'a self, key: &'a RoomTypeKey) -> &'a str {
        self.get(key).map(|r| r.name.as_str()).unwrap_or(key.as_str())
    }
}

impl Default for RoomInventory {
    fn default() -> Self {
        Self::ko_lake_villa()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(key: &str, quantity: u32, whole: bool) -> RoomType {
        RoomType {
            key: RoomTypeKey::from(key),
            name: key.to_string(),
            unit_quantity: UnitQuantity::try_from(quantity).unwrap(),
            is_whole_property: whole,
        }
    }

    #[test]
    fn test_default_catalog_satisfies_invariants() {
        let inventory = RoomInventory::ko_lake_villa();
        let rebuilt = RoomInventory::new(inventory.room_types().to_vec()).unwrap();
        assert_eq!(rebuilt, inventory);
        assert_eq!(inventory.whole_property().key.as_str(), "entire-villa");
        assert_eq!(
            inventory
                .get(&RoomTypeKey::from("triple-room"))
                .unwrap()
                .unit_quantity
                .value(),
            4
        );
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(RoomInventory::new(vec![]), Err(InventoryError::Empty)));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = RoomInventory::new(vec![
            room("villa", 1, true),
            room("suite", 1, false),
            room("suite", 2, false),
        ]);
        assert!(matches!(result, Err(InventoryError::DuplicateKey(k)) if k.as_str() == "suite"));
    }

    #[test]
    fn test_missing_whole_property_rejected() {
        let result = RoomInventory::new(vec![room("suite", 1, false)]);
        assert!(matches!(result, Err(InventoryError::WholePropertyCount(0))));
    }

    #[test]
    fn test_two_whole_properties_rejected() {
        let result = RoomInventory::new(vec![room("a", 1, true), room("b", 1, true)]);
        assert!(matches!(result, Err(InventoryError::WholePropertyCount(2))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"key": "villa", "name": "Villa", "unit_quantity": 1, "is_whole_property": true},
            {"key": "cabin", "name": "Cabin", "unit_quantity": 3}
        ]"#;
        let inventory = RoomInventory::from_json(json).unwrap();
        assert_eq!(inventory.room_types().len(), 2);
        assert_eq!(inventory.whole_property().name, "Villa");
        assert!(!inventory.get(&RoomTypeKey::from("cabin")).unwrap().is_whole_property);
    }

    #[test]
    fn test_from_json_rejects_zero_quantity() {
        let json = r#"[{"key": "villa", "name": "Villa", "unit_quantity": 0, "is_whole_property": true}]"#;
        assert!(matches!(RoomInventory::from_json(json), Err(InventoryError::Parse(_))));
    }

    #[test]
    fn test_display_name_falls_back_to_key() {
        let inventory = RoomInventory::ko_lake_villa();
        let known = RoomTypeKey::from("group-room");
        let unknown = RoomTypeKey::from("treehouse");
        assert_eq!(inventory.display_name(&known), "Group Room");
        assert_eq!(inventory.display_name(&unknown), "treehouse");
    }
}
