use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// 予約ストアの実装の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("unknown booking store backend: {}", s)),
        }
    }
}

/// 環境変数から読み込むサーバー設定
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub store_backend: StoreBackend,
    /// 今日から最短チェックイン日までの日数（1なら当日予約不可）
    pub min_lead_days: u32,
    /// 部屋在庫カタログのJSONファイル。未指定なら組み込みカタログを使う。
    pub room_inventory_path: Option<String>,
}

impl Config {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    /// 値がパースできない場合
    pub fn load() -> Result<Self, String> {
        Ok(Self {
            port: try_load("PORT", "3000")?,
            database_url: try_load("DATABASE_URL", "postgres://localhost/ko_lake_villa")?,
            store_backend: try_load("BOOKING_STORE", "postgres")?,
            min_lead_days: try_load("MIN_LEAD_DAYS", "1")?,
            room_inventory_path: env::var("ROOM_INVENTORY_PATH").ok(),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        format!("invalid {key} value {raw:?}: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("postgres".parse::<StoreBackend>(), Ok(StoreBackend::Postgres));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_try_load_uses_default_when_unset() {
        let port: u16 = try_load("KO_LAKE_VILLA_TEST_UNSET_PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_try_load_reports_invalid_default() {
        let result: Result<u32, String> = try_load("KO_LAKE_VILLA_TEST_UNSET_DAYS", "soon");
        assert!(result.is_err());
    }
}
