use crate::domain::{Booking, BookingId, BookingStatus, overlaps};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

/// BookingStoreのインメモリ実装
///
/// テストと、データベースなしでの起動（`BOOKING_STORE=memory`）で使用する。
/// 1回の呼び出しはロックを1度だけ取るため、返す一覧は常に整合している。
pub struct BookingStore {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用に予約を登録
    pub fn with_bookings(bookings: impl IntoIterator<Item = Booking>) -> Self {
        let store = Self::new();
        {
            let mut map = store.bookings.lock().unwrap();
            for booking in bookings {
                map.insert(booking.booking_id, booking);
            }
        }
        store
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

/// チェックイン日順（同日は作成日時順）に並べる
fn sort_by_check_in(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        a.check_in
            .cmp(&b.check_in)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.booking_id.value().cmp(&b.booking_id.value()))
    });
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn save(&self, booking: Booking) -> Result<()> {
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.booking_id, booking);
        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self.bookings.lock().unwrap().get(&booking_id).cloned())
    }

    async fn find_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| overlaps(check_in, check_out, b.check_in, b.check_out))
            .cloned()
            .collect();
        sort_by_check_in(&mut found);
        Ok(found)
    }

    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect();
        sort_by_check_in(&mut found);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingRequest, GuestCount, GuestDetails, RoomTypeKey, booking};
    use chrono::Utc;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn inquiry(check_in: &str, check_out: &str) -> Booking {
        booking::submit_inquiry(
            BookingRequest {
                check_in: d(check_in),
                check_out: d(check_out),
                room_type: RoomTypeKey::from("group-room"),
                guest_count: GuestCount::ONE,
            },
            GuestDetails {
                name: "Guest".to_string(),
                email: "guest@example.com".to_string(),
                phone: None,
                special_requests: None,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_save_and_get_by_id() {
        let store = BookingStore::new();
        let booking = inquiry("2025-06-01", "2025-06-03");

        store.save(booking.clone()).await.unwrap();

        assert_eq!(store.get_by_id(booking.booking_id).await.unwrap(), Some(booking));
        assert_eq!(store.get_by_id(BookingId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let booking = inquiry("2025-06-01", "2025-06-03");
        let store = BookingStore::with_bookings([booking.clone()]);

        let confirmed = booking::confirm(&booking, Utc::now()).unwrap();
        store.save(confirmed).await.unwrap();

        let stored = store.get_by_id(booking.booking_id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(store.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_overlapping_uses_half_open_ranges() {
        let before = inquiry("2025-05-28", "2025-06-01");
        let inside = inquiry("2025-06-02", "2025-06-04");
        let after = inquiry("2025-06-05", "2025-06-07");
        let store = BookingStore::with_bookings([before, inside.clone(), after]);

        let found = store
            .find_overlapping(d("2025-06-01"), d("2025-06-05"))
            .await
            .unwrap();

        assert_eq!(found, vec![inside]);
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_sorts_by_check_in() {
        let late = inquiry("2025-09-01", "2025-09-03");
        let early = inquiry("2025-06-01", "2025-06-03");
        let cancelled = booking::cancel(&inquiry("2025-07-01", "2025-07-03"), Utc::now()).unwrap();
        let store = BookingStore::with_bookings([late.clone(), early.clone(), cancelled.clone()]);

        let all = store.list(None).await.unwrap();
        assert_eq!(
            all.iter().map(|b| b.booking_id).collect::<Vec<_>>(),
            vec![early.booking_id, cancelled.booking_id, late.booking_id]
        );

        let pending = store.list(Some(BookingStatus::Pending)).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|b| b.status == BookingStatus::Pending));
    }
}
