use crate::core::feed::parse_feed;
use crate::domain::model::{CacheRecord, HolidayCalendar};
use crate::domain::ports::HolidayFeed;
use chrono::Utc;

/// 假日行事曆快取，避免每次計算都重抓行事曆。
///
/// Single-threaded run-to-completion model: methods take `&mut self` and the
/// stored record is replaced in one assignment, so a reader never observes a
/// partially written record. The cache knows nothing about refresh cadence;
/// the caller's scheduler decides when to call [`refresh`](Self::refresh).
pub struct HolidayCache<F: HolidayFeed> {
    feed: F,
    record: Option<CacheRecord>,
}

impl<F: HolidayFeed> HolidayCache<F> {
    pub fn new(feed: F) -> Self {
        Self { feed, record: None }
    }

    /// 回傳快取資料；尚未抓取時先抓一次。
    ///
    /// A failed fetch is recovered as an empty-set record — at most one
    /// refresh is attempted here, and the failure never propagates.
    pub async fn current(&mut self) -> &CacheRecord {
        if self.record.is_none() {
            let record = Self::fetch_record(&self.feed).await;
            self.record = Some(record);
        }
        // 上面已確保必有資料
        self.record
            .get_or_insert_with(|| CacheRecord::new(HolidayCalendar::empty(), Utc::now()))
    }

    /// 重抓行事曆並覆寫快取，無論先前狀態為何。
    pub async fn refresh(&mut self) -> &CacheRecord {
        let record = Self::fetch_record(&self.feed).await;
        self.record = Some(record);
        self.record
            .get_or_insert_with(|| CacheRecord::new(HolidayCalendar::empty(), Utc::now()))
    }

    async fn fetch_record(feed: &F) -> CacheRecord {
        let calendar = match feed.fetch().await {
            Ok(text) => {
                let calendar = parse_feed(&text);
                tracing::debug!(
                    "Holiday feed parsed: {} holidays, {} make-up workdays",
                    calendar.holiday_count(),
                    calendar.workday_count()
                );
                calendar
            }
            Err(e) => {
                // 抓不到行事曆時退回僅跳過週末
                tracing::warn!("holiday-cache refresh failed, using empty sets: {}", e);
                HolidayCalendar::empty()
            }
        };
        CacheRecord::new(calendar, Utc::now())
    }
}
