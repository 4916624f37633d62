use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// 假日／補班日集合，建立後不再變動。
///
/// A date present in both sets resolves as a working day: the workday set
/// always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    holidays: HashSet<NaiveDate>,
    workdays: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(holidays: HashSet<NaiveDate>, workdays: HashSet<NaiveDate>) -> Self {
        Self { holidays, workdays }
    }

    /// No holiday information available; resolvers fall back to pure
    /// weekend skipping.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_makeup_workday(&self, date: NaiveDate) -> bool {
        self.workdays.contains(&date)
    }

    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    pub fn workday_count(&self) -> usize {
        self.workdays.len()
    }
}

/// 快取中的一筆行事曆資料。
#[derive(Debug, Clone)]
pub struct CacheRecord {
    pub calendar: HolidayCalendar,
    pub fetched_at: DateTime<Utc>,
}

impl CacheRecord {
    pub fn new(calendar: HolidayCalendar, fetched_at: DateTime<Utc>) -> Self {
        Self {
            calendar,
            fetched_at,
        }
    }
}

/// 依月份選出的主旨／內文模板。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePair {
    pub subject: String,
    pub body: String,
}

/// 代換完成、內文仍為標記原始碼的信件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// 交給郵件埠的最終信件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub sender_name: String,
}

/// Outcome of one scheduled run. "Nothing to do" cases stay on the Ok path
/// so the caller never confuses them with failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent {
        send_date: NaiveDate,
        subject: String,
    },
    NotDue {
        send_date: NaiveDate,
    },
    /// 當月 1~25 日全為非工作日，無可寄送日期
    SkippedNoSendDate,
}
