use crate::domain::model::HolidayCalendar;
use chrono::{Datelike, NaiveDate, Weekday};

/// 每月通知信的寄送基準日
const SEND_ANCHOR_DAY: u32 = 25;
/// 繳費期限的基準日（次月）
const DEADLINE_ANCHOR_DAY: u32 = 5;

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A date counts as working when it is a declared make-up workday, or an
/// ordinary weekday that is not a holiday. The workday check runs first so
/// that a date sitting in both sets resolves as working.
fn is_working_day(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    calendar.is_makeup_workday(date) || !(is_weekend(date) || calendar.is_holiday(date))
}

/// 從每月 25 日往前找可寄送的工作日。
///
/// Returns `None` when the search crosses out of the month before finding a
/// working day (a notice mailed in the next month is meaningless), or when
/// (year, month) is not a valid calendar month. A `None` is a skip decision
/// for the caller, not an error.
pub fn resolve_send_date(
    year: i32,
    month: u32,
    calendar: &HolidayCalendar,
) -> Option<NaiveDate> {
    let mut date = NaiveDate::from_ymd_opt(year, month, SEND_ANCHOR_DAY)?;
    loop {
        if is_working_day(date, calendar) {
            return Some(date);
        }
        date = date.pred_opt()?;
        if date.month() != month || date.year() != year {
            return None;
        }
    }
}

/// 從次月 5 日往後找繳費期限。
///
/// Month 12 anchors to January of the following year. Deadlines are pushed
/// forward until a working day is found, with no month-boundary stop: a due
/// date slipping to the next business day is the expected convention.
/// `None` only for a calendar-invalid (year, month).
pub fn resolve_deadline(
    year: i32,
    month: u32,
    calendar: &HolidayCalendar,
) -> Option<NaiveDate> {
    let (anchor_year, anchor_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let mut date = NaiveDate::from_ymd_opt(anchor_year, anchor_month, DEADLINE_ANCHOR_DAY)?;
    loop {
        if is_working_day(date, calendar) {
            return Some(date);
        }
        date = date.succ_opt()?;
    }
}

/// 民國紀年格式，例如 2024-08-05 → "113年8月5日"。
pub fn format_roc(date: NaiveDate) -> String {
    format!(
        "{}年{}月{}日",
        date.year() - 1911,
        date.month(),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn calendar(holidays: &[NaiveDate], workdays: &[NaiveDate]) -> HolidayCalendar {
        HolidayCalendar::new(
            holidays.iter().copied().collect::<HashSet<_>>(),
            workdays.iter().copied().collect::<HashSet<_>>(),
        )
    }

    #[test]
    fn send_date_on_plain_weekday() {
        // 2025-02-25 is a Tuesday
        let result = resolve_send_date(2025, 2, &HolidayCalendar::empty());
        assert_eq!(result, Some(date(2025, 2, 25)));
    }

    #[test]
    fn send_date_steps_back_over_weekend() {
        // 2024-08-25 is a Sunday; nearest prior weekday is Friday the 23rd
        let result = resolve_send_date(2024, 8, &HolidayCalendar::empty());
        assert_eq!(result, Some(date(2024, 8, 23)));
    }

    #[test]
    fn send_date_steps_back_over_holiday_run() {
        // Holidays on the 24th and 25th still land on the same Friday
        let cal = calendar(&[date(2024, 8, 24), date(2024, 8, 25)], &[]);
        assert_eq!(resolve_send_date(2024, 8, &cal), Some(date(2024, 8, 23)));
    }

    #[test]
    fn send_date_accepts_makeup_workday_on_weekend() {
        // 2024-05-25 is a Saturday, but a declared make-up workday
        let cal = calendar(&[], &[date(2024, 5, 25)]);
        assert_eq!(resolve_send_date(2024, 5, &cal), Some(date(2024, 5, 25)));
    }

    #[test]
    fn send_date_makeup_overrides_holiday() {
        // Same date in both sets resolves as working
        let cal = calendar(&[date(2025, 2, 25)], &[date(2025, 2, 25)]);
        assert_eq!(resolve_send_date(2025, 2, &cal), Some(date(2025, 2, 25)));
    }

    #[test]
    fn send_date_none_when_month_exhausted() {
        // Every day from the 1st to the 25th declared a holiday
        let holidays: Vec<NaiveDate> = (1..=25).map(|d| date(2024, 9, d)).collect();
        let cal = calendar(&holidays, &[]);
        assert_eq!(resolve_send_date(2024, 9, &cal), None);
    }

    #[test]
    fn send_date_none_for_invalid_month() {
        assert_eq!(resolve_send_date(2024, 13, &HolidayCalendar::empty()), None);
    }

    #[test]
    fn deadline_on_plain_weekday() {
        // 2024-08-05 is a Monday
        let result = resolve_deadline(2024, 7, &HolidayCalendar::empty());
        assert_eq!(result, Some(date(2024, 8, 5)));
        assert_eq!(format_roc(result.unwrap()), "113年8月5日");
    }

    #[test]
    fn deadline_pushed_forward_by_holiday() {
        let cal = calendar(&[date(2024, 8, 5)], &[]);
        let result = resolve_deadline(2024, 7, &cal).unwrap();
        assert_eq!(format_roc(result), "113年8月6日");
    }

    #[test]
    fn deadline_makeup_day_overrides_holiday() {
        let cal = calendar(&[date(2024, 8, 5)], &[date(2024, 8, 5)]);
        let result = resolve_deadline(2024, 7, &cal).unwrap();
        assert_eq!(format_roc(result), "113年8月5日");
    }

    #[test]
    fn deadline_skips_weekend_forward() {
        // 2024-10-05 is a Saturday; forward skip lands on Monday the 7th
        let result = resolve_deadline(2024, 9, &HolidayCalendar::empty());
        assert_eq!(result, Some(date(2024, 10, 7)));
    }

    #[test]
    fn deadline_for_december_anchors_next_january() {
        // 2025-01-05 is a Sunday → Monday 2025-01-06, ROC year rolls over
        let result = resolve_deadline(2024, 12, &HolidayCalendar::empty()).unwrap();
        assert_eq!(result, date(2025, 1, 6));
        assert_eq!(format_roc(result), "114年1月6日");
    }

    #[test]
    fn deadline_crosses_month_boundary_forward() {
        // Holidays covering Aug 5..=30; Aug 31 is a Saturday, so the first
        // working day is Monday 2024-09-02 — forward search has no stop.
        let holidays: Vec<NaiveDate> = (5..=30).map(|d| date(2024, 8, d)).collect();
        let cal = calendar(&holidays, &[]);
        assert_eq!(resolve_deadline(2024, 7, &cal), Some(date(2024, 9, 2)));
    }

    #[test]
    fn empty_sets_degrade_to_weekend_skip_only() {
        let empty = HolidayCalendar::empty();
        for month in 1..=12u32 {
            let send = resolve_send_date(2024, month, &empty).unwrap();
            assert!(!is_weekend(send));
            assert!(send.day() <= 25);

            let deadline = resolve_deadline(2024, month, &empty).unwrap();
            assert!(!is_weekend(deadline));
            // nearest weekday on or after the 5th is at most the 7th
            assert!((5..=7).contains(&deadline.day()));
            assert_eq!(deadline.month(), month % 12 + 1);
        }
    }

    #[test]
    fn format_roc_subtracts_1911_without_padding() {
        assert_eq!(format_roc(date(2024, 1, 2)), "113年1月2日");
        assert_eq!(format_roc(date(2025, 12, 31)), "114年12月31日");
    }
}
