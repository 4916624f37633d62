use crate::domain::model::HolidayCalendar;
use chrono::NaiveDate;
use std::collections::HashSet;

/// 行事曆標題中的補行上班字樣
const MAKEUP_WORKDAY_MARKERS: [&str; 2] = ["補行上班", "補班"];
/// 標題中的補假字樣（假日移動）
const OBSERVED_SHIFT_MARKER: &str = "補假";
/// 說明欄中的國定假日字樣
const NATIONAL_HOLIDAY_MARKER: &str = "國定假日";

/// 將 iCalendar 原始文字解析成假日／補班日集合。
///
/// Tolerant by contract: records missing a start date, title, or description
/// are silently skipped, and text that contains no usable event at all
/// parses to two empty sets rather than an error. Callers treat empty sets
/// as "no holiday information available".
pub fn parse_feed(feed_text: &str) -> HolidayCalendar {
    let mut holidays = HashSet::new();
    let mut workdays = HashSet::new();

    for event in split_events(feed_text) {
        let Some(date) = event.start_date else {
            continue;
        };
        let (Some(summary), Some(description)) = (event.summary, event.description) else {
            continue;
        };

        if MAKEUP_WORKDAY_MARKERS.iter().any(|m| summary.contains(m)) {
            workdays.insert(date);
        } else if description.contains(NATIONAL_HOLIDAY_MARKER)
            || summary.contains(OBSERVED_SHIFT_MARKER)
        {
            holidays.insert(date);
        }
    }

    HolidayCalendar::new(holidays, workdays)
}

#[derive(Debug, Default)]
struct FeedEvent {
    start_date: Option<NaiveDate>,
    summary: Option<String>,
    description: Option<String>,
}

/// 展開折行後逐筆切出 VEVENT。
fn split_events(feed_text: &str) -> Vec<FeedEvent> {
    let mut events = Vec::new();
    let mut current: Option<FeedEvent> = None;

    for line in unfold_lines(feed_text) {
        if line == "BEGIN:VEVENT" {
            current = Some(FeedEvent::default());
            continue;
        }
        if line == "END:VEVENT" {
            if let Some(event) = current.take() {
                events.push(event);
            }
            continue;
        }

        let Some(event) = current.as_mut() else {
            continue;
        };
        let Some((name, value)) = split_property(&line) else {
            continue;
        };

        match name.as_str() {
            "DTSTART" => event.start_date = parse_feed_date(value),
            "SUMMARY" => event.summary = Some(value.to_string()),
            "DESCRIPTION" => event.description = Some(unescape_text(value)),
            _ => {}
        }
    }

    events
}

/// Folded continuation lines (leading space or tab) belong to the previous
/// line, per the iCalendar line-folding rule.
fn unfold_lines(feed_text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in feed_text.lines() {
        if let Some(continuation) = raw.strip_prefix(' ').or_else(|| raw.strip_prefix('\t')) {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        lines.push(raw.to_string());
    }
    lines
}

/// Property name is everything before the first ':', with any ';' parameters
/// (e.g. `DTSTART;VALUE=DATE`) stripped off.
fn split_property(line: &str) -> Option<(String, &str)> {
    let (head, value) = line.split_once(':')?;
    let name = head.split(';').next().unwrap_or(head);
    Some((name.to_ascii_uppercase(), value))
}

/// `20240405` 或 `20240405T000000Z` 皆取日期部分。
fn parse_feed_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split('T').next().unwrap_or(value).trim();
    NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()
}

/// DESCRIPTION 內容中的逸出字元
fn unescape_text(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\")
}
