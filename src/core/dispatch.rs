use crate::core::cache::HolidayCache;
use crate::core::markup;
use crate::core::resolver::resolve_send_date;
use crate::core::template::{render, select_templates};
use crate::domain::model::{DispatchOutcome, HolidayCalendar, OutboundEmail};
use crate::domain::ports::{HolidayFeed, Mailer, SettingsProvider};
use crate::utils::error::{NotifyError, Result};
use chrono::{Datelike, NaiveDate};

/// 排程進入點：判斷今天是否為寄送日，組信並呼叫郵件埠。
///
/// All real logic lives in the resolver, renderer, and converter; this type
/// only threads the cache through them and keeps "not due" and "no send
/// date" on the Ok path, distinct from real failures.
pub struct Dispatcher<F: HolidayFeed, M: Mailer, S: SettingsProvider> {
    cache: HolidayCache<F>,
    mailer: M,
    settings: S,
}

impl<F: HolidayFeed, M: Mailer, S: SettingsProvider> Dispatcher<F, M, S> {
    pub fn new(cache: HolidayCache<F>, mailer: M, settings: S) -> Self {
        Self {
            cache,
            mailer,
            settings,
        }
    }

    /// 排程或手動執行一次寄送檢查。
    ///
    /// `force` sends even when today is not the resolved send date (manual
    /// runs); the scheduled path passes `false`.
    pub async fn run(&mut self, today: NaiveDate, force: bool) -> Result<DispatchOutcome> {
        let calendar = self.cache.current().await.calendar.clone();

        let Some(send_date) = resolve_send_date(today.year(), today.month(), &calendar) else {
            tracing::info!(
                "dispatch: no admissible send date in {}-{:02}, skipping",
                today.year(),
                today.month()
            );
            return Ok(DispatchOutcome::SkippedNoSendDate);
        };

        if !force && today != send_date {
            tracing::debug!("dispatch: today {} is not send date {}", today, send_date);
            return Ok(DispatchOutcome::NotDue { send_date });
        }

        let email = self.compose(today.year(), today.month(), &calendar)?;
        let subject = email.subject.clone();

        self.mailer.send(&email).await.map_err(|e| {
            tracing::error!("dispatch: mail transport failed: {}", e);
            e
        })?;

        tracing::info!("dispatch: sent '{}' to {}", subject, email.to);
        Ok(DispatchOutcome::Sent { send_date, subject })
    }

    /// 只組信不寄送，供人工預覽。
    pub async fn preview(&mut self, today: NaiveDate) -> Result<OutboundEmail> {
        let calendar = self.cache.current().await.calendar.clone();
        self.compose(today.year(), today.month(), &calendar)
    }

    /// 重抓假日行事曆，回傳解析出的集合大小。
    pub async fn refresh_holidays(&mut self) -> (usize, usize) {
        let record = self.cache.refresh().await;
        (
            record.calendar.holiday_count(),
            record.calendar.workday_count(),
        )
    }

    /// Render → convert → shell＋簽名檔。缺收件人或模板為空時中止，不寄出
    /// 不完整的信。
    fn compose(
        &self,
        year: i32,
        month: u32,
        calendar: &HolidayCalendar,
    ) -> Result<OutboundEmail> {
        let recipient = self.settings.recipient();
        if recipient.trim().is_empty() {
            return Err(NotifyError::MissingConfigError {
                field: "mail.recipient".to_string(),
            });
        }

        let templates = select_templates(&self.settings, month);
        let rendered = render(&templates, year, month, calendar).ok_or_else(|| {
            NotifyError::ConfigValidationError {
                field: "dispatch".to_string(),
                message: format!("invalid year/month: {}-{}", year, month),
            }
        })?;

        if rendered.subject.trim().is_empty() {
            return Err(NotifyError::MissingConfigError {
                field: template_field("subject", month),
            });
        }
        if rendered.body.trim().is_empty() {
            return Err(NotifyError::MissingConfigError {
                field: template_field("body", month),
            });
        }

        let html_body = format!(
            "<html><body>{}{}</body></html>",
            markup::convert(&rendered.body),
            self.settings.signature()
        );

        Ok(OutboundEmail {
            to: recipient.to_string(),
            subject: rendered.subject,
            html_body,
            sender_name: self.settings.sender_name().to_string(),
        })
    }
}

fn template_field(kind: &str, month: u32) -> String {
    if month == 12 {
        format!("templates.{}_december", kind)
    } else {
        format!("templates.{}_normal", kind)
    }
}
