use crate::domain::model::OutboundEmail;
use crate::utils::error::Result;
use async_trait::async_trait;

/// "Fetch a public holiday calendar as raw calendar-feed text."
#[async_trait]
pub trait HolidayFeed: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// "Send an email (to, subject, htmlBody, senderName)."
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Typed settings the core reads; every recognized field is an accessor so
/// a missing field is a validation concern, not a runtime lookup miss.
pub trait SettingsProvider: Send + Sync {
    fn recipient(&self) -> &str;
    fn sender_name(&self) -> &str;
    /// May be empty; an empty signature never blocks a send.
    fn signature(&self) -> &str;
    /// 12 月使用年末模板，其餘月份使用一般模板
    fn subject_template(&self, month: u32) -> &str;
    fn body_template(&self, month: u32) -> &str;
}
