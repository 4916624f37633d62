use crate::domain::ports::HolidayFeed;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 透過 HTTP 取得假日行事曆（iCalendar 文字）。
///
/// Fetch failures are plain errors here; the holiday cache recovers them as
/// empty sets so a dead feed never blocks a send.
pub struct HttpHolidayFeed {
    client: Client,
    url: String,
}

impl HttpHolidayFeed {
    pub fn new(url: String, timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .unwrap_or_default();
        Self { client, url }
    }
}

#[async_trait]
impl HolidayFeed for HttpHolidayFeed {
    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Fetching holiday feed from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("Holiday feed response status: {}", response.status());

        let response = response.error_for_status()?;
        let text = response.text().await?;
        Ok(text)
    }
}
