use crate::domain::model::OutboundEmail;
use crate::domain::ports::Mailer;
use crate::utils::error::{NotifyError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// 將信件以 JSON POST 給郵件轉寄服務。
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HttpMailer {
    pub fn new(endpoint: String, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_token,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let payload = serde_json::json!({
            "to": email.to,
            "subject": email.subject,
            "html": email.html_body,
            "sender_name": email.sender_name,
        });

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        // 傳輸層錯誤一律轉成 SendError，與上游錯誤區分
        let response = request.send().await.map_err(|e| NotifyError::SendError {
            message: format!("mail relay request failed: {}", e),
        })?;

        if !response.status().is_success() {
            return Err(NotifyError::SendError {
                message: format!("mail relay returned status {}", response.status()),
            });
        }

        tracing::debug!("Mail relay accepted message for {}", email.to);
        Ok(())
    }
}
