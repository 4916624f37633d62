use crate::domain::ports::SettingsProvider;
use crate::utils::error::{NotifyError, Result};
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    pub mail: MailConfig,
    pub templates: TemplatesConfig,
    pub holiday_feed: HolidayFeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub recipient: String,
    pub sender_name: String,
    pub endpoint: String,
    pub api_token: Option<String>,
    /// 簽名檔 HTML，原樣附加於內文之後；可為空
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    pub subject_normal: String,
    pub body_normal: String,
    pub subject_december: String,
    pub body_december: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayFeedConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
}

impl NotifyConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NotifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NotifyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAIL_API_TOKEN})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_email_address("mail.recipient", &self.mail.recipient)?;
        validate_non_empty_string("mail.sender_name", &self.mail.sender_name)?;
        validate_url("mail.endpoint", &self.mail.endpoint)?;
        validate_url("holiday_feed.url", &self.holiday_feed.url)?;

        if let Some(timeout) = self.holiday_feed.timeout_seconds {
            validate_range("holiday_feed.timeout_seconds", timeout, 1, 120)?;
        }

        // 模板允許缺漏記號但不允許整段留白
        validate_non_empty_string("templates.subject_normal", &self.templates.subject_normal)?;
        validate_non_empty_string("templates.body_normal", &self.templates.body_normal)?;
        validate_non_empty_string(
            "templates.subject_december",
            &self.templates.subject_december,
        )?;
        validate_non_empty_string("templates.body_december", &self.templates.body_december)?;

        Ok(())
    }

    pub fn feed_timeout_seconds(&self) -> u64 {
        self.holiday_feed.timeout_seconds.unwrap_or(10)
    }
}

impl SettingsProvider for NotifyConfig {
    fn recipient(&self) -> &str {
        &self.mail.recipient
    }

    fn sender_name(&self) -> &str {
        &self.mail.sender_name
    }

    fn signature(&self) -> &str {
        self.mail.signature.as_deref().unwrap_or("")
    }

    fn subject_template(&self, month: u32) -> &str {
        if month == 12 {
            &self.templates.subject_december
        } else {
            &self.templates.subject_normal
        }
    }

    fn body_template(&self, month: u32) -> &str {
        if month == 12 {
            &self.templates.body_december
        } else {
            &self.templates.body_normal
        }
    }
}

impl Validate for NotifyConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_TOML: &str = r#"
[mail]
recipient = "billing@example.com.tw"
sender_name = "總務組"
endpoint = "https://mail.example.com/api/send"
signature = "<p>總務組敬上</p>"

[templates]
subject_normal = "{{rocYear}}年{{currentMonth}}月繳費通知"
body_normal = "請於{{deadlineDate}}前繳納。"
subject_december = "{{rocYear}}年12月暨{{nextRocYear}}年1月繳費通知"
body_december = "請於{{deadlineDate}}前繳納。"

[holiday_feed]
url = "https://calendar.example.com/tw-holidays.ics"
timeout_seconds = 15
"#;

    #[test]
    fn test_parse_valid_config() {
        let config = NotifyConfig::from_toml_str(VALID_TOML).unwrap();
        assert_eq!(config.mail.recipient, "billing@example.com.tw");
        assert_eq!(config.feed_timeout_seconds(), 15);
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn test_template_selection_by_month() {
        let config = NotifyConfig::from_toml_str(VALID_TOML).unwrap();
        assert!(config.subject_template(7).contains("{{currentMonth}}"));
        assert!(config.subject_template(12).contains("{{nextRocYear}}"));
        assert_eq!(config.signature(), "<p>總務組敬上</p>");
    }

    #[test]
    fn test_missing_section_is_a_parse_error() {
        let result = NotifyConfig::from_toml_str("[mail]\nrecipient = \"a@b.tw\"\n");
        assert!(matches!(
            result,
            Err(NotifyError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_invalid_feed_url_fails_validation() {
        let toml = VALID_TOML.replace(
            "https://calendar.example.com/tw-holidays.ics",
            "not-a-url",
        );
        let config = NotifyConfig::from_toml_str(&toml).unwrap();
        assert!(config.validate_config().is_err());
    }

    #[test]
    fn test_blank_template_fails_validation() {
        let toml = VALID_TOML.replace("請於{{deadlineDate}}前繳納。", "  ");
        let config = NotifyConfig::from_toml_str(&toml).unwrap();
        assert!(config.validate_config().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PAY_NOTIFY_TEST_TOKEN", "secret-token");
        let toml = VALID_TOML.replace(
            "sender_name = \"總務組\"",
            "sender_name = \"總務組\"\napi_token = \"${PAY_NOTIFY_TEST_TOKEN}\"",
        );
        let config = NotifyConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.mail.api_token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_unset_env_var_left_verbatim() {
        let toml = VALID_TOML.replace(
            "sender_name = \"總務組\"",
            "sender_name = \"總務組\"\napi_token = \"${PAY_NOTIFY_UNSET_VAR}\"",
        );
        let config = NotifyConfig::from_toml_str(&toml).unwrap();
        assert_eq!(
            config.mail.api_token.as_deref(),
            Some("${PAY_NOTIFY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(VALID_TOML.as_bytes()).unwrap();
        let config = NotifyConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mail.sender_name, "總務組");
    }
}
