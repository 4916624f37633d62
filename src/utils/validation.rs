use crate::utils::error::{NotifyError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NotifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(NotifyError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(NotifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NotifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_email_address(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    // 僅做寬鬆檢查，嚴格驗證交由郵件服務
    let looks_like_address = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });

    if !looks_like_address {
        return Err(NotifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a plausible email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(NotifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("holiday_feed.url", "https://example.com/basic.ics").is_ok());
        assert!(validate_url("holiday_feed.url", "http://example.com").is_ok());
        assert!(validate_url("holiday_feed.url", "").is_err());
        assert!(validate_url("holiday_feed.url", "invalid-url").is_err());
        assert!(validate_url("holiday_feed.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email_address() {
        assert!(validate_email_address("mail.recipient", "billing@example.com.tw").is_ok());
        assert!(validate_email_address("mail.recipient", "").is_err());
        assert!(validate_email_address("mail.recipient", "not-an-address").is_err());
        assert!(validate_email_address("mail.recipient", "user@nodomain").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("holiday_feed.timeout_seconds", 10u64, 1, 120).is_ok());
        assert!(validate_range("holiday_feed.timeout_seconds", 0u64, 1, 120).is_err());
        assert!(validate_range("holiday_feed.timeout_seconds", 600u64, 1, 120).is_err());
    }
}
