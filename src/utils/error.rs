use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Holiday feed request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Mail transport failed: {message}")]
    SendError { message: String },
}

pub type Result<T> = std::result::Result<T, NotifyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 可忽略，流程照常結束
    Low,
    /// 外部服務問題，可重試
    Medium,
    /// 處理錯誤，需人工介入
    High,
    /// 系統層級錯誤
    Critical,
}

impl NotifyError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NotifyError::FetchError(_) => ErrorSeverity::Low,
            NotifyError::SendError { .. } => ErrorSeverity::Medium,
            NotifyError::MissingConfigError { .. }
            | NotifyError::InvalidConfigValueError { .. }
            | NotifyError::ConfigValidationError { .. } => ErrorSeverity::High,
            NotifyError::IoError(_) | NotifyError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            NotifyError::FetchError(_) => {
                "檢查假日行事曆網址是否可連線；無假日資料時僅會跳過週末".to_string()
            }
            NotifyError::SendError { .. } => "檢查郵件服務端點與憑證後重試".to_string(),
            NotifyError::MissingConfigError { field } => {
                format!("在設定檔中補上 '{}' 欄位", field)
            }
            NotifyError::InvalidConfigValueError { field, .. }
            | NotifyError::ConfigValidationError { field, .. } => {
                format!("修正設定檔中的 '{}' 欄位", field)
            }
            NotifyError::IoError(_) => "檢查檔案路徑與權限".to_string(),
            NotifyError::SerializationError(_) => "檢查資料格式".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NotifyError::FetchError(_) => "無法取得假日行事曆".to_string(),
            NotifyError::SendError { .. } => "通知信寄送失敗".to_string(),
            NotifyError::MissingConfigError { field } => {
                format!("設定缺少必要欄位：{}", field)
            }
            NotifyError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定欄位 {} 無效：{}", field, reason)
            }
            NotifyError::ConfigValidationError { field, message } => {
                format!("設定欄位 {} 發生錯誤：{}", field, message)
            }
            NotifyError::IoError(e) => format!("檔案存取失敗：{}", e),
            NotifyError::SerializationError(e) => format!("資料格式錯誤：{}", e),
        }
    }
}
