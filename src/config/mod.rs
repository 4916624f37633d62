pub mod toml_config;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pay-notify")]
#[command(about = "Monthly payment-notice mailer with ROC holiday-aware date resolution")]
pub struct CliConfig {
    /// 設定檔路徑
    #[arg(long, default_value = "./pay-notify.toml")]
    pub config: String,

    /// 以指定日期（YYYY-MM-DD）取代今天，供測試或補寄
    #[arg(long)]
    pub date: Option<String>,

    /// 只組信並輸出，不寄送
    #[arg(long)]
    pub preview: bool,

    /// 即使今天不是寄送日也寄出
    #[arg(long)]
    pub force: bool,

    /// 只重抓假日行事曆並回報集合大小
    #[arg(long)]
    pub refresh_only: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
