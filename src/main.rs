use chrono::NaiveDate;
use clap::Parser;
use pay_notify::utils::{logger, validation::Validate};
use pay_notify::{
    CliConfig, DispatchOutcome, Dispatcher, HolidayCache, HttpHolidayFeed, HttpMailer,
    NotifyConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting pay-notify");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證設定
    let config = match NotifyConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config '{}': {}", cli.config, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 決定本次執行視為「今天」的日期
    let today = match &cli.date {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                eprintln!("❌ 無法解析 --date '{}': {}", raw, e);
                std::process::exit(1);
            }
        },
        None => chrono::Local::now().date_naive(),
    };

    // 建立外部介面與調度器
    let feed = HttpHolidayFeed::new(
        config.holiday_feed.url.clone(),
        config.feed_timeout_seconds(),
    );
    let mailer = HttpMailer::new(config.mail.endpoint.clone(), config.mail.api_token.clone());
    let mut dispatcher = Dispatcher::new(HolidayCache::new(feed), mailer, config);

    if cli.refresh_only {
        let (holidays, workdays) = dispatcher.refresh_holidays().await;
        tracing::info!(
            "✅ Holiday feed refreshed: {} holidays, {} make-up workdays",
            holidays,
            workdays
        );
        println!("✅ 假日 {} 筆、補班日 {} 筆", holidays, workdays);
        return Ok(());
    }

    if cli.preview {
        match dispatcher.preview(today).await {
            Ok(email) => {
                println!("收件人: {}", email.to);
                println!("寄件名稱: {}", email.sender_name);
                println!("主旨: {}", email.subject);
                println!("--- HTML ---");
                println!("{}", email.html_body);
            }
            Err(e) => {
                report_failure(&e);
            }
        }
        return Ok(());
    }

    match dispatcher.run(today, cli.force).await {
        Ok(DispatchOutcome::Sent { send_date, subject }) => {
            tracing::info!("✅ Notification sent (send date {})", send_date);
            println!("✅ 已寄出：{}", subject);
        }
        Ok(DispatchOutcome::NotDue { send_date }) => {
            tracing::info!("Today is not the send date ({}), nothing to do", send_date);
            println!("本月寄送日為 {}，今日不寄送", send_date);
        }
        Ok(DispatchOutcome::SkippedNoSendDate) => {
            tracing::warn!("No admissible send date this month, skipping");
            println!("本月無可寄送日期，略過");
        }
        Err(e) => {
            report_failure(&e);
        }
    }

    Ok(())
}

fn report_failure(e: &pay_notify::NotifyError) {
    tracing::error!("❌ Dispatch failed: {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 依錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        pay_notify::utils::error::ErrorSeverity::Low => 0,
        pay_notify::utils::error::ErrorSeverity::Medium => 2,
        pay_notify::utils::error::ErrorSeverity::High => 1,
        pay_notify::utils::error::ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
