pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpHolidayFeed, HttpMailer};
pub use config::{toml_config::NotifyConfig, CliConfig};
pub use core::{cache::HolidayCache, dispatch::Dispatcher};
pub use domain::model::DispatchOutcome;
pub use utils::error::{NotifyError, Result};
