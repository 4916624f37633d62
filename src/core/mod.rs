pub mod cache;
pub mod dispatch;
pub mod feed;
pub mod markup;
pub mod resolver;
pub mod template;

pub use crate::domain::model::{
    CacheRecord, DispatchOutcome, HolidayCalendar, OutboundEmail, RenderedEmail, TemplatePair,
};
pub use crate::domain::ports::{HolidayFeed, Mailer, SettingsProvider};
pub use crate::utils::error::Result;
