// Adapters layer: concrete implementations for external systems (holiday
// feed over HTTP, mail relay over HTTP).

pub mod http_feed;
pub mod http_mailer;

pub use http_feed::HttpHolidayFeed;
pub use http_mailer::HttpMailer;
