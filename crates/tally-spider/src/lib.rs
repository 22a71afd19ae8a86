pub mod aggregate;
pub mod blueprint;
pub mod config;
pub mod embedded;
pub mod error;
pub mod http;
pub mod literal;
pub mod model;
pub mod record;
pub mod scrape;
pub mod source;
pub mod table;

pub use error::ScrapeError;
pub use model::{Tally, Ticker, TransactionClass, TransactionCounts};
pub use source::{resolve, Source, SourceConfig};

/// Format the time elapsed since `time` for log lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}
