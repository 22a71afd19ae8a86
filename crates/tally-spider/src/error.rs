use crate::embedded::EmbeddedError;
use crate::http::FetchError;

/// Everything that can end a scrape early.
///
/// Row-level problems never show up here; the adapters treat them as "no ticker" or "not a sale".
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid selector `{selector}`, {reason}")]
    Selector { selector: String, reason: String },

    #[error("no element matches `{selector}`")]
    TableNotFound { selector: String },

    #[error(transparent)]
    Embedded(#[from] EmbeddedError),
}

impl ScrapeError {
    /// The page was fetched and the data located, but the embedded literal could not be read.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ScrapeError::Embedded(EmbeddedError::Malformed { .. }))
    }
}
