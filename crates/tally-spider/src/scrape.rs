use crate::aggregate::aggregate;
use crate::blueprint::Blueprint;
use crate::config::FetchConfig;
use crate::embedded;
use crate::error::ScrapeError;
use crate::http::{self, HttpClient};
use crate::model::TransactionCounts;
use crate::record::Record;
use crate::source::{FetchMode, SourceConfig};
use crate::table;
use tracing::{debug, info};

// scrape
// ----------------------------------------------------------------------------

/// Fetch the page of `source` and tally it.
pub async fn scrape(
    http_client: &HttpClient,
    source: &SourceConfig,
    fetch: &FetchConfig,
) -> Result<TransactionCounts, ScrapeError> {
    let time = std::time::Instant::now();

    info!("fetching {} disclosures from {} ...", source.name, source.url);
    let body = http::fetch_page(http_client, source.url, fetch).await?;

    let counts = counts_from_body(source, &body)?;
    info!(
        "{} disclosures tallied: {} transactions over {} tickers. {}",
        source.name,
        counts.total(),
        counts.len(),
        crate::time_elapsed(time)
    );
    Ok(counts)
}

/// Tally an already fetched page of `source`.
pub fn counts_from_body(
    source: &SourceConfig,
    body: &str,
) -> Result<TransactionCounts, ScrapeError> {
    match source.mode {
        FetchMode::Html => {
            debug!("reading table `{}`", source.selector);
            table::counts_from_html(body, source.selector, source.extract_ticker, source.is_sale)
        }
        FetchMode::Json { variable } => {
            debug!("reading embedded `{variable}`");
            let records = embedded::extract(body, variable)?;
            debug!("{} embedded records", records.len());
            Ok(aggregate(
                records.iter().map(Record::Json),
                source.extract_ticker,
                source.is_sale,
            ))
        }
    }
}

// blueprint
// ----------------------------------------------------------------------------

/// Fetch the page of `source` and snapshot its table.
pub async fn blueprint(
    http_client: &HttpClient,
    source: &SourceConfig,
    fetch: &FetchConfig,
    max_rows: usize,
) -> Result<Blueprint, ScrapeError> {
    info!("fetching {} table from {} ...", source.name, source.url);
    let body = http::fetch_page(http_client, source.url, fetch).await?;
    Blueprint::from_html(&body, source.selector, max_rows)
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
