use crate::aggregate::aggregate;
use crate::error::ScrapeError;
use crate::model::{Ticker, TransactionCounts};
use crate::record::Record;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

lazy_static! {
    static ref TBODY: Selector = Selector::parse("tbody").expect("`tbody` selector");
    static ref TR: Selector = Selector::parse("tr").expect("`tr` selector");
}

/// Compile a CSS selector, keeping the reason if it is rejected.
pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|err| ScrapeError::Selector {
        selector: css.to_string(),
        reason: err.to_string(),
    })
}

/// The first element of `doc` matching `css`.
pub fn find<'a>(doc: &'a Html, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    doc.select(&selector(css)?)
        .next()
        .ok_or_else(|| ScrapeError::TableNotFound {
            selector: css.to_string(),
        })
}

/// Tally the body rows of the first table in `body` matching `css`.
///
/// A table without a `tbody` has no rows to count and gives empty counts.
pub fn counts_from_html<T, S>(
    body: &str,
    css: &str,
    extract_ticker: T,
    is_sale: S,
) -> Result<TransactionCounts, ScrapeError>
where
    T: Fn(&Record<'_>) -> Option<Ticker>,
    S: Fn(&Record<'_>) -> bool,
{
    let doc = Html::parse_document(body);
    let table = find(&doc, css)?;

    let Some(tbody) = table.select(&TBODY).next() else {
        warn!("table `{css}` has no tbody");
        return Ok(TransactionCounts::new());
    };

    let rows: Vec<Record<'_>> = tbody.select(&TR).map(Record::Html).collect();
    debug!("table `{css}` has {} body rows", rows.len());
    Ok(aggregate(rows, |row| extract_ticker(row), |row| is_sale(row)))
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
