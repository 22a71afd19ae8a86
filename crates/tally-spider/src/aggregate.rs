use crate::model::{Ticker, TransactionClass, TransactionCounts};
use tracing::trace;

/// Tally sales & purchases per ticker in a single pass over `rows`.
///
/// Rows without a ticker are skipped; every other row moves exactly one counter of its ticker.
/// The result does not depend on the order of `rows`.
///
/// ```rust
/// use tally_spider::aggregate::aggregate;
///
/// let rows = [("AAPL", "sale"), ("AAPL", "buy"), ("-", "sale")];
/// let counts = aggregate(
///     rows,
///     |(ticker, _)| tally_spider::model::Ticker::parse(ticker),
///     |(_, code)| *code == "sale",
/// );
/// let aapl = counts.get("AAPL").unwrap();
/// assert_eq!((aapl.sales, aapl.purchases), (1, 1));
/// assert_eq!(counts.len(), 1);
/// ```
pub fn aggregate<R, T, S>(
    rows: impl IntoIterator<Item = R>,
    extract_ticker: T,
    is_sale: S,
) -> TransactionCounts
where
    T: Fn(&R) -> Option<Ticker>,
    S: Fn(&R) -> bool,
{
    let mut counts = TransactionCounts::new();
    let mut skipped = 0usize;
    for row in rows {
        let Some(ticker) = extract_ticker(&row) else {
            skipped += 1;
            continue;
        };
        let class = TransactionClass::from_is_sale(is_sale(&row));
        counts.record(ticker, class);
    }
    trace!(
        "aggregated {} rows over {} tickers, {skipped} rows without a ticker",
        counts.total(),
        counts.len()
    );
    counts
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tally;
    use crate::record::Record;
    use crate::source::{insider, legislative};
    use scraper::{Html, Selector};
    use serde_json::json;

    #[test]
    fn html_table_round_trip() {
        let doc = Html::parse_document(
            r#"<table><tbody>
                <tr><td><span class="positive">ABC</span></td><td><span class="purchase">Purchase</span></td></tr>
                <tr><td><span class="negative">ABC</span></td><td><span class="sale">Sale</span></td></tr>
                <tr><td><span>ABC</span></td><td><span class="purchase">Purchase</span></td></tr>
            </tbody></table>"#,
        );
        let tr = Selector::parse("tbody tr").unwrap();
        let counts = aggregate(
            doc.select(&tr).map(Record::Html),
            legislative::extract_ticker,
            legislative::is_sale,
        );
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("ABC"), Some(&Tally::new(1, 2)));
    }

    #[test]
    fn json_records_skip_the_placeholder() {
        let records = json!([
            { "issuerTradingSymbol": "XYZ", "transactionCode": "Sale" },
            { "issuerTradingSymbol": "XYZ", "transactionCode": "Purchase" },
            { "issuerTradingSymbol": "-", "transactionCode": "Sale" },
        ]);
        let records = records.as_array().unwrap();
        let counts = aggregate(
            records.iter().map(Record::Json),
            insider::extract_ticker,
            insider::is_sale,
        );
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("XYZ"), Some(&Tally::new(1, 1)));
    }

    #[test]
    fn rows_without_a_ticker_change_nothing() {
        let records = vec![
            json!({ "issuerTradingSymbol": "XYZ", "transactionCode": "Sale" }),
            json!({ "issuerTradingSymbol": "XYZ", "transactionCode": "Purchase" }),
        ];
        let before = aggregate(
            records.iter().map(Record::Json),
            insider::extract_ticker,
            insider::is_sale,
        );

        let mut with_blank = records.clone();
        with_blank.push(json!({ "transactionCode": "Sale" }));
        with_blank.push(json!({ "issuerTradingSymbol": "-" }));
        with_blank.push(json!("not even an object"));
        let after = aggregate(
            with_blank.iter().map(Record::Json),
            insider::extract_ticker,
            insider::is_sale,
        );

        assert_eq!(before, after);
    }

    #[test]
    fn empty_input_is_empty_counts() {
        let counts = aggregate(Vec::<Record>::new(), insider::extract_ticker, insider::is_sale);
        assert!(counts.is_empty());
    }
}
