use proptest::prelude::*;
use serde_json::{json, Value};
use tally_spider::aggregate::aggregate;
use tally_spider::record::Record;
use tally_spider::source::{insider, legislative};
use tally_spider::table::counts_from_html;
use tally_spider::TransactionCounts;

const CONGRESS_TABLE: &str = "table.table-congress.table-politician";

fn tally(records: &[Value]) -> TransactionCounts {
    aggregate(
        records.iter().map(Record::Json),
        insider::extract_ticker,
        insider::is_sale,
    )
}

fn record() -> impl Strategy<Value = Value> {
    (
        prop::sample::select(vec!["AAPL", "MSFT", "NVDA", "-", "", " TSLA "]),
        prop::sample::select(vec!["Sale", "sale", "Purchase", "Gift", ""]),
        any::<bool>(),
    )
        .prop_map(|(ticker, code, with_code)| {
            if with_code {
                json!({ "issuerTradingSymbol": ticker, "transactionCode": code })
            } else {
                json!({ "issuerTradingSymbol": ticker })
            }
        })
}

fn tally_rows(rows: &[String]) -> TransactionCounts {
    let page = format!(
        r#"<table class="table table-congress table-politician"><tbody>{}</tbody></table>"#,
        rows.concat()
    );
    counts_from_html(
        &page,
        CONGRESS_TABLE,
        legislative::extract_ticker,
        legislative::is_sale,
    )
    .unwrap()
}

fn row() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["AAPL", "MSFT", "NVDA", "-", ""]),
        prop::sample::select(vec![
            r#"<span class="positive">{}</span>"#,
            r#"<span class="negative">{}</span>"#,
            "<span>{}</span>",
            "{}",
        ]),
        prop::sample::select(vec![
            r#"<span class="sale">Sale</span>"#,
            r#"<span class="purchase">Purchase</span>"#,
            "Exchange",
        ]),
    )
        .prop_map(|(ticker, marker, action)| {
            let first = marker.replace("{}", ticker);
            format!("<tr><td>{first}</td><td>{action}</td><td>Jane Doe</td></tr>")
        })
}

proptest! {
    #[test]
    fn order_does_not_matter(
        (records, shuffled) in prop::collection::vec(record(), 0..64)
            .prop_flat_map(|records| {
                let shuffled = Just(records.clone()).prop_shuffle();
                (Just(records), shuffled)
            })
    ) {
        prop_assert_eq!(tally(&records), tally(&shuffled));
    }

    #[test]
    fn every_counted_row_moves_one_counter(records in prop::collection::vec(record(), 0..64)) {
        let counted = records
            .iter()
            .filter(|r| insider::extract_ticker(&Record::Json(*r)).is_some())
            .count();
        prop_assert_eq!(tally(&records).total() as usize, counted);
    }

    #[test]
    fn split_runs_add_up(records in prop::collection::vec(record(), 0..64), at in 0usize..64) {
        let at = at.min(records.len());
        let (left, right) = records.split_at(at);
        let whole = tally(&records);
        let (left, right) = (tally(left), tally(right));
        for (ticker, t) in whole.iter() {
            let l = left.get(ticker.as_str()).copied().unwrap_or_default();
            let r = right.get(ticker.as_str()).copied().unwrap_or_default();
            prop_assert_eq!(t.sales, l.sales + r.sales);
            prop_assert_eq!(t.purchases, l.purchases + r.purchases);
        }
    }

    #[test]
    fn table_row_order_does_not_matter(
        (rows, shuffled) in prop::collection::vec(row(), 0..48)
            .prop_flat_map(|rows| {
                let shuffled = Just(rows.clone()).prop_shuffle();
                (Just(rows), shuffled)
            })
    ) {
        prop_assert_eq!(tally_rows(&rows), tally_rows(&shuffled));
    }

    #[test]
    fn split_tables_add_up(rows in prop::collection::vec(row(), 0..48), at in 0usize..48) {
        let at = at.min(rows.len());
        let (left, right) = rows.split_at(at);
        let whole = tally_rows(&rows);
        let (left, right) = (tally_rows(left), tally_rows(right));
        let mut total = 0;
        for (ticker, t) in whole.iter() {
            let l = left.get(ticker.as_str()).copied().unwrap_or_default();
            let r = right.get(ticker.as_str()).copied().unwrap_or_default();
            prop_assert_eq!(t.sales, l.sales + r.sales);
            prop_assert_eq!(t.purchases, l.purchases + r.purchases);
            total += t.sales + t.purchases;
        }
        prop_assert_eq!(total, left.total() + right.total());
    }
}
