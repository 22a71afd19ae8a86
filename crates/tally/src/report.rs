use std::collections::BTreeMap;
use std::fmt::Write;
use tally_spider::blueprint::{self, Blueprint};
use tally_spider::{Tally, TransactionCounts};

/// `--- Congress Purchases ---`
pub(crate) fn header(name: &str) -> String {
    let mut chars = name.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("--- {name} Purchases ---")
}

/// Tickers with strictly more than `threshold` purchases, in ticker order.
pub(crate) fn filter(
    counts: &TransactionCounts,
    threshold: u32,
) -> impl Iterator<Item = (&str, &Tally)> {
    counts
        .iter()
        .filter(move |(_, tally)| tally.purchases > threshold)
        .map(|(ticker, tally)| (ticker.as_str(), tally))
}

/// One `<TICKER> <purchases>` line per reported ticker, or `<TICKER> <sales> <purchases>`.
pub(crate) fn render(counts: &TransactionCounts, threshold: u32, with_sales: bool) -> String {
    let mut out = String::new();
    for (ticker, tally) in filter(counts, threshold) {
        if with_sales {
            let _ = writeln!(out, "{ticker} {} {}", tally.sales, tally.purchases);
        } else {
            let _ = writeln!(out, "{ticker} {}", tally.purchases);
        }
    }
    out
}

pub(crate) fn render_json(counts: &TransactionCounts, threshold: u32) -> serde_json::Result<String> {
    let filtered: BTreeMap<&str, &Tally> = filter(counts, threshold).collect();
    serde_json::to_string_pretty(&filtered)
}

pub(crate) fn render_blueprint(blueprint: &Blueprint, max_chars: usize) -> String {
    let rule = "-".repeat(30);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "DETECTED DATA (First {} Rows):", blueprint.rows.len());
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "HEADERS: {:?}\n", blueprint.headers);
    for (i, row) in blueprint.rows.iter().enumerate() {
        let _ = writeln!(out, "ROW {}: {row:?}", i + 1);
    }
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "MINIMAL HTML FOR SCRAPER:");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", blueprint::truncate(&blueprint.html, max_chars));
    out
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use tally_spider::{Ticker, TransactionClass};

    fn counts(rows: &[(&str, u32, u32)]) -> TransactionCounts {
        let mut counts = TransactionCounts::new();
        for (ticker, sales, purchases) in rows {
            let ticker = Ticker::parse(ticker).unwrap();
            for _ in 0..*sales {
                counts.record(ticker.clone(), TransactionClass::Sale);
            }
            for _ in 0..*purchases {
                counts.record(ticker.clone(), TransactionClass::Purchase);
            }
        }
        counts
    }

    #[test]
    fn headers() {
        assert_eq!(header("congress"), "--- Congress Purchases ---");
        assert_eq!(header("insider"), "--- Insider Purchases ---");
    }

    #[test]
    fn threshold_is_exclusive() {
        let counts = counts(&[("MSFT", 0, 3), ("AAPL", 5, 2), ("NVDA", 1, 4)]);
        assert_eq!(render(&counts, 2, false), "MSFT 3\nNVDA 4\n");
    }

    #[test]
    fn zero_threshold_drops_sale_only_tickers() {
        let counts = counts(&[("TSLA", 3, 0), ("AMD", 0, 1)]);
        assert_eq!(render(&counts, 0, false), "AMD 1\n");
    }

    #[test]
    fn with_sales() {
        let counts = counts(&[("NVDA", 1, 4)]);
        assert_eq!(render(&counts, 0, true), "NVDA 1 4\n");
    }

    #[test]
    fn json() {
        let counts = counts(&[("NVDA", 1, 4), ("AAPL", 2, 0)]);
        let value: serde_json::Value = serde_json::from_str(&render_json(&counts, 0).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "NVDA": { "sales": 1, "purchases": 4 } }));
    }

    #[test]
    fn blueprint_layout() {
        let blueprint = Blueprint {
            headers: vec!["Name".into(), "Ticker".into()],
            rows: vec![vec!["Jane".into(), "NVDA".into()]],
            removed: 0,
            html: "<table>abcdef</table>".into(),
        };
        let out = render_blueprint(&blueprint, 10);
        assert!(out.contains("HEADERS: [\"Name\", \"Ticker\"]"));
        assert!(out.contains("ROW 1: [\"Jane\", \"NVDA\"]"));
        assert!(out.contains("<table>abc\n"));
        assert!(!out.contains("abcdef"));
    }
}
