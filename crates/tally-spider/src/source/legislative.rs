//! Congressional trades: a static table where each row carries the ticker as a coloured `<span>`
//! in the first cell and the transaction type as a tagged `<span>` in the second.

use crate::model::Ticker;
use crate::record::{self, cell_text, Record};
use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};

lazy_static! {
    // in order of preference
    static ref MARKERS: [Selector; 3] = [
        Selector::parse("span.positive").expect("`span.positive` selector"),
        Selector::parse("span.negative").expect("`span.negative` selector"),
        Selector::parse("span").expect("`span` selector"),
    ];
    static ref SALE: Selector = Selector::parse("span.sale").expect("`span.sale` selector");
}

pub fn extract_ticker(row: &Record<'_>) -> Option<Ticker> {
    match row {
        Record::Html(tr) => html_ticker(*tr),
        Record::Json(value) => record::json_ticker(value),
    }
}

pub fn is_sale(row: &Record<'_>) -> bool {
    match row {
        Record::Html(tr) => html_is_sale(*tr),
        Record::Json(value) => record::json_is_sale(value),
    }
}

fn html_ticker(tr: ElementRef<'_>) -> Option<Ticker> {
    let cells = record::direct_cells(tr);
    let first = cells.first()?;
    let marker = MARKERS
        .iter()
        .find_map(|selector| first.select(selector).next())?;
    Ticker::parse(&cell_text(marker))
}

fn html_is_sale(tr: ElementRef<'_>) -> bool {
    record::direct_cells(tr)
        .get(1)
        .is_some_and(|cell| cell.select(&SALE).next().is_some())
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn with_row<F: FnOnce(Record<'_>)>(cells: &str, f: F) {
        let doc = Html::parse_document(&format!("<table><tbody><tr>{cells}</tr></tbody></table>"));
        let tr = doc.select(&Selector::parse("tr").unwrap()).next().unwrap();
        f(Record::Html(tr));
    }

    #[test]
    fn prefers_positive_then_negative_then_any_span() {
        with_row(
            r#"<td><span>Other</span><span class="negative">NEG</span><span class="stock positive">POS</span></td><td></td>"#,
            |row| assert_eq!(extract_ticker(&row).unwrap().as_str(), "POS"),
        );
        with_row(
            r#"<td><span>Other</span><span class="negative"> NEG </span></td>"#,
            |row| assert_eq!(extract_ticker(&row).unwrap().as_str(), "NEG"),
        );
        with_row(r#"<td><div><span>ANY</span></div></td>"#, |row| {
            assert_eq!(extract_ticker(&row).unwrap().as_str(), "ANY")
        });
    }

    #[test]
    fn missing_marker_or_placeholder_is_no_ticker() {
        with_row(r#"<td>AAPL</td><td><span class="sale">Sale</span></td>"#, |row| {
            assert!(extract_ticker(&row).is_none())
        });
        with_row(r#"<td><span class="positive">-</span></td>"#, |row| {
            assert!(extract_ticker(&row).is_none())
        });
        with_row("", |row| assert!(extract_ticker(&row).is_none()));
    }

    #[test]
    fn sale_needs_a_sale_marker_in_the_second_cell() {
        with_row(
            r#"<td><span>AAPL</span></td><td><span class="sale">Sale</span></td>"#,
            |row| assert!(is_sale(&row)),
        );
        with_row(
            r#"<td><span>AAPL</span></td><td><span class="purchase">Purchase</span></td>"#,
            |row| assert!(!is_sale(&row)),
        );
        // the text alone is not enough
        with_row(r#"<td><span>AAPL</span></td><td>Sale</td>"#, |row| {
            assert!(!is_sale(&row))
        });
        // a marker in the wrong cell does not count
        with_row(r#"<td><span class="sale">AAPL</span></td>"#, |row| {
            assert!(!is_sale(&row))
        });
    }
}
