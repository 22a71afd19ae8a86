use crate::model::{Ticker, TransactionClass};
use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};
use serde_json::Value;

lazy_static! {
    static ref TD: Selector = Selector::parse("td").expect("`td` selector");
}

/// One transaction as published by a source, borrowed from the parsed page.
///
/// The two disclosure feeds publish either a `<tr>` of a static table or an object inside an
/// array embedded in a `<script>`; each source adapter handles both shapes.
#[derive(Clone, Copy, Debug)]
pub enum Record<'a> {
    /// A `<tr>` element.
    Html(ElementRef<'a>),

    /// An object inside an embedded array literal.
    Json(&'a Value),
}

// html rows
// ----------------------------------------------------------------------------

/// The `td` cells that are direct children of `row`.
pub(crate) fn direct_cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}

/// Every `td` cell below `row`, nested ones included.
pub(crate) fn all_cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.select(&TD).collect()
}

/// Text of an element with each text node trimmed and the pieces glued back together.
pub fn cell_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

// json records
// ----------------------------------------------------------------------------

/// Field holding the security symbol in embedded insider records.
pub const SYMBOL_FIELD: &str = "issuerTradingSymbol";

/// Field holding the transaction type in embedded insider records.
pub const CODE_FIELD: &str = "transactionCode";

/// Ticker of an embedded record; missing, non-string or placeholder symbols yield `None`.
pub fn json_ticker(record: &Value) -> Option<Ticker> {
    record
        .get(SYMBOL_FIELD)
        .and_then(Value::as_str)
        .and_then(Ticker::parse)
}

/// Whether an embedded record is a sale; a missing code counts as a purchase.
pub fn json_is_sale(record: &Value) -> bool {
    let code = record.get(CODE_FIELD).and_then(Value::as_str).unwrap_or("");
    TransactionClass::from_code(code) == TransactionClass::Sale
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
