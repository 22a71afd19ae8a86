//! Corporate-insider trades: plain text cells, ticker in the second column and the transaction
//! type in the third. The live page builds the table from an embedded array, so the records
//! usually arrive as [`Record::Json`].

use crate::model::{Ticker, TransactionClass};
use crate::record::{self, cell_text, Record};

pub fn extract_ticker(row: &Record<'_>) -> Option<Ticker> {
    match row {
        Record::Html(tr) => record::all_cells(*tr)
            .get(1)
            .and_then(|cell| Ticker::parse(&cell_text(*cell))),
        Record::Json(value) => record::json_ticker(value),
    }
}

pub fn is_sale(row: &Record<'_>) -> bool {
    match row {
        Record::Html(tr) => record::all_cells(*tr).get(2).is_some_and(|cell| {
            TransactionClass::from_code(&cell_text(*cell)) == TransactionClass::Sale
        }),
        Record::Json(value) => record::json_is_sale(value),
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
