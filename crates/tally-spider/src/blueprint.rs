//! Trimmed snapshots of a table, for working out selectors and cell positions offline.
//!
//! Only the static markup is looked at; tables filled in by JavaScript show up without rows.

use crate::error::ScrapeError;
use crate::record::cell_text;
use crate::table;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

lazy_static! {
    static ref TH: Selector = Selector::parse("th").expect("`th` selector");
    static ref CELL: Selector = Selector::parse("td, th").expect("`td, th` selector");
    static ref TBODY: Selector = Selector::parse("tbody").expect("`tbody` selector");
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blueprint {
    /// Text of every `th` in the table.
    pub headers: Vec<String>,

    /// Cell texts of the first body rows.
    pub rows: Vec<Vec<String>>,

    /// Number of body rows left out of `html`.
    pub removed: usize,

    /// Markup of the table with only the first body rows kept.
    pub html: String,
}

impl Blueprint {
    /// Snapshot the first table in `body` matching `css`, keeping `max_rows` body rows.
    pub fn from_html(body: &str, css: &str, max_rows: usize) -> Result<Self, ScrapeError> {
        let doc = Html::parse_document(body);
        let table = table::find(&doc, css)?;

        let headers: Vec<String> = table.select(&TH).map(cell_text).collect();

        let tbody = table.select(&TBODY).next();
        let rows: Vec<ElementRef<'_>> = match tbody {
            Some(tbody) => child_rows(tbody).collect(),
            // the first row holds the headers
            None => child_rows(table).skip(1).collect(),
        };
        debug!("table `{css}` has {} body rows", rows.len());

        let kept = rows.len().min(max_rows);
        let captured: Vec<Vec<String>> = rows[..kept]
            .iter()
            .map(|row| row.select(&CELL).map(cell_text).collect())
            .collect();

        let mut html = table.html();
        let removed = rows.len() - kept;
        if removed > 0 {
            for row in rows[kept..].iter().rev() {
                let markup = row.html();
                if let Some(at) = html.rfind(&markup) {
                    html.replace_range(at..at + markup.len(), "");
                }
            }
            let comment = format!("<!-- ... {removed} rows removed for brevity ... -->");
            let close = if tbody.is_some() { "</tbody>" } else { "</table>" };
            if let Some(at) = html.rfind(close) {
                html.insert_str(at, &comment);
            }
        }

        Ok(Self {
            headers,
            rows: captured,
            removed,
            html,
        })
    }
}

fn child_rows<'a>(parent: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
}

/// Cut `text` to at most `max_chars` characters.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((at, _)) => &text[..at],
        None => text,
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
