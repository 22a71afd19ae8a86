use crate::config::ConfigError;
use crate::model::Ticker;
use crate::record::Record;
use std::fmt;
use std::str::FromStr;

/// [Congress Trading](https://www.quiverquant.com/congresstrading/)
pub mod legislative;

/// [Insider Trading](https://www.quiverquant.com/insiders/)
pub mod insider;

/// The disclosure feeds that can be tallied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// Trades disclosed by members of Congress.
    Legislative,

    /// Trades disclosed by corporate insiders (Form 4 filings).
    Insider,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Legislative, Source::Insider];

    /// Name used on the command line and in report headers.
    pub fn name(self) -> &'static str {
        resolve(self).name
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "congress" | "legislative" => Ok(Source::Legislative),
            "insider" | "insiders" => Ok(Source::Insider),
            _ => Err(ConfigError::UnknownSource(name.to_string())),
        }
    }
}

/// How the rows of a page are reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    /// Rows are `<tr>` elements under the `tbody` of the table matched by the selector.
    Html,

    /// Rows are objects of an array literal assigned to `variable` inside a `<script>`.
    Json { variable: &'static str },
}

/// Everything needed to fetch and tally one source.
#[derive(Clone, Copy)]
pub struct SourceConfig {
    pub source: Source,
    pub name: &'static str,
    pub url: &'static str,
    pub selector: &'static str,
    pub mode: FetchMode,

    /// Tickers need strictly more purchases than this to be reported.
    pub purchase_threshold: u32,
    pub extract_ticker: fn(&Record<'_>) -> Option<Ticker>,
    pub is_sale: fn(&Record<'_>) -> bool,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("source", &self.source)
            .field("name", &self.name)
            .field("url", &self.url)
            .field("selector", &self.selector)
            .field("mode", &self.mode)
            .field("purchase_threshold", &self.purchase_threshold)
            .finish_non_exhaustive()
    }
}

static LEGISLATIVE: SourceConfig = SourceConfig {
    source: Source::Legislative,
    name: "congress",
    url: "https://www.quiverquant.com/congresstrading/",
    selector: "table.table-congress.table-politician",
    mode: FetchMode::Html,
    purchase_threshold: 2,
    extract_ticker: legislative::extract_ticker,
    is_sale: legislative::is_sale,
};

static INSIDER: SourceConfig = SourceConfig {
    source: Source::Insider,
    name: "insider",
    url: "https://www.quiverquant.com/insiders/",
    selector: "table#recentInsiderTransactionsTable",
    mode: FetchMode::Json {
        variable: "recentInsiderTransactionsData",
    },
    purchase_threshold: 0,
    extract_ticker: insider::extract_ticker,
    is_sale: insider::is_sale,
};

/// Look up the configuration of a source.
pub fn resolve(source: Source) -> &'static SourceConfig {
    match source {
        Source::Legislative => &LEGISLATIVE,
        Source::Insider => &INSIDER,
    }
}

/// Look up a source by name, rejecting anything outside the fixed set.
pub fn resolve_name(name: &str) -> Result<&'static SourceConfig, ConfigError> {
    name.parse().map(resolve)
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
