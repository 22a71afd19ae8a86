use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder the disclosure pages print in place of a missing symbol.
pub const NO_TICKER: &str = "-";

/// A trimmed, non-empty security symbol, e.g. `"AAPL"`.
///
/// The only way to build one is [`Ticker::parse`], so a `Ticker` is never empty and never the
/// [`NO_TICKER`] placeholder.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Trim `raw`; returns `None` for empty text or the `"-"` placeholder.
    ///
    /// ```rust
    /// use tally_spider::model::Ticker;
    ///
    /// assert_eq!(Ticker::parse("  NVDA ").unwrap().as_str(), "NVDA");
    /// assert!(Ticker::parse("-").is_none());
    /// assert!(Ticker::parse("   ").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NO_TICKER {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Ticker {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of a trade a disclosure row records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionClass {
    Sale,
    Purchase,
}

impl TransactionClass {
    /// Anything that is not a sale counts as a purchase; the sources mix in exchanges, gifts and
    /// option exercises under other codes, and those land on the purchase side.
    pub fn from_is_sale(is_sale: bool) -> Self {
        if is_sale {
            Self::Sale
        } else {
            Self::Purchase
        }
    }

    /// Classify a free-text transaction code, case-insensitively.
    pub fn from_code(code: &str) -> Self {
        Self::from_is_sale(code.trim().to_lowercase() == "sale")
    }
}

/// Sales & purchases seen for a single ticker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub sales: u32,
    pub purchases: u32,
}

impl Tally {
    pub fn new(sales: u32, purchases: u32) -> Self {
        Self { sales, purchases }
    }

    fn bump(&mut self, class: TransactionClass) {
        match class {
            TransactionClass::Sale => self.sales += 1,
            TransactionClass::Purchase => self.purchases += 1,
        }
    }
}

/// Per-ticker tallies for one run, ordered by ticker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransactionCounts(BTreeMap<Ticker, Tally>);

impl TransactionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tally for `ticker`, inserting a zeroed one the first time the ticker is seen.
    pub fn entry(&mut self, ticker: Ticker) -> &mut Tally {
        self.0.entry(ticker).or_default()
    }

    /// Count one transaction; exactly one of the two counters moves.
    pub fn record(&mut self, ticker: Ticker, class: TransactionClass) {
        self.entry(ticker).bump(class);
    }

    pub fn get(&self, ticker: &str) -> Option<&Tally> {
        self.0.get(ticker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, &Tally)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of rows counted, across every ticker.
    pub fn total(&self) -> u32 {
        self.0.values().map(|t| t.sales + t.purchases).sum()
    }
}

impl<'a> IntoIterator for &'a TransactionCounts {
    type Item = (&'a Ticker, &'a Tally);
    type IntoIter = std::collections::btree_map::Iter<'a, Ticker, Tally>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
