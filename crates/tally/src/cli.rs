use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    ///
    /// Without it, no logs are written and a spinner is shown while fetching.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count recent purchases & sales per ticker, and print the most bought tickers.
    Count {
        /// Which disclosure feed to scrape.
        source: Source,

        /// Only print tickers with more purchases than this.
        ///
        /// Defaults to 2 for congress and 0 for insider.
        #[arg(long)]
        threshold: Option<u32>,

        /// Print the sales count before the purchase count.
        #[arg(long)]
        with_sales: bool,

        /// Print the tallies as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the headers, first rows and trimmed markup of a source's table.
    Blueprint {
        /// Which disclosure feed to inspect.
        source: Source,

        /// Number of body rows to keep.
        #[arg(short, long, default_value_t = 3)]
        rows: usize,

        /// Number of characters of markup to print.
        #[arg(short, long, default_value_t = 2500)]
        chars: usize,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Trades disclosed by members of Congress.
    #[value(alias = "legislative")]
    Congress,

    /// Trades disclosed by corporate insiders.
    Insider,
}

impl From<Source> for tally_spider::Source {
    fn from(source: Source) -> Self {
        match source {
            Source::Congress => tally_spider::Source::Legislative,
            Source::Insider => tally_spider::Source::Insider,
        }
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
