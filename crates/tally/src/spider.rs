use crate::report;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tally_spider::config::FetchConfig;
use tally_spider::http;
use tally_spider::scrape;
use tally_spider::{ScrapeError, Source};
use tracing::{debug, error, info, trace};

#[derive(Debug)]
pub(crate) struct CountOptions {
    pub threshold: Option<u32>,
    pub with_sales: bool,
    pub json: bool,
}

/// Scrape one source and print the tickers that were bought the most.
pub(crate) async fn count(source: Source, options: CountOptions, tui: bool) -> anyhow::Result<()> {
    let config = tally_spider::resolve(source);
    trace!("resolved source: {config:?}");

    let fetch = FetchConfig::from_env()?;
    let http_client = http::build_client(&fetch)?;

    let pb = spinner(tui, format!("fetching {} disclosures ...", config.name));
    let result = scrape::scrape(&http_client, config, &fetch).await;
    pb.finish_and_clear();

    let counts = match result {
        Ok(counts) => counts,
        Err(err) => {
            error!("failed to tally {}, error({err})", config.name);
            println!("{}", failure_message(config.name, &err));
            std::process::exit(1);
        }
    };

    let threshold = options.threshold.unwrap_or(config.purchase_threshold);
    debug!("reporting tickers with more than {threshold} purchases");

    if options.json {
        println!("{}", report::render_json(&counts, threshold)?);
    } else {
        println!("{}", report::header(config.name));
        print!("{}", report::render(&counts, threshold, options.with_sales));
    }

    info!("{} report printed", config.name);
    Ok(())
}

/// Fetch a source's page and print a trimmed snapshot of its table.
pub(crate) async fn blueprint(
    source: Source,
    rows: usize,
    chars: usize,
    tui: bool,
) -> anyhow::Result<()> {
    let config = tally_spider::resolve(source);
    let fetch = FetchConfig::from_env()?;
    let http_client = http::build_client(&fetch)?;

    let pb = spinner(tui, format!("fetching {} table ...", config.name));
    let result = scrape::blueprint(&http_client, config, &fetch, rows).await;
    pb.finish_and_clear();

    match result {
        Ok(blueprint) => {
            print!("{}", report::render_blueprint(&blueprint, chars));
            Ok(())
        }
        Err(ScrapeError::TableNotFound { selector }) => {
            println!("Table not found in page (selector `{selector}`).");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

/// The single line printed when a run ends without data.
pub(crate) fn failure_message(name: &str, err: &ScrapeError) -> String {
    match err {
        ScrapeError::Embedded(_) if err.is_malformed() => {
            format!("Error: Could not parse JSON data for {name}")
        }
        ScrapeError::Embedded(_) => format!("Error: Could not fetch JSON data for {name}"),
        ScrapeError::TableNotFound { .. } => format!("Error: Could not find table for {name}"),
        _ => format!("Error: Could not fetch data for {name} ({err})"),
    }
}

fn spinner(tui: bool, msg: String) -> ProgressBar {
    if !tui {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner().with_message(msg).with_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
