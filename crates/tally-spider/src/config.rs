use dotenv::var;
use std::str::FromStr;
use std::time::Duration;
use tracing::trace;

/// Browser-like `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown source \"{0}\", expected one of: congress, insider")]
    UnknownSource(String),

    #[error("invalid value for {name}: \"{value}\" ({reason})")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the HTTP layer, read from the environment (or `.env`).
///
/// | variable                 | default              |
/// |--------------------------|----------------------|
/// | `TALLY_USER_AGENT`       | [`DEFAULT_USER_AGENT`] |
/// | `TALLY_TIMEOUT_SECS`     | 10                   |
/// | `TALLY_RETRIES`          | 2                    |
/// | `TALLY_RETRY_BACKOFF_MS` | 500                  |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,

    /// Extra attempts after a transport error or a 5xx response.
    pub retries: u32,

    /// Wait before the first retry; doubled for every retry after that.
    pub backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

impl FetchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            user_agent: var("TALLY_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: env_or("TALLY_TIMEOUT_SECS", defaults.timeout.as_secs())
                .map(Duration::from_secs)?,
            retries: env_or("TALLY_RETRIES", defaults.retries)?,
            backoff: env_or("TALLY_RETRY_BACKOFF_MS", defaults.backoff.as_millis() as u64)
                .map(Duration::from_millis)?,
        };
        trace!("fetch config: {config:?}");
        Ok(config)
    }
}

fn env_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Ok(value) => parse_var(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidVar {
        name,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
