use crate::config::FetchConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::StatusCode;
use tracing::{debug, error, trace, warn};

pub use reqwest::Client as HttpClient;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build http client, error({0})")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch {url}, error({source})")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {url}, status({status})")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    /// Transport failures, `429` and `5xx` responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Client(_) => false,
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
        }
    }
}

/// HTTP client that presents itself as a desktop browser.
pub fn build_client(config: &FetchConfig) -> Result<HttpClient, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|err| {
            error!("failed to build http client, error({err})");
            FetchError::Client(err)
        })
}

/// GET `url` and return the body, retrying transport errors and 5xx responses.
///
/// Fails closed: any non-success status that is left after the retries is an error, the body
/// of an error page is never returned.
pub async fn fetch_page(
    client: &HttpClient,
    url: &str,
    config: &FetchConfig,
) -> Result<String, FetchError> {
    let mut backoff = config.backoff;
    let mut attempt = 0;
    loop {
        match fetch_once(client, url).await {
            Ok(body) => {
                debug!("fetched {url}, {} bytes", body.len());
                return Ok(body);
            }
            Err(err) if err.is_retryable() && attempt < config.retries => {
                attempt += 1;
                warn!(
                    "{err}; retry {attempt}/{} in {backoff:?}",
                    config.retries
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(err) => {
                error!("{err}");
                return Err(err);
            }
        }
    }
}

async fn fetch_once(client: &HttpClient, url: &str) -> Result<String, FetchError> {
    trace!("GET {url}");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })
}
