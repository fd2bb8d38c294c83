use crate::{Error, Result, Settings};
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// A fetched documentation page.
///
/// Holds the raw HTML together with the URL it was finally served from, so
/// relative links resolve against the right location after redirects. The DOM
/// is built on demand by [`Page::document`] and must not be kept across an
/// `.await` (`scraper::Html` is not `Send`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    url: String,
    html: String,
}

impl Page {
    /// Wraps already fetched HTML.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Final URL of the page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw HTML source.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Parses the HTML into a DOM tree.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// Source of documentation pages.
///
/// Implementations must bound the time a single fetch can take and report
/// failures as one of the fetch errors (`Network`, `Timeout`, `HttpStatus`).
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its HTML.
    async fn fetch(&self, url: &str) -> Result<Page>;
}

/// HTTP page fetcher backed by `reqwest`
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher using the timeout and user agent from `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_timeout(settings.timeout(), &settings.fetch.user_agent)
    }

    /// Creates a fetcher with a custom request timeout (primarily for tests)
    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<Page> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_request_error(url, e))?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|e| map_request_error(url, e))?;

        debug!("Fetched {} bytes from {}", html.len(), final_url);
        Ok(Page::new(final_url, html))
    }
}

fn map_request_error(url: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(format!("fetching '{url}' timed out"))
    } else {
        Error::Network(err)
    }
}

/// In-memory page source.
///
/// Serves fixed HTML per URL (fragments are ignored, as they are over HTTP)
/// and counts every fetch, which makes the at-most-once guarantees of the
/// index observable. Unknown URLs answer with HTTP 404.
#[derive(Debug, Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    latency: Option<Duration>,
    state: Mutex<FetchLedger>,
}

#[derive(Debug, Default)]
struct FetchLedger {
    hits: HashMap<String, usize>,
    pending_failures: HashMap<String, usize>,
}

impl StaticPages {
    /// Creates an empty page set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, builder style.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(url, html);
        self
    }

    /// Adds or replaces a page.
    pub fn insert(&mut self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(url.into(), html.into());
    }

    /// Delays every fetch, so concurrent callers overlap.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes the next `times` fetches of `url` fail with a timeout.
    pub async fn fail_next(&self, url: &str, times: usize) {
        let mut state = self.state.lock().await;
        state
            .pending_failures
            .insert(strip_fragment(url).to_string(), times);
    }

    /// Number of fetches issued for `url`, failed ones included.
    pub async fn fetch_count(&self, url: &str) -> usize {
        let state = self.state.lock().await;
        state.hits.get(strip_fragment(url)).copied().unwrap_or(0)
    }

    /// Number of fetches issued for any URL.
    pub async fn total_fetches(&self) -> usize {
        let state = self.state.lock().await;
        state.hits.values().sum()
    }
}

impl FromIterator<(String, String)> for StaticPages {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut pages = Self::new();
        for (url, html) in iter {
            pages.insert(url, html);
        }
        pages
    }
}

#[async_trait]
impl PageFetcher for StaticPages {
    async fn fetch(&self, url: &str) -> Result<Page> {
        let key = strip_fragment(url);
        {
            let mut state = self.state.lock().await;
            *state.hits.entry(key.to_string()).or_insert(0) += 1;
            if let Some(remaining) = state.pending_failures.get_mut(key) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(Error::Timeout(format!("fetching '{key}' timed out")));
                }
            }
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.pages
            .get(key)
            .map(|html| Page::new(key, html.clone()))
            .ok_or_else(|| Error::HttpStatus {
                url: key.to_string(),
                status: 404,
            })
    }
}

fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(base, _)| base)
}
