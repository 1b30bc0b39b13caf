use std::sync::Arc;

use relsync_catalog::{Candidate, Period, RawRow};
use reqwest::header::{COOKIE, USER_AGENT};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::FetchError;
use crate::listing::parse_listing_page;
use crate::search::parse_search_page;

pub const DEFAULT_LISTING_BASE: &str = "https://www.getchu.com";
pub const DEFAULT_SEARCH_BASE: &str = "https://sukebei.nyaa.si";
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(2000);

/// Cookie that skips the listing site's age-confirmation interstitial.
const ADULT_CONFIRMATION_COOKIE: &str = "getchu_adalt_flag=getchu.com";
/// Listing pages without a charset in their Content-Type are EUC-JP.
const LISTING_FALLBACK_CHARSET: &str = "euc-jp";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoints and pacing for both clients.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub listing_base: String,
    pub search_base: String,
    pub request_interval: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            listing_base: DEFAULT_LISTING_BASE.to_string(),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            request_interval: MIN_REQUEST_INTERVAL,
        }
    }
}

/// Shared pacing between outbound requests.
///
/// Cloning shares the same clock, so every clone waits on the others.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until at least `interval` has passed since the previous request.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Build both clients over one HTTP connection pool and one rate limiter.
pub fn connect(config: &FetchConfig) -> Result<(ListingClient, SearchClient), FetchError> {
    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let limiter = RateLimiter::new(config.request_interval);

    let listing = ListingClient {
        http: http.clone(),
        base: trim_base(&config.listing_base),
        limiter: limiter.clone(),
    };
    let search = SearchClient {
        http,
        base: trim_base(&config.search_base),
        limiter,
    };
    Ok((listing, search))
}

/// HTTP client for the monthly release listing.
#[derive(Debug, Clone)]
pub struct ListingClient {
    http: reqwest::Client,
    base: String,
    limiter: RateLimiter,
}

impl ListingClient {
    /// URL of the listing page for a period.
    pub fn page_url(&self, period: Period) -> String {
        format!(
            "{}/all/price.html?genre=pc_soft&year={}&month={}",
            self.base,
            period.year(),
            period.month()
        )
    }

    /// Fetch and parse every release row listed for `period`.
    ///
    /// A month with no releases yields an empty list, not an error.
    pub async fn fetch_catalog_page(&self, period: Period) -> Result<Vec<RawRow>, FetchError> {
        let url = self.page_url(period);
        self.limiter.wait().await;
        log::debug!("GET {url}");

        let resp = self
            .http
            .get(&url)
            .header(COOKIE, ADULT_CONFIRMATION_COOKIE)
            .header(USER_AGENT, user_agent())
            .send()
            .await?;
        let resp = check_status(resp, &url)?;
        let html = resp.text_with_charset(LISTING_FALLBACK_CHARSET).await?;

        let rows = parse_listing_page(&html)?;
        log::debug!("{period}: {} listing rows", rows.len());
        Ok(rows)
    }
}

/// HTTP client for the distribution search index.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base: String,
    limiter: RateLimiter,
}

impl SearchClient {
    /// Search for `query` and return candidates newest first.
    pub async fn search_candidates(&self, query: &str) -> Result<Vec<Candidate>, FetchError> {
        let url = format!("{}/", self.base);
        self.limiter.wait().await;
        log::debug!("search: {query}");

        let resp = self
            .http
            .get(&url)
            .query(&[("f", "0"), ("c", "1_3"), ("q", query)])
            .header(USER_AGENT, user_agent())
            .send()
            .await?;
        let resp = check_status(resp, &url)?;
        let html = resp.text().await?;

        let candidates = parse_search_page(&html)?;
        log::debug!("search '{query}': {} candidates", candidates.len());
        Ok(candidates)
    }
}

fn check_status(resp: reqwest::Response, url: &str) -> Result<reqwest::Response, FetchError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimit(url.to_string()));
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp)
}

fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

fn user_agent() -> String {
    format!("relsync/{}", env!("CARGO_PKG_VERSION"))
}
