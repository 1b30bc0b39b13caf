/// Errors that can occur while fetching listing or search pages.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Rate limited by {0}")]
    RateLimit(String),

    #[error("Could not parse page: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
