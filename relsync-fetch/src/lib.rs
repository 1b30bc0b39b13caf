//! HTTP access to the release listing and the distribution search index.
//!
//! Both clients share one rate limiter; the page parsers are pure functions
//! so they can be tested against saved HTML.

pub mod client;
pub mod error;
pub mod listing;
pub mod query;
pub mod search;

pub use client::{
    connect, FetchConfig, ListingClient, RateLimiter, SearchClient, DEFAULT_LISTING_BASE,
    DEFAULT_SEARCH_BASE, MIN_REQUEST_INTERVAL,
};
pub use error::FetchError;
pub use listing::parse_listing_page;
pub use query::search_query;
pub use search::parse_search_page;
