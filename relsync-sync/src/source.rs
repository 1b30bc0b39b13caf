//! Seams between orchestration and the network.
//!
//! The HTTP clients implement these; tests substitute in-memory fakes.

use std::future::Future;

use relsync_catalog::{Candidate, Period, RawRow};
use relsync_fetch::{FetchError, ListingClient, SearchClient};

/// Something that can list the releases of one period.
pub trait ListingSource {
    fn fetch_catalog_page(
        &self,
        period: Period,
    ) -> impl Future<Output = Result<Vec<RawRow>, FetchError>>;
}

/// Something that can search the distribution index.
pub trait SearchSource {
    fn search_candidates(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Candidate>, FetchError>>;
}

impl ListingSource for ListingClient {
    async fn fetch_catalog_page(&self, period: Period) -> Result<Vec<RawRow>, FetchError> {
        ListingClient::fetch_catalog_page(self, period).await
    }
}

impl SearchSource for SearchClient {
    async fn search_candidates(&self, query: &str) -> Result<Vec<Candidate>, FetchError> {
        SearchClient::search_candidates(self, query).await
    }
}
