use relsync_catalog::CatalogError;
use relsync_db::OperationError;
use relsync_fetch::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
