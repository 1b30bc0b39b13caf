//! Orchestration of the two catalog passes.
//!
//! `sync` walks listing periods into the database; `enrich` searches the
//! distribution index for stored entries and records the selected match.
//! Both report progress over an unbounded channel and stop between items
//! when the cancel flag is raised.

pub mod enrich;
pub mod error;
pub mod events;
pub mod source;
pub mod sync;

pub use enrich::{enrich_entries, EnrichEvent, EnrichOptions, EnrichStats};
pub use error::SyncError;
pub use events::run_with_events;
pub use source::{ListingSource, SearchSource};
pub use sync::{period_range, sync_periods, SyncEvent, SyncStats};
