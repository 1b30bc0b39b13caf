//! Release catalog data model, title normalization, batch deduplication,
//! and cross-source candidate matching.
//!
//! Everything in this crate is a pure function over in-memory values. Network
//! fetches and persistence live in `relsync-fetch` and `relsync-db`.

pub mod dedup;
pub mod matcher;
pub mod noise;
pub mod normalize;
pub mod types;

pub use dedup::{deduplicate, deduplicate_with_report, stem, DedupMerge, Deduplicated};
pub use matcher::{MatchResult, MatchTier, Matcher, Markers, Selection};
pub use noise::{load_noise, parse_noise, NoiseConfiguration, NoiseError};
pub use normalize::{normalize, NoiseFilter};
pub use types::*;
