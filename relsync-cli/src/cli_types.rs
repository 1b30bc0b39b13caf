//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relsync_catalog::Period;

#[derive(Parser)]
#[command(name = "relsync")]
#[command(about = "Build a monthly release catalog and match it against a search index", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Path to the catalog database (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch, match and inspect the release catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// Fetch listing pages for a range of months into the catalog
    Sync {
        /// First month to fetch (YYYY-MM)
        #[arg(long)]
        from: Period,

        /// Last month to fetch (YYYY-MM, defaults to --from)
        #[arg(long)]
        to: Option<Period>,

        /// Noise token file (overrides settings.toml)
        #[arg(long)]
        noise: Option<PathBuf>,
    },

    /// Search for a download link for each catalog entry
    Enrich {
        /// Only entries from this month (YYYY-MM)
        #[arg(long, conflicts_with = "year")]
        period: Option<Period>,

        /// Only entries from this year
        #[arg(long)]
        year: Option<i32>,

        /// Re-match entries that already have a link
        #[arg(long)]
        force: bool,

        /// Maximum entries to process
        #[arg(long)]
        limit: Option<u32>,

        /// Include the publisher in search queries
        #[arg(long)]
        with_publisher: bool,
    },

    /// Clear stored matches so entries are searched again
    Unenrich {
        /// Only entries from this month (YYYY-MM)
        #[arg(long)]
        period: Option<Period>,

        /// Confirm clearing (required)
        #[arg(long)]
        confirm: bool,
    },

    /// Page through catalog entries
    List {
        /// Filter by year
        #[arg(long)]
        year: Option<i32>,

        /// Filter by month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Entries per page (overrides settings.toml)
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// List months present in the catalog
    Periods,

    /// List entries whose match was uploaded before their release month
    Review,

    /// Show titles folded together by deduplication
    Merges {
        /// Only merges from this month (YYYY-MM)
        #[arg(long)]
        period: Option<Period>,
    },

    /// Export the catalog as CSV
    Export {
        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Only entries from this year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show catalog database statistics
    Stats,

    /// Delete the catalog database
    Reset {
        /// Confirm deletion (required)
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
