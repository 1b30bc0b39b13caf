//! relsync CLI
//!
//! Command-line interface for building the release catalog, matching it
//! against the search index, and inspecting the results.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;
mod settings;

use clap::Parser;

use cli_types::{CatalogAction, Cli, Commands, ConfigAction};
use commands::catalog;
use settings::{settings_path, Settings};

pub(crate) use error::CliError;
pub(crate) use logging::log_blank;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(&settings_path())?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Catalog { action } => {
            let db_path = settings.database_path(cli.db);
            match action {
                CatalogAction::Sync { from, to, noise } => {
                    catalog::sync::run_catalog_sync(&settings, &db_path, from, to, noise, quiet)
                }
                CatalogAction::Enrich {
                    period,
                    year,
                    force,
                    limit,
                    with_publisher,
                } => catalog::enrich::run_catalog_enrich(
                    &settings,
                    &db_path,
                    catalog::enrich::EnrichArgs {
                        period,
                        year,
                        force,
                        limit,
                        with_publisher,
                    },
                    quiet,
                ),
                CatalogAction::Unenrich { period, confirm } => {
                    catalog::unenrich::run_catalog_unenrich(&db_path, period, confirm)
                }
                CatalogAction::List {
                    year,
                    month,
                    page,
                    per_page,
                } => {
                    let per_page = per_page.unwrap_or(settings.display.per_page);
                    catalog::list::run_catalog_list(&db_path, year, month, page, per_page)
                }
                CatalogAction::Periods => catalog::periods::run_catalog_periods(&db_path),
                CatalogAction::Review => catalog::review::run_catalog_review(&db_path),
                CatalogAction::Merges { period } => {
                    catalog::merges::run_catalog_merges(&db_path, period)
                }
                CatalogAction::Export { out, year } => {
                    catalog::export::run_catalog_export(&db_path, &out, year)
                }
                CatalogAction::Stats => catalog::stats::run_catalog_stats(&db_path),
                CatalogAction::Reset { confirm } => {
                    catalog::reset::run_catalog_reset(&db_path, confirm)
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, cli.db),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(force),
        },
    }
}
