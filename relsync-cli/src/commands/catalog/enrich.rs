use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use relsync_catalog::{Matcher, Period};
use relsync_db::EntryFilter;
use relsync_sync::{enrich_entries, run_with_events, EnrichEvent, EnrichOptions};

use crate::progress::StatusBar;
use crate::settings::Settings;
use crate::CliError;

use super::{install_cancel_handler, open_existing, runtime, truncate_str};

const TITLE_WIDTH: usize = 40;

pub(crate) struct EnrichArgs {
    pub period: Option<Period>,
    pub year: Option<i32>,
    pub force: bool,
    pub limit: Option<u32>,
    pub with_publisher: bool,
}

/// Search the index for each selected entry and record the chosen match.
pub(crate) fn run_catalog_enrich(
    settings: &Settings,
    db_path: &Path,
    args: EnrichArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let Some(conn) = open_existing(db_path)? else {
        return Ok(());
    };

    let filter = match (args.period, args.year) {
        (Some(p), _) => EntryFilter::period(p),
        (None, year) => EntryFilter { year, month: None },
    };
    let options = EnrichOptions {
        filter,
        force: args.force,
        limit: args.limit,
        include_publisher: args.with_publisher || settings.fetch.search_with_publisher,
    };
    let matcher = Matcher::new(settings.markers());
    log::debug!("Matching with markers {:?}", matcher.markers());

    let (_, search) = relsync_fetch::connect(&settings.fetch_config())
        .map_err(|e| CliError::other(format!("Failed to build HTTP client: {}", e)))?;

    let rt = runtime()?;
    let result = rt.block_on(async {
        let cancel = install_cancel_handler();
        let bar = StatusBar::new(quiet);
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<EnrichEvent>();

        let enrich_future = async {
            let result =
                enrich_entries(&search, &conn, &matcher, &options, &cancel, &event_tx).await;
            drop(event_tx);
            result
        };

        let result = run_with_events(enrich_future, event_rx, |e| match e {
            EnrichEvent::Started { total } => {
                if total == 0 {
                    log::info!("Nothing to enrich.");
                }
                bar.start(total);
            }
            EnrichEvent::EntryMatched {
                period,
                title,
                label,
                tier,
                anomalous,
                ..
            } => {
                bar.tick_item();
                let mark = if anomalous {
                    format!("{}", "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()))
                } else {
                    format!("{}", "\u{2714}".if_supports_color(Stdout, |t| t.green()))
                };
                bar.println(&format!(
                    "  {} {} {} ({}: \"{}\")",
                    mark,
                    period,
                    truncate_str(&title, TITLE_WIDTH).if_supports_color(Stdout, |t| t.bold()),
                    tier.as_str(),
                    label,
                ));
            }
            EnrichEvent::EntryNotFound { period, title, .. } => {
                bar.tick_item();
                bar.println(&format!(
                    "  {} {} {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    period,
                    truncate_str(&title, TITLE_WIDTH),
                ));
            }
            EnrichEvent::EntryError { title, error, .. } => {
                bar.tick_item();
                bar.warn(&format!("{}: {}", truncate_str(&title, TITLE_WIDTH), error));
            }
            EnrichEvent::FatalError { message } => bar.warn(&format!("Fatal: {message}")),
            EnrichEvent::Cancelled => bar.warn("Enrichment cancelled"),
            EnrichEvent::Done { stats } => {
                bar.finish();
                crate::log_blank();
                log::info!(
                    "{}",
                    "Enrichment complete".if_supports_color(Stdout, |t| t.bold()),
                );
                log::info!("  Processed:     {:>6}", stats.processed);
                log::info!("  Linked:        {:>6}", stats.linked);
                log::info!("  Size only:     {:>6}", stats.fallback);
                log::info!("  Not found:     {:>6}", stats.not_found);
                if stats.anomalous > 0 {
                    log::info!(
                        "  Needs review:  {:>6} (see 'relsync catalog review')",
                        stats.anomalous
                    );
                }
                if stats.errors > 0 {
                    log::info!("  Errors:        {:>6}", stats.errors);
                }
            }
        })
        .await;

        bar.finish();
        result
    });

    result
        .map(|_| ())
        .map_err(|e| CliError::other(format!("Enrichment failed: {}", e)))
}
