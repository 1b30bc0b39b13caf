use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use relsync_catalog::{load_noise, NoiseFilter, Period};
use relsync_sync::{period_range, run_with_events, sync_periods, SyncEvent};

use crate::progress::StatusBar;
use crate::settings::Settings;
use crate::CliError;

use super::{install_cancel_handler, open_or_create, runtime};

/// Fetch listing pages for `from..=to` and persist the cleaned batches.
pub(crate) fn run_catalog_sync(
    settings: &Settings,
    db_path: &Path,
    from: Period,
    to: Option<Period>,
    noise: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let periods = period_range(from, to.unwrap_or(from))
        .map_err(|e| CliError::other(e.to_string()))?;

    let noise_path = noise.unwrap_or_else(|| settings.noise.file.clone());
    let noise = load_noise(&noise_path).map_err(|e| CliError::config(e.to_string()))?;
    let filter = NoiseFilter::new(&noise);
    log::debug!(
        "{} noise tokens from {}",
        filter.tokens().len(),
        noise_path.display()
    );

    let conn = open_or_create(db_path)?;
    let (listing, _) = relsync_fetch::connect(&settings.fetch_config())
        .map_err(|e| CliError::other(format!("Failed to build HTTP client: {}", e)))?;

    let rt = runtime()?;
    let result = rt.block_on(async {
        let cancel = install_cancel_handler();
        let bar = StatusBar::new(quiet);
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<SyncEvent>();

        let sync_future = async {
            let result =
                sync_periods(&listing, &conn, &filter, &periods, &cancel, &event_tx).await;
            drop(event_tx);
            result
        };

        let result = run_with_events(sync_future, event_rx, |e| match e {
            SyncEvent::Started { total } => bar.start(total),
            SyncEvent::PeriodStarted { period, .. } => {
                bar.set_message(format!("Fetching {period}"));
            }
            SyncEvent::PeriodEmpty { period, .. } => {
                bar.tick_item();
                bar.println(&format!(
                    "  {} {} {}",
                    "-".if_supports_color(Stdout, |t| t.dimmed()),
                    period,
                    "no releases".if_supports_color(Stdout, |t| t.dimmed()),
                ));
            }
            SyncEvent::PeriodDone {
                period,
                counts,
                batch,
                ..
            } => {
                bar.tick_item();
                bar.println(&format!(
                    "  {} {}: {} rows, {} kept, {} merged, {} new",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    period.if_supports_color(Stdout, |t| t.bold()),
                    counts.fetched,
                    counts.kept,
                    counts.merged,
                    batch.inserted,
                ));
            }
            SyncEvent::PeriodError { period, error, .. } => {
                bar.tick_item();
                bar.warn(&format!("{period}: {error}"));
            }
            SyncEvent::Cancelled => bar.warn("Sync cancelled"),
            SyncEvent::Done { stats } => {
                bar.finish();
                crate::log_blank();
                log::info!(
                    "{}",
                    "Sync complete".if_supports_color(Stdout, |t| t.bold()),
                );
                log::info!("  Months synced:   {:>6}", stats.periods_synced);
                log::info!("  Months empty:    {:>6}", stats.periods_empty);
                log::info!("  Rows fetched:    {:>6}", stats.rows_fetched);
                log::info!("  Entries new:     {:>6}", stats.entries_inserted);
                log::info!("  Entries updated: {:>6}", stats.entries_updated);
                log::info!("  Merged away:     {:>6}", stats.entries_merged);
                if stats.rows_rejected > 0 {
                    log::info!("  Rejected rows:   {:>6}", stats.rows_rejected);
                }
                if stats.periods_failed > 0 {
                    log::info!("  Months failed:   {:>6}", stats.periods_failed);
                }
            }
        })
        .await;

        bar.finish();
        result
    });

    result
        .map(|_| ())
        .map_err(|e| CliError::other(format!("Sync failed: {}", e)))
}
