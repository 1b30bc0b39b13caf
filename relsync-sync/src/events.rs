//! Driving an orchestration future while draining its event channel.

use std::future::Future;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Duration, Instant};

/// Upper bound on draining leftover events once the task has finished.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `task` to completion, calling `on_event` for each event it emits.
///
/// Events still queued when the task finishes are delivered before the
/// task's result is returned.
pub async fn run_with_events<F, E, R>(
    task: F,
    mut event_rx: UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);

    let result = loop {
        tokio::select! {
            r = &mut task => break Some(r),
            event = event_rx.recv() => match event {
                Some(e) => on_event(e),
                None => break None,
            },
        }
    };

    match result {
        Some(r) => {
            let deadline = Instant::now() + DRAIN_TIMEOUT;
            loop {
                match tokio::time::timeout_at(deadline, event_rx.recv()).await {
                    Ok(Some(e)) => on_event(e),
                    Ok(None) => break,
                    Err(_) => {
                        log::warn!(
                            "Event drain timed out after {}s",
                            DRAIN_TIMEOUT.as_secs()
                        );
                        break;
                    }
                }
            }
            r
        }
        None => {
            log::debug!("Event channel closed before task finished");
            task.await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn delivers_all_events_and_returns_result() {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = async move {
            for i in 0..5 {
                tx.send(i).unwrap();
                tokio::task::yield_now().await;
            }
            "done"
        };

        let mut seen = Vec::new();
        let result = run_with_events(task, rx, |e| seen.push(e)).await;
        assert_eq!(result, "done");
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn early_channel_close_still_awaits_task() {
        let (tx, rx) = mpsc::unbounded_channel::<u32>();
        drop(tx);
        let result = run_with_events(async { 42 }, rx, |_| {}).await;
        assert_eq!(result, 42);
    }
}
