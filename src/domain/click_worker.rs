//! Background worker applying click increments to the link store.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{Counter, LinkRepository};

/// Queues a click without waiting for the store.
///
/// When the channel is full the send is moved onto a spawned task that waits
/// for capacity, so a burst of redirects is never slowed down and no click is
/// dropped. A closed channel means the worker is gone; the click is lost and
/// logged.
pub fn dispatch_click(sender: &mpsc::Sender<ClickEvent>, event: ClickEvent) {
    match sender.try_send(event) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(event)) => {
            debug!(code = %event.code, "Click queue full, deferring send");
            let sender = sender.clone();
            tokio::spawn(async move {
                if let Err(e) = sender.send(event).await {
                    warn!(code = %e.0.code, "Click worker stopped, click discarded");
                    metrics::counter!("click_failures_total").increment(1);
                }
            });
        }
        Err(mpsc::error::TrySendError::Closed(event)) => {
            warn!(code = %event.code, "Click worker stopped, click discarded");
            metrics::counter!("click_failures_total").increment(1);
        }
    }
}

/// Consumes click events and bumps each link's counter.
///
/// At most `concurrency` increments are in flight at once. The loop ends
/// when every sender has been dropped; in-flight increments are awaited
/// before returning, so a graceful shutdown drains the queue.
///
/// Failed increments are logged and not retried: a retry could double-count
/// a write whose acknowledgement was lost.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn LinkRepository>,
    concurrency: usize,
) {
    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = limiter.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tasks.spawn(async move {
            let _permit = permit;
            record_click(repository.as_ref(), event).await;
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}

    info!("Click worker stopped");
}

async fn record_click(repository: &dyn LinkRepository, event: ClickEvent) {
    match repository.increment(&event.code, Counter::Clicks, 1).await {
        Ok(()) => {
            debug!(code = %event.code, "Click recorded");
            metrics::counter!("clicks_recorded_total").increment(1);
        }
        Err(e) => {
            error!(code = %event.code, error = %e, "Failed to record click");
            metrics::counter!("click_failures_total").increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkRepository, StoreError};

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment()
            .withf(|code, counter, delta| code == "abc123" && *counter == Counter::Clicks && *delta == 1)
            .times(3)
            .returning(|_, _, _| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo), 2));

        for _ in 0..3 {
            dispatch_click(&tx, ClickEvent::new("abc123"));
        }
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_store_failure() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment()
            .withf(|code, _, _| code == "broken")
            .times(1)
            .returning(|_, _, _| Err(StoreError::Unavailable("timeout".to_string())));
        mock_repo
            .expect_increment()
            .withf(|code, _, _| code == "fine")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo), 1));

        dispatch_click(&tx, ClickEvent::new("broken"));
        dispatch_click(&tx, ClickEvent::new("fine"));
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_defers_when_queue_full() {
        let (tx, mut rx) = mpsc::channel(1);

        dispatch_click(&tx, ClickEvent::new("first"));
        dispatch_click(&tx, ClickEvent::new("second"));
        drop(tx);

        assert_eq!(rx.recv().await.unwrap().code, "first");
        assert_eq!(rx.recv().await.unwrap().code, "second");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_to_closed_queue_does_not_panic() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        dispatch_click(&tx, ClickEvent::new("lost"));
    }
}
