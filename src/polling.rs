//! Background polling of the viewer's unread message count.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Where unread counts come from
#[async_trait]
pub trait UnreadCountSource: Send + Sync {
    async fn unread_count(&self, viewer_id: &str) -> Result<u32>;
}

/// Polls an `UnreadCountSource` on a fixed interval while a viewer is
/// logged in. The task is aborted by `stop` or when the poller is dropped.
pub struct UnreadPoller {
    handle: JoinHandle<()>,
    counts: watch::Receiver<u32>,
}

impl UnreadPoller {
    /// Start polling for `viewer_id`. Returns `None` for an anonymous viewer.
    pub fn start(
        source: Arc<dyn UnreadCountSource>,
        viewer_id: Option<String>,
        every: Duration,
    ) -> Option<Self> {
        let viewer_id = viewer_id.filter(|id| !id.trim().is_empty())?;
        let (tx, counts) = watch::channel(0);

        info!("Polling unread messages for {} every {:?}", viewer_id, every);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match source.unread_count(&viewer_id).await {
                    Ok(count) => {
                        debug!("Unread count for {}: {}", viewer_id, count);
                        tx.send_replace(count);
                    }
                    Err(e) => warn!("Unread count poll failed: {:#}", e),
                }
            }
        });

        Some(Self { handle, counts })
    }

    /// Latest count seen, 0 before the first successful poll
    pub fn latest(&self) -> u32 {
        *self.counts.borrow()
    }

    /// Receiver that is notified whenever a new count arrives
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.counts.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop polling (logout)
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for UnreadPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl UnreadCountSource for CountingSource {
        async fn unread_count(&self, _viewer_id: &str) -> Result<u32> {
            Ok(self.calls.fetch_add(1, Ordering::SeqCst) as u32 + 1)
        }
    }

    fn source() -> Arc<CountingSource> {
        Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_start_for_anonymous_viewer() {
        let src = source();
        assert!(UnreadPoller::start(src.clone(), None, Duration::from_secs(30)).is_none());
        assert!(UnreadPoller::start(src.clone(), Some("  ".into()), Duration::from_secs(30)).is_none());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(src.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_stopped() {
        let src = source();
        let poller = UnreadPoller::start(src.clone(), Some("u1".into()), Duration::from_secs(30))
            .expect("logged in viewer starts polling");

        tokio::time::sleep(Duration::from_secs(65)).await;
        let polled = src.calls.load(Ordering::SeqCst);
        assert!(polled >= 2, "polled {polled} times");
        assert!(poller.is_running());
        assert!(poller.latest() >= 2);

        poller.stop();
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(src.calls.load(Ordering::SeqCst), polled);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_poller_stops_the_timer() {
        let src = source();
        {
            let _poller =
                UnreadPoller::start(src.clone(), Some("u1".into()), Duration::from_secs(10));
            tokio::time::sleep(Duration::from_secs(25)).await;
        }
        let polled = src.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(src.calls.load(Ordering::SeqCst), polled);
        // the task held the only other reference
        assert_eq!(Arc::strong_count(&src), 1);
    }
}
