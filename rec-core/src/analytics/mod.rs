//! Analytics Writer (C14, §4.14).
//!
//! Fire-and-forget, append-only event emission backed by a bounded worker
//! pool: `try_send` never blocks the caller, and an overflowing queue drops
//! the event and counts it rather than applying backpressure to the request
//! path. Generalized from the pattern-extraction background queue shape
//! (worker pool draining a bounded mpsc channel).

mod sink;

pub use sink::{AnalyticsSink, ChannelAnalyticsSink, NullAnalyticsSink};

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

/// One of the four event families named in §4.14.
#[derive(Debug, Clone)]
pub enum AnalyticsEvent {
    SessionCreated {
        session_id: Uuid,
        domain: crate::types::Domain,
        at: DateTime<Utc>,
    },
    EmbeddingComputed {
        session_id: Uuid,
        cache_hit: bool,
        at: DateTime<Utc>,
    },
    ResultProduced {
        session_id: Uuid,
        item_count: usize,
        degraded: bool,
        at: DateTime<Utc>,
    },
    RefinementApplied {
        session_id: Uuid,
        strategy: crate::types::RefinementStrategy,
        at: DateTime<Utc>,
    },
}

/// A bounded worker pool draining analytics events into an [`AnalyticsSink`].
pub struct AnalyticsWriter {
    sender: mpsc::Sender<AnalyticsEvent>,
    dropped: Arc<AtomicU64>,
    _workers: Vec<JoinHandle<()>>,
}

impl AnalyticsWriter {
    #[must_use]
    pub fn new(sink: Arc<dyn AnalyticsSink>, worker_count: usize, max_queue_size: usize) -> Self {
        let (sender, receiver) = mpsc::channel(max_queue_size);
        let receiver = Arc::new(tokio::sync::Mutex::new(receiver));
        let dropped = Arc::new(AtomicU64::new(0));

        let workers = (0..worker_count.max(1))
            .map(|worker_id| {
                let receiver = receiver.clone();
                let sink = sink.clone();
                tokio::spawn(async move {
                    loop {
                        let event = {
                            let mut receiver = receiver.lock().await;
                            receiver.recv().await
                        };
                        match event {
                            Some(event) => {
                                if let Err(error) = sink.write(event).await {
                                    warn!(worker_id, %error, "analytics sink write failed");
                                }
                            }
                            None => break,
                        }
                    }
                })
            })
            .collect();

        Self {
            sender,
            dropped,
            _workers: workers,
        }
    }

    /// Enqueue an event, never blocking the caller. On a full queue the
    /// event is dropped and counted (§9 Design Note 4).
    pub fn emit(&self, event: AnalyticsEvent) {
        if let Err(mpsc::error::TrySendError::Full(_)) = self.sender.try_send(event) {
            let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(total_dropped = total, "analytics queue full, dropping event");
        }
    }

    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_the_sink() {
        let sink = Arc::new(ChannelAnalyticsSink::new(10));
        let writer = AnalyticsWriter::new(sink.clone(), 1, 10);
        writer.emit(AnalyticsEvent::SessionCreated {
            session_id: Uuid::new_v4(),
            domain: crate::types::Domain::Movies,
            at: Utc::now(),
        });
        let received = sink.recv().await;
        assert!(received.is_some());
    }

    #[tokio::test]
    async fn overflowing_queue_drops_and_counts_rather_than_blocking() {
        let sink = Arc::new(NullAnalyticsSink);
        // Zero workers draining: every emit past capacity 1 drops immediately.
        let (sender, _receiver) = mpsc::channel(1);
        let writer = AnalyticsWriter {
            sender,
            dropped: Arc::new(AtomicU64::new(0)),
            _workers: vec![],
        };
        let _ = sink;
        writer.emit(AnalyticsEvent::EmbeddingComputed {
            session_id: Uuid::new_v4(),
            cache_hit: true,
            at: Utc::now(),
        });
        writer.emit(AnalyticsEvent::EmbeddingComputed {
            session_id: Uuid::new_v4(),
            cache_hit: true,
            at: Utc::now(),
        });
        assert_eq!(writer.dropped_count(), 1);
    }
}
