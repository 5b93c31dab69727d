use super::AnalyticsEvent;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// The write-side collaborator an [`super::AnalyticsWriter`] drains into.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn write(&self, event: AnalyticsEvent) -> anyhow::Result<()>;
}

/// Discards every event. Used when analytics has no configured destination.
pub struct NullAnalyticsSink;

#[async_trait]
impl AnalyticsSink for NullAnalyticsSink {
    async fn write(&self, _event: AnalyticsEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Test probe: captures events on an internal channel for assertions.
pub struct ChannelAnalyticsSink {
    sender: tokio::sync::mpsc::Sender<AnalyticsEvent>,
    receiver: Mutex<tokio::sync::mpsc::Receiver<AnalyticsEvent>>,
}

impl ChannelAnalyticsSink {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = tokio::sync::mpsc::channel(capacity);
        Self {
            sender,
            receiver: Mutex::new(receiver),
        }
    }

    pub async fn recv(&self) -> Option<AnalyticsEvent> {
        self.receiver.lock().await.recv().await
    }
}

#[async_trait]
impl AnalyticsSink for ChannelAnalyticsSink {
    async fn write(&self, event: AnalyticsEvent) -> anyhow::Result<()> {
        self.sender.send(event).await.ok();
        Ok(())
    }
}
