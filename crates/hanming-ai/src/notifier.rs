use hanming_core::{CompositeAnalysis, HanmingError};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Message shown in the error panel when a top-level action cannot proceed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFacingError {
    pub title: String,
    pub message: String,
    pub suggestions: Vec<String>,
}

impl UserFacingError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            title: "分析错误 Analysis Error".to_string(),
            message: message.into(),
            suggestions: vec![
                "重新输入名字 Retry with a different name".to_string(),
                "检查输入格式 Check input format".to_string(),
                "联系技术支持 Contact technical support".to_string(),
            ],
        }
    }
}

impl From<&HanmingError> for UserFacingError {
    fn from(error: &HanmingError) -> Self {
        match error {
            HanmingError::InvalidInput(message) => Self::invalid_input(message.clone()),
            other => Self::invalid_input(other.to_string()),
        }
    }
}

/// Events published to every interested panel
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    /// A comprehensive analysis finished and became current
    Completed {
        generation: u64,
        analysis: Arc<CompositeAnalysis>,
    },
    /// A top-level action could not proceed
    Error(UserFacingError),
}

/// Typed callback for panels that prefer push delivery over a receiver
pub trait AnalysisSubscriber: Send + Sync {
    fn on_event(&self, event: &AnalysisEvent);
}

/// Fan-out of analysis events to broadcast receivers and registered subscribers.
#[derive(Clone)]
pub struct AnalysisNotifier {
    tx: broadcast::Sender<AnalysisEvent>,
    subscribers: Arc<RwLock<Vec<Arc<dyn AnalysisSubscriber>>>>,
}

impl AnalysisNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to the broadcast of analysis events.
    pub fn subscribe(&self) -> broadcast::Receiver<AnalysisEvent> {
        self.tx.subscribe()
    }

    pub fn register(&self, subscriber: Arc<dyn AnalysisSubscriber>) {
        self.subscribers.write().push(subscriber);
    }

    pub fn publish(&self, event: AnalysisEvent) {
        for subscriber in self.subscribers.read().iter() {
            subscriber.on_event(&event);
        }

        // No receivers is not an error
        if self.tx.send(event).is_err() {
            debug!("No broadcast receivers for analysis event");
        }
    }
}

impl Default for AnalysisNotifier {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl AnalysisSubscriber for Counter {
        fn on_event(&self, _event: &AnalysisEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_events_reach_receivers_and_subscribers() {
        let notifier = AnalysisNotifier::new(4);
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        notifier.register(counter.clone());
        let mut rx = notifier.subscribe();

        notifier.publish(AnalysisEvent::Error(UserFacingError::invalid_input("empty")));

        match rx.recv().await.expect("should receive event") {
            AnalysisEvent::Error(err) => {
                assert_eq!(err.message, "empty");
                assert_eq!(err.suggestions.len(), 3);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_input_keeps_message() {
        let err = UserFacingError::from(&HanmingError::InvalidInput("请输入名字".to_string()));
        assert_eq!(err.message, "请输入名字");
        assert_eq!(err.title, "分析错误 Analysis Error");
    }

    #[test]
    fn test_publish_without_receivers_is_silent() {
        AnalysisNotifier::default().publish(AnalysisEvent::Error(UserFacingError::invalid_input("x")));
    }
}
