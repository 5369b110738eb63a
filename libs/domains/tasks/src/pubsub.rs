//! In-process publish/subscribe.
//!
//! Listeners are plain callbacks registered per topic. A callback returning
//! `false` is treated as closed and removed on the next publish. Callbacks run
//! without the registry lock held, so they may use the bus themselves.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Topic carrying every successfully updated task
pub const TASK_UPDATED: &str = "TASK_UPDATED";

pub type Listener<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Stream handed to a subscriber
pub type EventStream<E> = UnboundedReceiverStream<E>;

pub struct PubSub<E> {
    topics: Arc<RwLock<HashMap<String, Vec<Listener<E>>>>>,
}

impl<E> Clone for PubSub<E> {
    fn clone(&self) -> Self {
        Self {
            topics: Arc::clone(&self.topics),
        }
    }
}

impl<E> Default for PubSub<E> {
    fn default() -> Self {
        Self {
            topics: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<E: Clone + Send + 'static> PubSub<E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn topics_read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<Listener<E>>>> {
        self.topics.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn topics_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<Listener<E>>>> {
        self.topics.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn listen<F>(&self, topic: &str, listener: F)
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.topics_mut()
            .entry(topic.to_string())
            .or_default()
            .push(Arc::new(listener));
    }

    /// Deliver `event` to every live listener of `topic`.
    ///
    /// Returns how many listeners accepted it.
    pub fn publish(&self, topic: &str, event: &E) -> usize {
        let listeners: Vec<Listener<E>> = match self.topics_read().get(topic) {
            Some(listeners) => listeners.clone(),
            None => return 0,
        };

        let closed: Vec<Listener<E>> = listeners
            .iter()
            .filter(|listener| !listener(event))
            .cloned()
            .collect();
        let delivered = listeners.len() - closed.len();

        if !closed.is_empty() {
            if let Some(current) = self.topics_mut().get_mut(topic) {
                current.retain(|listener| !closed.iter().any(|c| Arc::ptr_eq(c, listener)));
            }
            tracing::debug!(topic, dropped = closed.len(), "Removed closed listeners");
        }
        delivered
    }

    /// Stream of every event published to `topic` from now on.
    pub fn subscribe(&self, topic: &str) -> EventStream<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listen(topic, move |event: &E| tx.send(event.clone()).is_ok());
        UnboundedReceiverStream::new(rx)
    }

    pub fn listener_count(&self, topic: &str) -> usize {
        self.topics_read().get(topic).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let bus = PubSub::<u32>::new();
        let mut stream = bus.subscribe(TASK_UPDATED);

        assert_eq!(bus.publish(TASK_UPDATED, &1), 1);
        assert_eq!(bus.publish(TASK_UPDATED, &2), 1);

        assert_eq!(stream.next().await, Some(1));
        assert_eq!(stream.next().await, Some(2));
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = PubSub::<u32>::new();
        bus.publish(TASK_UPDATED, &1);

        let mut stream = bus.subscribe(TASK_UPDATED);
        bus.publish(TASK_UPDATED, &2);

        assert_eq!(stream.next().await, Some(2));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let bus = PubSub::<u32>::new();
        let kept = bus.subscribe(TASK_UPDATED);
        drop(bus.subscribe(TASK_UPDATED));
        assert_eq!(bus.listener_count(TASK_UPDATED), 2);

        assert_eq!(bus.publish(TASK_UPDATED, &7), 1);
        assert_eq!(bus.listener_count(TASK_UPDATED), 1);
        drop(kept);
    }

    #[tokio::test]
    async fn test_every_subscriber_gets_every_event() {
        let bus = PubSub::<u32>::new();
        let mut first = bus.subscribe(TASK_UPDATED);
        let mut second = bus.subscribe(TASK_UPDATED);

        assert_eq!(bus.publish(TASK_UPDATED, &1), 2);
        assert_eq!(bus.publish(TASK_UPDATED, &2), 2);

        assert_eq!(first.next().await, Some(1));
        assert_eq!(first.next().await, Some(2));
        assert_eq!(second.next().await, Some(1));
        assert_eq!(second.next().await, Some(2));
    }

    #[test]
    fn test_listener_may_use_the_bus_during_publish() {
        let bus = PubSub::<u32>::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let inner = bus.clone();
        let counter = Arc::clone(&seen);
        bus.listen(TASK_UPDATED, move |event| {
            counter.store(inner.listener_count(TASK_UPDATED), Ordering::SeqCst);
            inner.publish("ECHO", event);
            inner.listen("LATE", |_: &u32| true);
            true
        });

        assert_eq!(bus.publish(TASK_UPDATED, &3), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count("LATE"), 1);
    }

    #[test]
    fn test_topics_are_isolated() {
        let bus = PubSub::<u32>::new();
        let _other = bus.subscribe("OTHER");

        assert_eq!(bus.publish(TASK_UPDATED, &1), 0);
        assert_eq!(bus.listener_count("OTHER"), 1);
    }
}
