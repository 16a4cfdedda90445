//! In-process publish/subscribe keyed by topic name
//!
//! Each topic is a `tokio::sync::broadcast` channel created on first
//! subscription. A published payload reaches every subscriber registered at
//! that moment; late subscribers do not see earlier events. Dropping a
//! [`TopicStream`] releases its registration, and topics whose last
//! subscriber left are pruned on the next publish.

use std::collections::HashMap;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

/// Topic carrying newly created movies
pub const MOVIE_ADDED: &str = "MovieAdded";

/// Default per-topic buffer
pub const DEFAULT_CAPACITY: usize = 256;

pub struct EventBus<T> {
    topics: Mutex<HashMap<String, broadcast::Sender<T>>>,
    capacity: usize,
}

impl<T> Default for EventBus<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> EventBus<T>
where
    T: Clone + Send + 'static,
{
    /// Create a bus whose topics buffer up to `capacity` undelivered events per subscriber
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Deliver `payload` to every current subscriber of `topic`.
    ///
    /// Returns how many subscribers it reached. Never blocks on slow
    /// subscribers.
    pub fn publish(&self, topic: &str, payload: T) -> usize {
        let mut topics = self.topics.lock();
        let Some(sender) = topics.get(topic) else {
            tracing::debug!(topic, "Published event with no subscribers");
            return 0;
        };

        match sender.send(payload) {
            Ok(delivered) => delivered,
            Err(_) => {
                topics.remove(topic);
                tracing::debug!(topic, "Pruned topic with no remaining subscribers");
                0
            }
        }
    }

    /// Register a new subscriber on `topic`
    pub fn subscribe(&self, topic: &str) -> TopicStream<T> {
        let mut topics = self.topics.lock();
        let receiver = match topics.get(topic) {
            Some(sender) => sender.subscribe(),
            None => {
                let (sender, receiver) = broadcast::channel(self.capacity);
                topics.insert(topic.to_string(), sender);
                receiver
            }
        };
        tracing::debug!(topic, "Subscriber registered");

        TopicStream {
            topic: topic.to_string(),
            inner: BroadcastStream::new(receiver),
        }
    }

    /// Number of live subscribers on `topic`
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .get(topic)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Close every topic. Open streams finish after draining what they already received.
    pub fn shutdown(&self) {
        let closed = {
            let mut topics = self.topics.lock();
            let count = topics.len();
            topics.clear();
            count
        };
        tracing::info!(topics = closed, "Event bus shut down");
    }
}

/// Live sequence of events for one subscriber.
///
/// Ends only when the bus shuts down. Dropping it cancels the subscription.
pub struct TopicStream<T> {
    topic: String,
    inner: BroadcastStream<T>,
}

impl<T> Stream for TopicStream<T>
where
    T: Clone + Send + 'static,
{
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        loop {
            match ready!(Pin::new(&mut self.inner).poll_next(cx)) {
                Some(Ok(event)) => return Poll::Ready(Some(event)),
                Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                    tracing::warn!(topic = %self.topic, skipped, "Subscriber lagged, events dropped");
                }
                None => return Poll::Ready(None),
            }
        }
    }
}

impl<T> Drop for TopicStream<T> {
    fn drop(&mut self) {
        tracing::debug!(topic = %self.topic, "Subscriber released");
    }
}
