use async_trait::async_trait;
use serde::Serialize;

/// An asynchronous message producer: best-effort, fire-and-forget enqueue
/// towards the broker.
///
/// `send` surfaces no error to the caller. Failures are reported
/// out-of-band through the producer monitor's error counters, which the
/// periodic data collector later picks up. Implementations must be safe
/// under concurrent invocation.
#[async_trait]
pub trait AsyncMessageProducer: Send + Sync {
    /// Hand a message to the broker. `None` is a defined no-op: nothing is
    /// encoded, no counter moves, no error is raised.
    async fn send<T>(&self, message: Option<T>)
    where
        T: Serialize + Send + Sync + 'static;
}
