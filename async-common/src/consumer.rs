use async_trait::async_trait;

use crate::DynError;

/// An asynchronous message consumer, registered with an external dispatch
/// manager. The manager decodes broker payloads and routes them to the
/// consumer whose `message_kind` matches.
///
/// Implementations must be safe for concurrent invocation: the manager may
/// deliver from multiple workers with no cross-call ordering guarantee.
#[async_trait]
pub trait AsyncMessageConsumer: Send + Sync {
    /// Decoded message type this consumer accepts.
    type Message: Send + 'static;

    /// Stable identifier the dispatch manager routes on.
    fn message_kind(&self) -> &'static str;

    /// Whether this consumer expects batched delivery. Must return the same
    /// value for the lifetime of the instance: the manager reads it to pick
    /// between `consume` and `consume_batch`.
    fn batch_mode(&self) -> bool {
        false
    }

    /// Consume a single message. Only invoked when `batch_mode` is false.
    ///
    /// Returning `Err` tells the manager the message was not consumed; it
    /// will redeliver the same message until this call succeeds.
    async fn consume(&self, message: Self::Message) -> Result<(), DynError>;

    /// Consume an ordered, non-empty batch. Only invoked when `batch_mode`
    /// is true. The batch is atomic from the manager's point of view: on
    /// `Err` the whole batch is redelivered.
    ///
    /// The default implementation consumes each message in order and stops
    /// at the first failure, which is what most batch consumers want.
    async fn consume_batch(&self, messages: Vec<Self::Message>) -> Result<(), DynError> {
        for message in messages {
            self.consume(message).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingConsumer {
        consumed: AtomicUsize,
        fail_first: AtomicUsize,
    }

    #[async_trait]
    impl AsyncMessageConsumer for CountingConsumer {
        type Message = String;

        fn message_kind(&self) -> &'static str {
            "counting"
        }

        async fn consume(&self, _message: String) -> Result<(), DynError> {
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                return Err("not ready".into());
            }
            self.consumed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn batch_default_consumes_in_order_until_failure() {
        let consumer = CountingConsumer {
            consumed: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(0),
        };

        consumer
            .consume_batch(vec!["a".to_owned(), "b".to_owned()])
            .await
            .expect("batch should succeed");
        assert_eq!(consumer.consumed.load(Ordering::SeqCst), 2);

        // First element trips the failure: the batch errors and nothing
        // after it is consumed.
        let failing = CountingConsumer {
            consumed: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(1),
        };
        let result = failing
            .consume_batch(vec!["a".to_owned(), "b".to_owned()])
            .await;
        assert!(result.is_err());
        assert_eq!(failing.consumed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn batch_mode_defaults_to_single_delivery() {
        let consumer = CountingConsumer {
            consumed: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(0),
        };
        assert!(!consumer.batch_mode());
    }
}
