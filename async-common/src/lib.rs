pub mod consumer;
pub mod producer;
pub mod transcoder;

/// Error type implementers of the messaging contracts surface to their
/// caller. The dispatch manager only cares that a call failed, not how.
pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
