use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, RwLock};

/// Process-wide cumulative counters for producer send outcomes, mutated by
/// the producer implementation on every attempt and read back by the
/// periodic data collector.
///
/// Counters only ever go up; the collector turns them into per-interval
/// deltas.
#[derive(Default)]
pub struct ProducerMonitor {
    total_success: AtomicU64,
    total_error: AtomicU64,
    success_by_kind: RwLock<HashMap<String, u64>>,
    error_by_kind: RwLock<HashMap<String, u64>>,
}

impl ProducerMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide monitor. Producers and collectors that do
    /// not need an isolated instance should use this one.
    pub fn global() -> &'static ProducerMonitor {
        static GLOBAL: OnceLock<ProducerMonitor> = OnceLock::new();
        GLOBAL.get_or_init(ProducerMonitor::new)
    }

    /// Record one successfully sent message of the given kind.
    pub fn record_success(&self, kind: &str) {
        self.total_success.fetch_add(1, Ordering::Relaxed);
        bump(&self.success_by_kind, kind);
    }

    /// Record one failed send of the given kind.
    pub fn record_error(&self, kind: &str) {
        self.total_error.fetch_add(1, Ordering::Relaxed);
        bump(&self.error_by_kind, kind);
    }

    pub fn total_success_count(&self) -> u64 {
        self.total_success.load(Ordering::Relaxed)
    }

    pub fn total_error_count(&self) -> u64 {
        self.total_error.load(Ordering::Relaxed)
    }

    /// Cumulative success count for one message kind, 0 if never recorded.
    pub fn success_count(&self, kind: &str) -> u64 {
        read(&self.success_by_kind, kind)
    }

    /// Cumulative error count for one message kind, 0 if never recorded.
    pub fn error_count(&self, kind: &str) -> u64 {
        read(&self.error_by_kind, kind)
    }
}

fn bump(map: &RwLock<HashMap<String, u64>>, kind: &str) {
    let mut counters = map.write().unwrap();
    *counters.entry(kind.to_owned()).or_insert(0) += 1;
}

fn read(map: &RwLock<HashMap<String, u64>>, kind: &str) -> u64 {
    map.read().unwrap().get(kind).copied().unwrap_or(0)
}
