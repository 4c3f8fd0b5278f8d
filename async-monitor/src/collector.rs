use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::producer_monitor::ProducerMonitor;

/// One named delta record emitted by a poll: activity within a single
/// polling interval, derived from two successive cumulative readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPoint {
    pub name: String,
    pub value: i64,
}

/// A periodic differential-metrics collector. An external scheduler (see
/// `reporter::report_loop`) calls `collect` once per `period`.
///
/// `collect` takes `&mut self`: the last-seen delta state has a single
/// writer, so concurrent polls are ruled out by the receiver rather than
/// by a lock.
pub trait DataCollector: Send {
    fn module_name(&self) -> &'static str;

    fn collector_name(&self) -> &'static str;

    /// Interval the scheduler should honor between polls.
    fn period(&self) -> Duration;

    fn collect(&mut self) -> Vec<DataPoint>;

    /// Build a data point named `<module>_<collector><suffix>`.
    fn data_point(&self, suffix: &str, value: i64) -> DataPoint {
        DataPoint {
            name: format!("{}_{}{}", self.module_name(), self.collector_name(), suffix),
            value,
        }
    }
}

/// Collector for producer send outcomes. Each poll reports the number of
/// successful and failed sends since the previous poll, overall and per
/// configured message kind:
///
/// - `naiveasync_producer_success` / `naiveasync_producer_error`
/// - `naiveasync_producer_<metric>_success` / `..._error` for every entry
///   of the message-kind map
///
/// A cumulative counter decreasing between polls (monitor restarted while
/// the collector survived) yields a negative delta. That is deliberate:
/// downstream consumers may already compensate, so it is not clamped here.
pub struct ProducerDataCollector {
    monitor: Arc<ProducerMonitor>,
    message_kinds: HashMap<String, String>,
    last_total_success: u64,
    last_total_error: u64,
    last_success_by_kind: HashMap<String, u64>,
    last_error_by_kind: HashMap<String, u64>,
}

impl ProducerDataCollector {
    pub fn new(monitor: Arc<ProducerMonitor>) -> Self {
        Self::with_message_kinds(monitor, HashMap::new())
    }

    /// Additionally report per-kind deltas for every entry of
    /// `message_kinds`, mapping message kind to the metric name used in
    /// the data point suffix. The map is read-only after construction.
    pub fn with_message_kinds(
        monitor: Arc<ProducerMonitor>,
        message_kinds: HashMap<String, String>,
    ) -> Self {
        Self {
            monitor,
            message_kinds,
            last_total_success: 0,
            last_total_error: 0,
            last_success_by_kind: HashMap::new(),
            last_error_by_kind: HashMap::new(),
        }
    }
}

impl DataCollector for ProducerDataCollector {
    fn module_name(&self) -> &'static str {
        "naiveasync"
    }

    fn collector_name(&self) -> &'static str {
        "producer"
    }

    fn period(&self) -> Duration {
        Duration::from_secs(30)
    }

    fn collect(&mut self) -> Vec<DataPoint> {
        let mut points = Vec::with_capacity(2 + 2 * self.message_kinds.len());

        let total_success = self.monitor.total_success_count();
        points.push(self.data_point("_success", delta(total_success, self.last_total_success)));
        self.last_total_success = total_success;

        let total_error = self.monitor.total_error_count();
        points.push(self.data_point("_error", delta(total_error, self.last_total_error)));
        self.last_total_error = total_error;

        for (kind, metric) in &self.message_kinds {
            let success = self.monitor.success_count(kind);
            let last = self.last_success_by_kind.get(kind).copied().unwrap_or(0);
            points.push(self.data_point(&format!("_{metric}_success"), delta(success, last)));

            let error = self.monitor.error_count(kind);
            let last_error = self.last_error_by_kind.get(kind).copied().unwrap_or(0);
            points.push(self.data_point(&format!("_{metric}_error"), delta(error, last_error)));

            self.last_success_by_kind.insert(kind.clone(), success);
            self.last_error_by_kind.insert(kind.clone(), error);
        }

        points
    }
}

fn delta(current: u64, last: u64) -> i64 {
    current as i64 - last as i64
}
