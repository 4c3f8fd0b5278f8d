use tracing::debug;

use crate::collector::DataCollector;

/// Drive a collector forever, polling it once per `period()` and
/// publishing every delta as a gauge on the installed metrics recorder.
///
/// Spawn one task per collector; the single task is what guarantees polls
/// never overlap.
pub async fn report_loop<C: DataCollector>(mut collector: C) {
    let mut interval = tokio::time::interval(collector.period());

    loop {
        interval.tick().await;
        report_once(&mut collector);
    }
}

fn report_once(collector: &mut dyn DataCollector) {
    let points = collector.collect();
    debug!(
        "collected {} data points from {}_{}",
        points.len(),
        collector.module_name(),
        collector.collector_name()
    );
    for point in points {
        metrics::gauge!(point.name).set(point.value as f64);
    }
}
