use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("refresh_cycles_total").absolute(0);
    counter!("refresh_failures_total").absolute(0);
    counter!("events_detected_total").absolute(0);
    counter!("change_notifications_total").absolute(0);
    counter!("change_notifications_discarded_total").absolute(0);

    gauge!("leaderboard_sellers").set(0.0);
    gauge!("notification_queue_depth").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("refresh_latency_seconds").record(0.0);

    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally.
/// Renders an empty payload; used where no exporter is wanted.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
