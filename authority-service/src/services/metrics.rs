use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static PROMETHEUS: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if PROMETHEUS.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = PROMETHEUS.set(handle);
        }
        Err(e) => {
            tracing::error!("Failed to install Prometheus recorder: {}", e);
        }
    }
}

pub fn get_metrics() -> String {
    match PROMETHEUS.get() {
        Some(handle) => handle.render(),
        None => {
            tracing::error!("Metrics recorder not initialized");
            "# Metrics recorder not initialized\n".to_string()
        }
    }
}
