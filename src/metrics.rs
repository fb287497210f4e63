use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and pre-register the ledger
/// metrics so they show up before the first write.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

fn register_metrics() {
    counter!("base_positions_created_total").absolute(0);
    counter!("base_positions_deleted_total").absolute(0);
    counter!("option_legs_written_total").absolute(0);
    counter!("stock_legs_written_total").absolute(0);

    gauge!("open_positions").set(0.0);
}
