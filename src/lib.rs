pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod models;

/// Shared handler state. The pool is built once in `main` and injected here.
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
