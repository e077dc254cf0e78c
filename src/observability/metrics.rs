use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Issuance metrics
    pub issuance_requests: IntCounter,
    pub issuance_failures: IntCounterVec,
    pub issuance_duration: Histogram,

    // Secret store metrics
    pub secret_fetch_duration: HistogramVec,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    // Metric names and labels are static; construction only fails on a programming error.
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("satokenissuer".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Issuance
            issuance_requests: IntCounter::new("issuance_requests_total", "Total token issuance attempts").unwrap(),
            issuance_failures: IntCounterVec::new(Opts::new("issuance_failures_total", "Issuance failures by stage and kind"),&["stage", "kind"],).unwrap(),
            issuance_duration: Histogram::with_opts(HistogramOpts::new("issuance_duration_seconds", "Issuance duration seconds").buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5])).unwrap(),

            // Secret store
            secret_fetch_duration: HistogramVec::new(HistogramOpts::new("secret_fetch_duration_seconds", "Secret fetch duration seconds").buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),&["backend"],).unwrap(),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total","Validation errors during startup",).unwrap(),
            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.issuance_requests.clone())).unwrap();
        reg.register(Box::new(metrics.issuance_failures.clone())).unwrap();
        reg.register(Box::new(metrics.issuance_duration.clone())).unwrap();
        reg.register(Box::new(metrics.secret_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
