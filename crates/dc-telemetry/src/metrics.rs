//! Prometheus metrics.
//!
//! All metrics follow the naming convention: `dc_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Interaction toggles and removals
    pub static ref INTERACTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("dc_interactions_total", "Interaction operations by kind and action"),
        &["kind", "action"]  // action: added/removed/deleted/followed
    ).expect("metric creation failed");

    /// Report submissions
    pub static ref REPORTS: IntCounterVec = IntCounterVec::new(
        Opts::new("dc_reports_total", "Report submissions by mode and outcome"),
        &["mode", "outcome"]  // mode: generic/item, outcome: recorded/already_reported/duplicate/rate_limited
    ).expect("metric creation failed");

    /// Points award attempts that reached the store procedure
    pub static ref POINTS_AWARDS: IntCounterVec = IntCounterVec::new(
        Opts::new("dc_points_awards_total", "Points award outcomes"),
        &["outcome"]  // outcome: credited/already_awarded/failed
    ).expect("metric creation failed");

    /// Error responses returned by the HTTP surface
    pub static ref HTTP_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("dc_http_errors_total", "HTTP error responses by status code"),
        &["status"]
    ).expect("metric creation failed");

    /// Request latency by route
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "dc_http_request_duration_seconds",
            "Time spent handling HTTP requests"
        ).buckets(exponential_buckets(0.0005, 2.0, 14).expect("valid buckets")),
        &["route"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(INTERACTIONS.clone()),
        Box::new(REPORTS.clone()),
        Box::new(POINTS_AWARDS.clone()),
        Box::new(HTTP_ERRORS.clone()),
        Box::new(HTTP_REQUEST_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: prometheus::Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a timer for `route`. Observation happens on drop.
    pub fn route(route: &str) -> Self {
        Self {
            histogram: HTTP_REQUEST_DURATION.with_label_values(&[route]),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
