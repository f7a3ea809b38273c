//! Metrics exposition and series names.
//!
//! # Responsibilities
//! - Install the Prometheus exporter with its scrape listener
//! - Name every series the crate records, in one place
//! - Stamp process identity (app/instance) onto every sample
//!
//! # Metrics
//! - `availability_requests_total` (counter): requests by console, status
//! - `availability_request_duration_seconds` (histogram): latency by console
//! - `driver_results_total` (counter): driver results by console, outcome
//! - `driver_in_flight` (gauge): outstanding driver requests by console
//!
//! # Design Decisions
//! - The `console` dimension only ever carries a `Classification` string,
//!   so series cardinality stays bounded by the closed console set
//! - `app`/`instance` are global labels; service and driver configure the
//!   same app name so their telemetry groups together

use std::net::SocketAddr;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::observability::tagging::CONSOLE_TAG;

/// Requests served, dimensioned by console classification and status code.
pub const REQUEST_COUNTER: &str = "availability_requests_total";

/// Request latency, dimensioned by console classification.
pub const REQUEST_DURATION: &str = "availability_request_duration_seconds";

/// Driver-side results, dimensioned by console and `ok`/`fallback` outcome.
pub const DRIVER_RESULTS_COUNTER: &str = "driver_results_total";

/// Driver-side outstanding requests, dimensioned by console.
pub const DRIVER_IN_FLIGHT_GAUGE: &str = "driver_in_flight";

/// Install the Prometheus exporter listening on `addr`.
///
/// Failure to install is logged but not fatal: the process keeps serving,
/// it just has no scrape endpoint.
pub fn init_metrics(addr: SocketAddr, app_name: &str, instance_id: &str) {
    let result = PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("app", app_name)
        .add_global_label("instance", instance_id)
        .install();

    match result {
        Ok(()) => {
            describe_series();
            tracing::info!(address = %addr, app = app_name, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter");
        }
    }
}

fn describe_series() {
    describe_counter!(
        REQUEST_COUNTER,
        Unit::Count,
        format!("Availability queries served, by `{CONSOLE_TAG}` and `status`")
    );
    describe_histogram!(
        REQUEST_DURATION,
        Unit::Seconds,
        format!("Availability query latency, by `{CONSOLE_TAG}`")
    );
    describe_counter!(
        DRIVER_RESULTS_COUNTER,
        Unit::Count,
        format!("Load driver results, by `{CONSOLE_TAG}` and `outcome`")
    );
    describe_gauge!(
        DRIVER_IN_FLIGHT_GAUGE,
        Unit::Count,
        format!("Load driver requests currently outstanding, by `{CONSOLE_TAG}`")
    );
}
