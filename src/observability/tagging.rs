//! Per-request telemetry with a correlated console tag.
//!
//! # Responsibilities
//! - Open one trace span and stage one metric sample per inbound request
//! - Attach the validated classification to both channels under the same
//!   key, so metric data points and spans can be joined on it
//! - Guarantee exactly one metric sample per request on every exit path
//!
//! # Design Decisions
//! - The tag value is always a `Classification` string. Raw request input
//!   never reaches a span field or a metric dimension, even on the fault
//!   path, which is what keeps both channels' cardinality bounded.
//! - The handle is cheap to clone (shared inner) but each request's handle
//!   is only ever touched by its own handling task.
//! - A request that is dropped without being finalized (panic, abort)
//!   still records a sample, under the `aborted` status, so telemetry
//!   never silently loses a request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::http::{Method, StatusCode};
use metrics::{counter, histogram};
use tracing::Span;
use uuid::Uuid;

use crate::domain::Classification;
use crate::observability::metrics::{REQUEST_COUNTER, REQUEST_DURATION};

/// Tag key shared by the metric dimension and the span field.
///
/// Must stay in sync with the `console` field declared on the request span
/// in [`RequestTelemetry::begin`].
pub const CONSOLE_TAG: &str = "console";

/// Status label recorded for requests that never reached finalization.
pub const ABORTED_STATUS: &str = "aborted";

/// Request-scoped telemetry context: one span plus one pending metric
/// sample, finalized together.
#[derive(Clone)]
pub struct RequestTelemetry {
    inner: Arc<Inner>,
}

struct Inner {
    span: Span,
    start: Instant,
    request_id: Uuid,
    classification: OnceLock<Classification>,
    finished: AtomicBool,
}

impl RequestTelemetry {
    /// Open telemetry for one inbound request.
    ///
    /// The span carries an empty `console` field that [`tag`](Self::tag)
    /// fills in once the input has been classified.
    pub fn begin(method: &Method, path: &str) -> Self {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path,
            console = tracing::field::Empty,
        );
        Self {
            inner: Arc::new(Inner {
                span,
                start: Instant::now(),
                request_id,
                classification: OnceLock::new(),
                finished: AtomicBool::new(false),
            }),
        }
    }

    /// Attach the classification to both telemetry channels.
    ///
    /// Records the value on the span immediately and stages it for the
    /// metric sample written by [`finish`](Self::finish). First write wins;
    /// the handler calls this exactly once per request.
    pub fn tag(&self, classification: Classification) {
        if self.inner.classification.set(classification).is_ok() {
            self.inner.span.record(CONSOLE_TAG, classification.as_str());
        } else {
            tracing::warn!(
                request_id = %self.inner.request_id,
                attempted = classification.as_str(),
                "Request already tagged, keeping first classification"
            );
        }
    }

    /// The classification both channels carry. Untagged requests report the
    /// sentinel, never nothing.
    pub fn classification(&self) -> Classification {
        self.inner
            .classification
            .get()
            .copied()
            .unwrap_or(Classification::Unknown)
    }

    /// The request span, for instrumenting the handler future.
    pub fn span(&self) -> &Span {
        &self.inner.span
    }

    pub fn request_id(&self) -> Uuid {
        self.inner.request_id
    }

    /// Finalize the request: flush the metric sample with the staged tag
    /// and the response status. Idempotent; only the first call records.
    pub fn finish(&self, status: StatusCode) {
        if self.inner.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        record_sample(
            self.classification(),
            status.as_u16().to_string(),
            self.inner.start.elapsed().as_secs_f64(),
        );
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if !*self.finished.get_mut() {
            let classification = self
                .classification
                .get()
                .copied()
                .unwrap_or(Classification::Unknown);
            record_sample(
                classification,
                ABORTED_STATUS.to_string(),
                self.start.elapsed().as_secs_f64(),
            );
        }
    }
}

fn record_sample(classification: Classification, status: String, elapsed_secs: f64) {
    counter!(
        REQUEST_COUNTER,
        CONSOLE_TAG => classification.as_str(),
        "status" => status
    )
    .increment(1);
    histogram!(REQUEST_DURATION, CONSOLE_TAG => classification.as_str()).record(elapsed_secs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify;
    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;

    /// Captures the (series, labels) of every registered metric.
    #[derive(Default)]
    struct CaptureRecorder {
        seen: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl CaptureRecorder {
        fn capture(&self, key: &Key) {
            let labels = key
                .labels()
                .map(|l| (l.key().to_string(), l.value().to_string()))
                .collect();
            self.seen
                .lock()
                .unwrap()
                .push((key.name().to_string(), labels));
        }

        fn label_of(&self, series: &str, label_key: &str) -> Option<String> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .find(|(name, _)| name == series)
                .and_then(|(_, labels)| {
                    labels
                        .iter()
                        .find(|(k, _)| k == label_key)
                        .map(|(_, v)| v.clone())
                })
        }
    }

    impl Recorder for CaptureRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.capture(key);
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.capture(key);
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.capture(key);
            Histogram::noop()
        }
    }

    #[test]
    fn test_metric_dimension_matches_span_tag_value() {
        let recorder = CaptureRecorder::default();
        let telemetry = RequestTelemetry::begin(&Method::GET, "/availability/ps5");
        telemetry.tag(classify("ps5"));

        metrics::with_local_recorder(&recorder, || {
            telemetry.finish(StatusCode::INTERNAL_SERVER_ERROR)
        });

        // Both channels read the same staged classification, under the
        // same key.
        assert_eq!(telemetry.classification().as_str(), "ps5");
        assert_eq!(
            recorder.label_of(REQUEST_COUNTER, CONSOLE_TAG).as_deref(),
            Some("ps5")
        );
        assert_eq!(
            recorder.label_of(REQUEST_COUNTER, "status").as_deref(),
            Some("500")
        );
        assert_eq!(
            recorder.label_of(REQUEST_DURATION, CONSOLE_TAG).as_deref(),
            Some("ps5")
        );
    }

    #[test]
    fn test_unknown_input_never_leaks_into_the_tag() {
        let recorder = CaptureRecorder::default();
        let telemetry = RequestTelemetry::begin(&Method::GET, "/availability/dreamcast");
        telemetry.tag(classify("dreamcast"));

        metrics::with_local_recorder(&recorder, || {
            telemetry.finish(StatusCode::BAD_REQUEST)
        });

        assert_eq!(
            recorder.label_of(REQUEST_COUNTER, CONSOLE_TAG).as_deref(),
            Some("UNKNOWN")
        );
    }

    #[test]
    fn test_first_tag_wins() {
        let telemetry = RequestTelemetry::begin(&Method::GET, "/availability/xbox");
        telemetry.tag(classify("xbox"));
        telemetry.tag(classify("ps5"));
        assert_eq!(telemetry.classification().as_str(), "xbox");
    }

    #[test]
    fn test_finish_records_exactly_once() {
        let recorder = CaptureRecorder::default();
        let telemetry = RequestTelemetry::begin(&Method::GET, "/availability/xbox");
        telemetry.tag(classify("xbox"));

        metrics::with_local_recorder(&recorder, || {
            telemetry.finish(StatusCode::OK);
            telemetry.finish(StatusCode::OK);
            drop(telemetry);
        });

        let count = recorder
            .seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == REQUEST_COUNTER)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_dropped_request_still_records_a_sample() {
        let recorder = CaptureRecorder::default();

        metrics::with_local_recorder(&recorder, || {
            let telemetry = RequestTelemetry::begin(&Method::GET, "/availability/switch");
            telemetry.tag(classify("switch"));
            drop(telemetry);
        });

        assert_eq!(
            recorder.label_of(REQUEST_COUNTER, CONSOLE_TAG).as_deref(),
            Some("switch")
        );
        assert_eq!(
            recorder.label_of(REQUEST_COUNTER, "status").as_deref(),
            Some(ABORTED_STATUS)
        );
    }
}
