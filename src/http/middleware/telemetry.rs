//! Explicit before/after request instrumentation.
//!
//! # Responsibilities
//! - Open per-request telemetry before the handler runs and finalize it
//!   after the response is produced
//! - Run the configured request hooks at both edges
//!
//! # Design Decisions
//! - Instrumentation is an explicit hook list invoked around the handler,
//!   not implicit framework magic; what runs before and after a request is
//!   readable in one place
//! - The handler reaches the request-scoped telemetry through request
//!   extensions; the middleware keeps its own clone and is the one that
//!   finalizes, so the tag is attached before the response leaves and a
//!   metric sample is flushed on every path the handler can take

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

use crate::http::server::AppState;
use crate::observability::RequestTelemetry;

/// Hook invoked at the edges of every instrumented request.
pub trait RequestHook: Send + Sync {
    fn on_request(&self, method: &Method, path: &str, telemetry: &RequestTelemetry);
    fn on_response(&self, status: StatusCode, telemetry: &RequestTelemetry);
}

/// Ordered hook list shared by all requests.
pub struct RequestHooks {
    hooks: Vec<Box<dyn RequestHook>>,
}

impl RequestHooks {
    pub fn new(hooks: Vec<Box<dyn RequestHook>>) -> Self {
        Self { hooks }
    }

    /// The standard set: access logging.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(AccessLogHook)])
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RequestHook> {
        self.hooks.iter().map(|h| h.as_ref())
    }
}

/// Logs one line per request edge, carrying the request id.
pub struct AccessLogHook;

impl RequestHook for AccessLogHook {
    fn on_request(&self, method: &Method, path: &str, telemetry: &RequestTelemetry) {
        tracing::debug!(
            request_id = %telemetry.request_id(),
            method = %method,
            path,
            "Request received"
        );
    }

    fn on_response(&self, status: StatusCode, telemetry: &RequestTelemetry) {
        tracing::info!(
            request_id = %telemetry.request_id(),
            console = telemetry.classification().as_str(),
            status = status.as_u16(),
            "Request completed"
        );
    }
}

/// Axum middleware wrapping the availability route.
pub async fn instrument_request(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let telemetry = RequestTelemetry::begin(&method, &path);
    for hook in state.hooks.iter() {
        hook.on_request(&method, &path, &telemetry);
    }

    request.extensions_mut().insert(telemetry.clone());
    let span = telemetry.span().clone();
    let response = next.run(request).instrument(span).await;

    for hook in state.hooks.iter() {
        hook.on_response(response.status(), &telemetry);
    }
    telemetry.finish(response.status());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use axum::{Extension, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::domain::classify;

    struct CountingHook {
        before: Arc<AtomicUsize>,
        after: Arc<AtomicUsize>,
    }

    impl RequestHook for CountingHook {
        fn on_request(&self, _: &Method, _: &str, _: &RequestTelemetry) {
            self.before.fetch_add(1, Ordering::SeqCst);
        }

        fn on_response(&self, _: StatusCode, _: &RequestTelemetry) {
            self.after.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn tagging_handler(Extension(telemetry): Extension<RequestTelemetry>) -> &'static str {
        telemetry.tag(classify("xbox"));
        "tagged"
    }

    #[tokio::test]
    async fn test_hooks_run_on_both_edges() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let state = AppState {
            hooks: Arc::new(RequestHooks::new(vec![Box::new(CountingHook {
                before: before.clone(),
                after: after.clone(),
            })])),
        };

        let app = Router::new()
            .route("/t", get(tagging_handler))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                instrument_request,
            ))
            .with_state(state);

        let response = app
            .oneshot(Request::builder().uri("/t").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 1);
    }
}
