//! Driver run loop.
//!
//! # Responsibilities
//! - Spawn one repeating task per scheduled console
//! - Issue queries at the configured interval without waiting for earlier
//!   ones, bounded per console by a semaphore
//! - Funnel every result through the results channel to the observer
//!
//! # Design Decisions
//! - Results are communicated over an explicit mpsc channel; the observer
//!   is the only place that logs and counts them
//! - Shutdown stops issuing immediately; requests already in flight hold
//!   channel senders, so the observer drains them before reporting

use std::sync::Arc;

use metrics::{counter, gauge};
use tokio::sync::{broadcast, mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use crate::domain::Console;
use crate::driver::types::{DriverConfig, DriverError, DriverResult, DriverSummary};
use crate::http::response::AvailabilityResponse;
use crate::lifecycle::Shutdown;
use crate::observability::metrics::{DRIVER_IN_FLIGHT_GAUGE, DRIVER_RESULTS_COUNTER};
use crate::observability::CONSOLE_TAG;

/// Issues sustained availability queries against the service.
pub struct LoadDriver {
    config: DriverConfig,
    client: reqwest::Client,
}

impl LoadDriver {
    /// Validate the configuration and build the HTTP client.
    pub fn new(config: DriverConfig) -> Result<Self, DriverError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Run until every bounded schedule completes or shutdown triggers,
    /// then report totals once all in-flight requests have drained.
    pub async fn run(self, shutdown: &Shutdown) -> DriverSummary {
        let LoadDriver { config, client } = self;
        let config = Arc::new(config);
        let (results_tx, mut results_rx) = mpsc::unbounded_channel::<DriverResult>();

        let observer = tokio::spawn(async move {
            let mut summary = DriverSummary::default();
            while let Some(result) = results_rx.recv().await {
                summary.total += 1;
                let outcome = if result.fallback {
                    summary.fallbacks += 1;
                    tracing::warn!(
                        console = result.console.as_str(),
                        available = result.available,
                        "Recorded fallback result"
                    );
                    "fallback"
                } else {
                    tracing::info!(
                        console = result.console.as_str(),
                        available = result.available,
                        "Recorded availability result"
                    );
                    "ok"
                };
                counter!(
                    DRIVER_RESULTS_COUNTER,
                    CONSOLE_TAG => result.console.as_str(),
                    "outcome" => outcome
                )
                .increment(1);
            }
            summary
        });

        let mut schedules = JoinSet::new();
        for console in config.consoles.clone() {
            schedules.spawn(Self::drive_console(
                client.clone(),
                config.clone(),
                console,
                shutdown.subscribe(),
                results_tx.clone(),
            ));
        }
        drop(results_tx);

        while schedules.join_next().await.is_some() {}

        // The channel closes once the last in-flight request task drops
        // its sender; the observer sees every result before reporting.
        observer.await.unwrap_or_default()
    }

    /// One console's repeating schedule.
    async fn drive_console(
        client: reqwest::Client,
        config: Arc<DriverConfig>,
        console: Console,
        mut shutdown: broadcast::Receiver<()>,
        results: mpsc::UnboundedSender<DriverResult>,
    ) {
        let semaphore = Arc::new(Semaphore::new(config.per_console_concurrency));
        let url = format!(
            "{}/availability/{}",
            config.base_url.trim_end_matches('/'),
            console
        );

        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut issued: u64 = 0;
        loop {
            if let Some(max) = config.iterations {
                if issued >= max {
                    tracing::debug!(console = console.as_str(), issued, "Schedule complete");
                    break;
                }
            }

            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!(console = console.as_str(), "Schedule stopping");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let permit = tokio::select! {
                _ = shutdown.recv() => break,
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };
            issued += 1;

            // Fire and forget: the schedule never waits on the request.
            let client = client.clone();
            let url = url.clone();
            let results = results.clone();
            tokio::spawn(async move {
                gauge!(DRIVER_IN_FLIGHT_GAUGE, CONSOLE_TAG => console.as_str()).increment(1.0);

                let result = match query_availability(&client, &url, console).await {
                    Ok(available) => DriverResult {
                        console,
                        available,
                        fallback: false,
                    },
                    Err(e) => {
                        tracing::debug!(
                            console = console.as_str(),
                            error = %e,
                            "Query failed, substituting fallback"
                        );
                        DriverResult {
                            console,
                            available: false,
                            fallback: true,
                        }
                    }
                };

                gauge!(DRIVER_IN_FLIGHT_GAUGE, CONSOLE_TAG => console.as_str()).decrement(1.0);
                drop(permit);
                let _ = results.send(result);
            });
        }
    }
}

/// One query. Any deviation from a well-formed success is an error the
/// caller turns into the fallback result.
async fn query_availability(
    client: &reqwest::Client,
    url: &str,
    console: Console,
) -> Result<bool, DriverError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DriverError::Status(status));
    }
    let body: AvailabilityResponse = response.json().await?;
    if body.console != console.as_str() {
        return Err(DriverError::MismatchedConsole(body.console));
    }
    Ok(body.available)
}
