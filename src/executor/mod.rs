//! Latency prober
//!
//! Each instance is probed by its own task. A task first waits for a slot in
//! the shared [`AdmissionGate`], then issues every query in order with a
//! politeness delay between consecutive queries, and finally reports its
//! [`EndpointResult`] through a channel. The collector receives results in
//! completion order and ranks them once every probe has finished.

pub mod gate;

pub use gate::{AdmissionGate, AdmissionPermit};

use crate::{
    client::{HttpClient, SearchRequest},
    error::{AppError, Result},
    logging::ProbeLogger,
    models::{Config, EndpointResult, Measurement},
    stats::rank_results,
};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Hook notified as a run progresses
pub trait ProbeObserver: Send + Sync {
    /// A single request failed; the query is recorded as unreachable
    fn on_failure(&self, _endpoint: &str, _error: &AppError) {}

    /// An instance finished all of its queries
    fn on_endpoint_complete(&self, _result: &EndpointResult, _completed: usize, _total: usize) {}
}

/// Observer that ignores every event
pub struct NoopObserver;

impl ProbeObserver for NoopObserver {}

/// Runs timed search queries against instances
#[derive(Clone)]
pub struct Prober {
    client: Arc<dyn HttpClient>,
    gate: Arc<AdmissionGate>,
    queries: Arc<Vec<String>>,
    delay: Duration,
    observer: Arc<dyn ProbeObserver>,
    logger: Option<Arc<ProbeLogger>>,
}

impl Prober {
    /// Create a prober issuing `queries` with `delay` between them
    pub fn new(
        client: Arc<dyn HttpClient>,
        gate: Arc<AdmissionGate>,
        queries: Vec<String>,
        delay: Duration,
    ) -> Self {
        Self {
            client,
            gate,
            queries: Arc::new(queries),
            delay,
            observer: Arc::new(NoopObserver),
            logger: None,
        }
    }

    /// Create a prober from the runtime configuration
    pub fn from_config(config: &Config, client: Arc<dyn HttpClient>) -> Result<Self> {
        let gate = Arc::new(AdmissionGate::new(config.max_concurrency)?);
        Ok(Self::new(client, gate, config.queries.clone(), config.politeness_delay()))
    }

    /// Attach an observer
    pub fn with_observer(mut self, observer: Arc<dyn ProbeObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Attach a probe logger
    pub fn with_logger(mut self, logger: Arc<ProbeLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The gate shared by this prober's tasks
    pub fn gate(&self) -> &Arc<AdmissionGate> {
        &self.gate
    }

    /// Queries issued against every instance
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Time one search request.
    ///
    /// Failures never propagate: they are reported to the observer and
    /// recorded as [`Measurement::Unreachable`].
    pub async fn measure(&self, endpoint: &str, query: &str) -> Measurement {
        let outcome = match SearchRequest::build_url(endpoint, query) {
            Ok(url) => {
                let start = Instant::now();
                self.client.fetch(&url).await.map(|_| start.elapsed())
            }
            Err(e) => Err(e),
        };

        let measurement = match outcome {
            Ok(elapsed) => Measurement::success(elapsed),
            Err(error) => {
                self.observer.on_failure(endpoint, &error);
                if let Some(logger) = &self.logger {
                    logger.log_failure(endpoint, &error).await;
                }
                Measurement::unreachable(error.to_string())
            }
        };

        if let Some(logger) = &self.logger {
            logger.log_measurement(endpoint, query, &measurement).await;
        }

        measurement
    }

    /// Issue every query against one instance, in order.
    ///
    /// The politeness delay separates consecutive queries; none follows the
    /// last one.
    pub async fn probe_endpoint(&self, endpoint: &str) -> EndpointResult {
        let started_at = Utc::now();
        let mut measurements = Vec::with_capacity(self.queries.len());

        for (index, query) in self.queries.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            measurements.push(self.measure(endpoint, query).await);
        }

        EndpointResult::new(endpoint.to_string(), measurements, started_at, Utc::now())
    }

    /// Probe every instance and return the results ranked fastest first.
    ///
    /// Each instance yields exactly one result. At most `gate.capacity()`
    /// probes are in flight at any moment.
    pub async fn run_all(&self, endpoints: &[String]) -> Result<Vec<EndpointResult>> {
        let total = endpoints.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let (result_sender, mut result_receiver) = mpsc::channel::<Result<EndpointResult>>(total);
        let mut tasks = Vec::with_capacity(total);
        let mut task_endpoints = Vec::with_capacity(total);

        for endpoint in endpoints {
            task_endpoints.push(endpoint.clone());
            let endpoint = endpoint.clone();
            let prober = self.clone();
            let sender = result_sender.clone();

            let task = tokio::spawn(async move {
                let outcome = match prober.gate.admit().await {
                    Ok(_permit) => Ok(prober.probe_endpoint(&endpoint).await),
                    Err(e) => Err(e),
                };
                let _ = sender.send(outcome).await;
            });

            tasks.push(task);
        }

        // Drop the sender so the receiver ends once every task has reported
        drop(result_sender);

        let mut results = Vec::with_capacity(total);
        let mut first_error = None;

        while let Some(outcome) = result_receiver.recv().await {
            match outcome {
                Ok(result) => self.record_completion(&mut results, result, total).await,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        // A task that died before reporting still owes its instance a line
        for (endpoint, joined) in task_endpoints.into_iter().zip(join_all(tasks).await) {
            if let Err(e) = joined {
                let now = Utc::now();
                let error = AppError::internal(format!("Probe task failed: {}", e));
                self.observer.on_failure(&endpoint, &error);
                let result = EndpointResult::new(
                    endpoint,
                    vec![Measurement::unreachable(error.to_string())],
                    now,
                    now,
                );
                self.record_completion(&mut results, result, total).await;
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(rank_results(results)),
        }
    }

    async fn record_completion(&self, results: &mut Vec<EndpointResult>, result: EndpointResult, total: usize) {
        let completed = results.len() + 1;
        self.observer.on_endpoint_complete(&result, completed, total);
        if let Some(logger) = &self.logger {
            logger.log_endpoint_complete(&result, completed, total).await;
        }
        results.push(result);
    }
}
