use crate::core::errors::{AggregateError, ExchangeError, JobFailure};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

/// Runs one job per input value concurrently and combines the results.
///
/// Each job runs as its own task and reports `(index, outcome)` over a
/// channel to the single collecting loop in [`FanOut::run`]; no state is
/// shared between jobs. Failure policy is collect-all: every job runs to
/// completion and, if any failed, the call returns an
/// [`AggregateError`] listing every failing value (in input order) along with
/// the values that succeeded.
///
/// Combined items follow input order, and each job's items keep their own
/// order. Dropping the returned future aborts every in-flight job.
#[derive(Debug, Clone, Default)]
pub struct FanOut {
    limit: Option<Arc<Semaphore>>,
}

impl FanOut {
    /// Unbounded: every job starts immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// At most `max_concurrency` jobs in flight at once.
    ///
    /// Clones share the permits, so the cap holds across concurrent batches
    /// run through the same client.
    pub fn with_limit(max_concurrency: usize) -> Self {
        Self {
            limit: Some(Arc::new(Semaphore::new(max_concurrency.max(1)))),
        }
    }

    /// Run `job` for every value, each job yielding a list of items.
    #[instrument(skip_all, fields(jobs = values.len()))]
    pub async fn run<V, T, F, Fut>(&self, values: &[V], job: F) -> Result<Vec<T>, ExchangeError>
    where
        V: Display + Clone + Send + 'static,
        T: Send + 'static,
        F: Fn(V) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ExchangeError>> + Send + 'static,
    {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let (tx, mut rx) = mpsc::channel(values.len());
        let mut workers = JoinSet::new();

        for (index, value) in values.iter().enumerate() {
            let tx = tx.clone();
            let limit = self.limit.clone();
            let fut = job(value.clone());
            workers.spawn(async move {
                let _permit = match limit {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let outcome = fut.await;
                // The collector outlives every worker; a send can only fail
                // once the whole call has been dropped.
                let _ = tx.send((index, outcome)).await;
            });
        }
        drop(tx);

        let mut slots: Vec<Option<Result<Vec<T>, ExchangeError>>> =
            std::iter::repeat_with(|| None).take(values.len()).collect();
        while let Some((index, outcome)) = rx.recv().await {
            slots[index] = Some(outcome);
        }
        // All senders are gone, so every worker has finished or panicked.
        while workers.join_next().await.is_some() {}

        let mut items = Vec::new();
        let mut failures = Vec::new();
        let mut succeeded = Vec::new();
        for (value, slot) in values.iter().zip(slots) {
            match slot {
                Some(Ok(mut batch)) => {
                    succeeded.push(value.to_string());
                    items.append(&mut batch);
                }
                Some(Err(error)) => failures.push(JobFailure {
                    value: value.to_string(),
                    error,
                }),
                None => failures.push(JobFailure {
                    value: value.to_string(),
                    error: ExchangeError::TransportError(
                        "request task terminated before completing".to_string(),
                    ),
                }),
            }
        }

        if failures.is_empty() {
            debug!(items = items.len(), "all jobs succeeded");
            Ok(items)
        } else {
            warn!(
                failed = failures.len(),
                succeeded = succeeded.len(),
                "fan-out batch had failures"
            );
            Err(AggregateError::new(failures, succeeded).into())
        }
    }

    /// Run `job` for every value, each job yielding exactly one item.
    pub async fn run_single<V, T, F, Fut>(
        &self,
        values: &[V],
        job: F,
    ) -> Result<Vec<T>, ExchangeError>
    where
        V: Display + Clone + Send + 'static,
        T: Send + 'static,
        F: Fn(V) -> Fut,
        Fut: Future<Output = Result<T, ExchangeError>> + Send + 'static,
    {
        self.run(values, |value| {
            let fut = job(value);
            async move { fut.await.map(|item| vec![item]) }
        })
        .await
    }
}
