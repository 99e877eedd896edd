use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

use super::predicate::{TargetingPredicate, TargetingPredicateResult};
use crate::ads::domain::RequestContext;
use crate::config::EvaluatorConfig;

/// Bounded worker pool for predicate evaluation, shared by every selection
/// request in the process. The permit count bounds total parallelism
/// system-wide, not per request. Create one at startup and hand out `Arc`
/// clones; the pool accepts only submissions, never exposes its internals.
#[derive(Debug)]
pub struct EvaluatorPool {
    permits: Arc<Semaphore>,
    predicate_timeout: Duration,
}

impl EvaluatorPool {
    pub fn new(size: usize, predicate_timeout: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(size.max(1))),
            predicate_timeout,
        }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(config.pool_size, config.predicate_timeout)
    }

    pub fn predicate_timeout(&self) -> Duration {
        self.predicate_timeout
    }

    /// Submit one predicate evaluation. The task settles `Indeterminate` into
    /// `False` and absorbs predicate errors as `False`; a pool that is shut
    /// down answers `False` without evaluating anything. The task runs to
    /// completion even if the caller stops awaiting the handle.
    pub(crate) fn submit(
        &self,
        predicate: Arc<dyn TargetingPredicate>,
        context: Arc<RequestContext>,
    ) -> JoinHandle<TargetingPredicateResult> {
        let permits = Arc::clone(&self.permits);
        tokio::spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    debug!("evaluator pool closed before dispatch, failing closed");
                    return TargetingPredicateResult::False;
                }
            };

            // Predicates are synchronous and allowed to block (profile
            // lookups, etc.), so they run on the blocking pool rather than a
            // runtime worker.
            let outcome =
                tokio::task::spawn_blocking(move || predicate.evaluate(&context)).await;

            match outcome {
                Ok(Ok(result)) => result.settled(),
                Ok(Err(error)) => {
                    debug!(%error, "predicate evaluation failed, failing closed");
                    TargetingPredicateResult::False
                }
                Err(join_error) => {
                    debug!(%join_error, "predicate task panicked, failing closed");
                    TargetingPredicateResult::False
                }
            }
        })
    }

    /// Stop accepting new work. In-flight evaluations finish on their own.
    pub fn shutdown(&self) {
        self.permits.close();
    }
}
