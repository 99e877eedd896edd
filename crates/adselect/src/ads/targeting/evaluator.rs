use std::sync::Arc;

use tokio::time::timeout;
use tracing::warn;

use super::pool::EvaluatorPool;
use super::predicate::TargetingPredicateResult;
use super::TargetingGroup;
use crate::ads::domain::RequestContext;

/// Decides whether a targeting group matches a request context.
#[derive(Debug, Clone)]
pub struct TargetingEvaluator {
    pool: Arc<EvaluatorPool>,
}

impl TargetingEvaluator {
    pub fn new(pool: Arc<EvaluatorPool>) -> Self {
        Self { pool }
    }

    /// `True` iff every predicate in the group evaluates to `True` for the
    /// context; anything else is `False`. Predicate errors, panics, timeouts,
    /// and `Indeterminate` answers all count as `False`. The composed result
    /// is never an error and never `Indeterminate`, and an empty predicate
    /// set is vacuously `True`.
    pub async fn evaluate(
        &self,
        group: &TargetingGroup,
        context: &Arc<RequestContext>,
    ) -> TargetingPredicateResult {
        let handles: Vec<_> = group
            .predicates
            .iter()
            .map(|predicate| self.pool.submit(Arc::clone(predicate), Arc::clone(context)))
            .collect();

        // Everything is already submitted, so predicates run concurrently.
        // Results are collected in submission order and the first non-True
        // answer settles the group; the remaining handles are dropped and
        // their tasks finish detached, returning permits as they go.
        for handle in handles {
            let result = match timeout(self.pool.predicate_timeout(), handle).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_error)) => {
                    warn!(
                        %join_error,
                        content_id = %group.content_id,
                        "predicate task aborted, failing closed"
                    );
                    TargetingPredicateResult::False
                }
                Err(_) => {
                    warn!(
                        content_id = %group.content_id,
                        "predicate evaluation timed out, failing closed"
                    );
                    TargetingPredicateResult::False
                }
            };

            if result != TargetingPredicateResult::True {
                return TargetingPredicateResult::False;
            }
        }

        TargetingPredicateResult::True
    }
}
