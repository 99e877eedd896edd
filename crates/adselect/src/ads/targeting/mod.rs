pub mod evaluator;
pub mod pool;
pub mod predicate;

pub use evaluator::TargetingEvaluator;
pub use pool::EvaluatorPool;
pub use predicate::{PredicateError, TargetingPredicate, TargetingPredicateResult};

use std::sync::Arc;

use crate::ads::domain::ClickThroughRate;

/// One audience segment for one advertisement: the predicates a customer
/// must satisfy and the click-through rate observed for that segment.
/// Predicate order carries no meaning.
#[derive(Debug, Clone)]
pub struct TargetingGroup {
    pub content_id: String,
    pub click_through_rate: ClickThroughRate,
    pub predicates: Vec<Arc<dyn TargetingPredicate>>,
}

impl TargetingGroup {
    pub fn new(
        content_id: impl Into<String>,
        click_through_rate: ClickThroughRate,
        predicates: Vec<Arc<dyn TargetingPredicate>>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            click_through_rate,
            predicates,
        }
    }
}

#[cfg(test)]
mod tests;
