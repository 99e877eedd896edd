use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::ads::domain::{ClickThroughRate, RequestContext};
use crate::ads::targeting::predicate::{
    AgeRange, CustomerProfileSource, PredicateError, TargetingPredicate, TargetingPredicateResult,
};
use crate::ads::targeting::{EvaluatorPool, TargetingEvaluator, TargetingGroup};

pub(super) fn pool() -> Arc<EvaluatorPool> {
    Arc::new(EvaluatorPool::new(4, Duration::from_millis(200)))
}

pub(super) fn evaluator() -> TargetingEvaluator {
    TargetingEvaluator::new(pool())
}

pub(super) fn context() -> Arc<RequestContext> {
    Arc::new(RequestContext::new("customer-1", "marketplace-1"))
}

pub(super) fn ctr(value: f64) -> ClickThroughRate {
    ClickThroughRate::new(value).expect("valid ctr")
}

pub(super) fn group(predicates: Vec<Arc<dyn TargetingPredicate>>) -> TargetingGroup {
    TargetingGroup::new("content-1", ctr(0.1), predicates)
}

/// Predicate that always answers with the configured result.
#[derive(Debug)]
pub(super) struct Fixed(pub(super) TargetingPredicateResult);

impl TargetingPredicate for Fixed {
    fn evaluate(
        &self,
        _context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        Ok(self.0)
    }
}

/// Predicate whose evaluation fails outright.
#[derive(Debug)]
pub(super) struct Failing;

impl TargetingPredicate for Failing {
    fn evaluate(
        &self,
        _context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        Err(PredicateError::DataUnavailable("stub outage".to_string()))
    }
}

/// Predicate that panics, standing in for a programming error inside a
/// predicate implementation.
#[derive(Debug)]
pub(super) struct Panicking;

impl TargetingPredicate for Panicking {
    fn evaluate(
        &self,
        _context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        panic!("stub predicate panic")
    }
}

/// Predicate that blocks past the pool timeout before answering.
#[derive(Debug)]
pub(super) struct Slow {
    pub(super) delay: Duration,
    pub(super) result: TargetingPredicateResult,
}

impl TargetingPredicate for Slow {
    fn evaluate(
        &self,
        _context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        std::thread::sleep(self.delay);
        Ok(self.result)
    }
}

/// Predicate that records how often it ran.
#[derive(Debug)]
pub(super) struct Counting {
    pub(super) result: TargetingPredicateResult,
    pub(super) calls: Arc<AtomicUsize>,
}

impl TargetingPredicate for Counting {
    fn evaluate(
        &self,
        _context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result)
    }
}

/// In-memory profile source for predicate variants under test.
#[derive(Debug, Default)]
pub(super) struct StubProfiles {
    pub(super) ages: HashMap<String, AgeRange>,
    pub(super) purchases: HashMap<(String, String), u32>,
}

impl CustomerProfileSource for StubProfiles {
    fn age_range(&self, customer_id: &str) -> Result<Option<AgeRange>, PredicateError> {
        Ok(self.ages.get(customer_id).copied())
    }

    fn purchases_in_category(
        &self,
        customer_id: &str,
        category: &str,
    ) -> Result<Option<u32>, PredicateError> {
        Ok(self
            .purchases
            .get(&(customer_id.to_string(), category.to_string()))
            .copied())
    }
}
