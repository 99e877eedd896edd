pub mod codec;
mod variants;

pub use variants::{
    AgeRange, AgeRangePredicate, CategorySpendPredicate, CustomerProfileSource,
    MarketplacePredicate, RecognizedCustomerPredicate,
};

use std::fmt;

use crate::ads::domain::RequestContext;

/// Three-valued outcome of a single predicate: a predicate can affirm, deny,
/// or admit it does not know (missing profile data, upstream hiccup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingPredicateResult {
    True,
    False,
    Indeterminate,
}

impl TargetingPredicateResult {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    pub fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// The group combination rule: `Indeterminate` folds into `False` before
    /// results are ANDed, so a composed group answer is only ever `True` or
    /// `False`.
    pub fn settled(self) -> Self {
        match self {
            Self::Indeterminate => Self::False,
            other => other,
        }
    }

    /// Flips `True` and `False`; an unknown stays unknown.
    pub fn negated(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Indeterminate => Self::Indeterminate,
        }
    }
}

/// Failure raised by a single predicate evaluation. The evaluator absorbs
/// these and treats the predicate as `False`; they never reach selection.
#[derive(Debug, thiserror::Error)]
pub enum PredicateError {
    #[error("customer data unavailable: {0}")]
    DataUnavailable(String),
    #[error("predicate misconfigured: {0}")]
    Misconfigured(String),
}

/// One targeting condition. Implementations carry their own configuration and
/// collaborators, hold no shared mutable state, and may be invoked from many
/// evaluations concurrently.
pub trait TargetingPredicate: fmt::Debug + Send + Sync {
    fn evaluate(
        &self,
        context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError>;
}
