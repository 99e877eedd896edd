use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{PredicateError, TargetingPredicate, TargetingPredicateResult};
use crate::ads::domain::RequestContext;

/// External source of customer attributes that predicates depend on.
/// `Ok(None)` means the attribute is simply unknown for that customer, which
/// predicates report as `Indeterminate` rather than `False`.
pub trait CustomerProfileSource: Send + Sync {
    fn age_range(&self, customer_id: &str) -> Result<Option<AgeRange>, PredicateError>;

    fn purchases_in_category(
        &self,
        customer_id: &str,
        category: &str,
    ) -> Result<Option<u32>, PredicateError>;
}

/// Coarse age buckets used for audience targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRange {
    UnderEighteen,
    EighteenToTwentyFive,
    TwentySixToForty,
    FortyOneToSixty,
    OverSixty,
}

fn apply_negate(result: TargetingPredicateResult, negate: bool) -> TargetingPredicateResult {
    if negate {
        result.negated()
    } else {
        result
    }
}

/// Matches customers the request could identify (a non-blank customer id).
#[derive(Debug, Clone, Copy, Default)]
pub struct RecognizedCustomerPredicate {
    pub negate: bool,
}

impl RecognizedCustomerPredicate {
    pub fn new(negate: bool) -> Self {
        Self { negate }
    }
}

impl TargetingPredicate for RecognizedCustomerPredicate {
    fn evaluate(
        &self,
        context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        let result = TargetingPredicateResult::from_bool(context.is_recognized());
        Ok(apply_negate(result, self.negate))
    }
}

/// Matches requests originating from one specific marketplace.
#[derive(Debug, Clone)]
pub struct MarketplacePredicate {
    pub marketplace_id: String,
    pub negate: bool,
}

impl MarketplacePredicate {
    pub fn new(marketplace_id: impl Into<String>, negate: bool) -> Self {
        Self {
            marketplace_id: marketplace_id.into(),
            negate,
        }
    }
}

impl TargetingPredicate for MarketplacePredicate {
    fn evaluate(
        &self,
        context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        let result =
            TargetingPredicateResult::from_bool(context.marketplace_id() == self.marketplace_id);
        Ok(apply_negate(result, self.negate))
    }
}

/// Matches customers whose profile places them in a given age bucket.
/// Unknown age yields `Indeterminate`, negated or not.
pub struct AgeRangePredicate {
    range: AgeRange,
    negate: bool,
    profiles: Arc<dyn CustomerProfileSource>,
}

impl AgeRangePredicate {
    pub fn new(range: AgeRange, negate: bool, profiles: Arc<dyn CustomerProfileSource>) -> Self {
        Self {
            range,
            negate,
            profiles,
        }
    }
}

impl fmt::Debug for AgeRangePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgeRangePredicate")
            .field("range", &self.range)
            .field("negate", &self.negate)
            .finish_non_exhaustive()
    }
}

impl TargetingPredicate for AgeRangePredicate {
    fn evaluate(
        &self,
        context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        match self.profiles.age_range(context.customer_id())? {
            None => Ok(TargetingPredicateResult::Indeterminate),
            Some(range) => Ok(apply_negate(
                TargetingPredicateResult::from_bool(range == self.range),
                self.negate,
            )),
        }
    }
}

/// Matches customers with at least `minimum_purchases` recorded purchases in
/// a product category.
pub struct CategorySpendPredicate {
    category: String,
    minimum_purchases: u32,
    negate: bool,
    profiles: Arc<dyn CustomerProfileSource>,
}

impl CategorySpendPredicate {
    pub fn new(
        category: impl Into<String>,
        minimum_purchases: u32,
        negate: bool,
        profiles: Arc<dyn CustomerProfileSource>,
    ) -> Self {
        Self {
            category: category.into(),
            minimum_purchases,
            negate,
            profiles,
        }
    }
}

impl fmt::Debug for CategorySpendPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategorySpendPredicate")
            .field("category", &self.category)
            .field("minimum_purchases", &self.minimum_purchases)
            .field("negate", &self.negate)
            .finish_non_exhaustive()
    }
}

impl TargetingPredicate for CategorySpendPredicate {
    fn evaluate(
        &self,
        context: &RequestContext,
    ) -> Result<TargetingPredicateResult, PredicateError> {
        match self
            .profiles
            .purchases_in_category(context.customer_id(), &self.category)?
        {
            None => Ok(TargetingPredicateResult::Indeterminate),
            Some(count) => Ok(apply_negate(
                TargetingPredicateResult::from_bool(count >= self.minimum_purchases),
                self.negate,
            )),
        }
    }
}
