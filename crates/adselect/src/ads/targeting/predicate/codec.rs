//! Storage form of predicate lists.
//!
//! A stored targeting group keeps its predicates as a JSON array of
//! self-describing records, one element per predicate with a `type` tag. An
//! empty list is stored as `"[]"`, which stores must keep distinct from an
//! absent attribute. Turning records back into runnable predicates goes
//! through [`PredicateFactory`], which injects the collaborators a predicate
//! needs; records themselves stay plain data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::variants::{
    AgeRange, AgeRangePredicate, CategorySpendPredicate, CustomerProfileSource,
    MarketplacePredicate, RecognizedCustomerPredicate,
};
use super::TargetingPredicate;

/// Serialized shape of one predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredicateRecord {
    Recognized {
        #[serde(default)]
        negate: bool,
    },
    Marketplace {
        marketplace_id: String,
        #[serde(default)]
        negate: bool,
    },
    AgeRange {
        range: AgeRange,
        #[serde(default)]
        negate: bool,
    },
    CategorySpend {
        category: String,
        minimum_purchases: u32,
        #[serde(default)]
        negate: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to serialize predicate list: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to parse predicate list: {0}")]
    Decode(#[source] serde_json::Error),
}

pub fn encode_predicates(records: &[PredicateRecord]) -> Result<String, CodecError> {
    serde_json::to_string(records).map_err(CodecError::Encode)
}

pub fn decode_predicates(raw: &str) -> Result<Vec<PredicateRecord>, CodecError> {
    serde_json::from_str(raw).map_err(CodecError::Decode)
}

/// Builds fully configured predicate instances from storage records. This is
/// the one place collaborator wiring happens; callers receive ready-to-run
/// trait objects.
#[derive(Clone)]
pub struct PredicateFactory {
    profiles: Arc<dyn CustomerProfileSource>,
}

impl PredicateFactory {
    pub fn new(profiles: Arc<dyn CustomerProfileSource>) -> Self {
        Self { profiles }
    }

    pub fn build(&self, record: PredicateRecord) -> Arc<dyn TargetingPredicate> {
        match record {
            PredicateRecord::Recognized { negate } => {
                Arc::new(RecognizedCustomerPredicate::new(negate))
            }
            PredicateRecord::Marketplace {
                marketplace_id,
                negate,
            } => Arc::new(MarketplacePredicate::new(marketplace_id, negate)),
            PredicateRecord::AgeRange { range, negate } => Arc::new(AgeRangePredicate::new(
                range,
                negate,
                Arc::clone(&self.profiles),
            )),
            PredicateRecord::CategorySpend {
                category,
                minimum_purchases,
                negate,
            } => Arc::new(CategorySpendPredicate::new(
                category,
                minimum_purchases,
                negate,
                Arc::clone(&self.profiles),
            )),
        }
    }

    pub fn build_all(&self, records: Vec<PredicateRecord>) -> Vec<Arc<dyn TargetingPredicate>> {
        records.into_iter().map(|record| self.build(record)).collect()
    }

    /// Decode a stored predicate column straight into runnable predicates.
    pub fn decode(&self, raw: &str) -> Result<Vec<Arc<dyn TargetingPredicate>>, CodecError> {
        Ok(self.build_all(decode_predicates(raw)?))
    }
}
