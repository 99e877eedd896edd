use super::domain::AdvertisementContent;
use super::targeting::TargetingGroup;

/// Read-only source of advertisement candidates for a marketplace. An
/// unknown marketplace yields an empty vec, not an error.
pub trait ContentStore: Send + Sync {
    fn get(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>, StoreError>;
}

/// Read-only source of targeting groups for one advertisement. Content with
/// no groups yields an empty vec.
pub trait TargetingGroupStore: Send + Sync {
    fn get(&self, content_id: &str) -> Result<Vec<TargetingGroup>, StoreError>;
}

/// Failure of a store lookup. These propagate out of selection untouched so
/// callers can tell an infrastructure fault from "no eligible ad".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
}
