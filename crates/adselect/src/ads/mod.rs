pub mod domain;
pub mod selection;
pub mod store;
pub mod targeting;

pub use domain::{
    AdvertisementContent, ClickThroughRate, GeneratedAdvertisement, InvalidClickThroughRate,
    RequestContext,
};
pub use selection::{AdvertisementSelector, SelectionError};
pub use store::{ContentStore, StoreError, TargetingGroupStore};
pub use targeting::{
    EvaluatorPool, TargetingEvaluator, TargetingGroup, TargetingPredicate,
    TargetingPredicateResult,
};
