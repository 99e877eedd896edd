use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use adselect::ads::domain::{AdvertisementContent, ClickThroughRate};
use adselect::ads::store::{ContentStore, StoreError, TargetingGroupStore};
use adselect::ads::targeting::predicate::codec::{PredicateFactory, PredicateRecord};
use adselect::ads::targeting::predicate::{AgeRange, CustomerProfileSource, PredicateError};
use adselect::ads::targeting::TargetingGroup;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContentStore {
    contents: Arc<Mutex<HashMap<String, Vec<AdvertisementContent>>>>,
}

impl InMemoryContentStore {
    pub(crate) fn put(&self, marketplace_id: &str, contents: Vec<AdvertisementContent>) {
        let mut guard = self.contents.lock().expect("content mutex poisoned");
        guard.insert(marketplace_id.to_string(), contents);
    }
}

impl ContentStore for InMemoryContentStore {
    fn get(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>, StoreError> {
        let guard = self.contents.lock().expect("content mutex poisoned");
        Ok(guard.get(marketplace_id).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTargetingGroupStore {
    groups: Arc<Mutex<HashMap<String, Vec<TargetingGroup>>>>,
}

impl InMemoryTargetingGroupStore {
    pub(crate) fn put(&self, content_id: &str, groups: Vec<TargetingGroup>) {
        let mut guard = self.groups.lock().expect("targeting mutex poisoned");
        guard.insert(content_id.to_string(), groups);
    }
}

impl TargetingGroupStore for InMemoryTargetingGroupStore {
    fn get(&self, content_id: &str) -> Result<Vec<TargetingGroup>, StoreError> {
        let guard = self.groups.lock().expect("targeting mutex poisoned");
        Ok(guard.get(content_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryProfileSource {
    ages: Mutex<HashMap<String, AgeRange>>,
    purchases: Mutex<HashMap<(String, String), u32>>,
}

impl InMemoryProfileSource {
    pub(crate) fn set_age(&self, customer_id: &str, range: AgeRange) {
        let mut guard = self.ages.lock().expect("profile mutex poisoned");
        guard.insert(customer_id.to_string(), range);
    }

    pub(crate) fn set_purchases(&self, customer_id: &str, category: &str, count: u32) {
        let mut guard = self.purchases.lock().expect("profile mutex poisoned");
        guard.insert((customer_id.to_string(), category.to_string()), count);
    }
}

impl CustomerProfileSource for InMemoryProfileSource {
    fn age_range(&self, customer_id: &str) -> Result<Option<AgeRange>, PredicateError> {
        let guard = self.ages.lock().expect("profile mutex poisoned");
        Ok(guard.get(customer_id).copied())
    }

    fn purchases_in_category(
        &self,
        customer_id: &str,
        category: &str,
    ) -> Result<Option<u32>, PredicateError> {
        let guard = self.purchases.lock().expect("profile mutex poisoned");
        Ok(guard
            .get(&(customer_id.to_string(), category.to_string()))
            .copied())
    }
}

fn ctr(value: f64) -> ClickThroughRate {
    ClickThroughRate::new(value).expect("valid demo ctr")
}

/// Seed a small demo marketplace: an ad for any recognized customer, a
/// better-paying one for book buyers, and the best-paying one gated on the
/// under-eighteen age bucket.
pub(crate) fn seed_demo_data(
    contents: &InMemoryContentStore,
    groups: &InMemoryTargetingGroupStore,
    profiles: &InMemoryProfileSource,
    factory: &PredicateFactory,
) {
    profiles.set_age("alice", AgeRange::TwentySixToForty);
    profiles.set_purchases("alice", "books", 6);
    profiles.set_age("bob", AgeRange::UnderEighteen);

    contents.put(
        "US",
        vec![
            AdvertisementContent::new("spring-sale", "<div>Spring sale: 20% off</div>"),
            AdvertisementContent::new("book-bundle", "<div>Three novels for the price of two</div>"),
            AdvertisementContent::new("teen-gadgets", "<div>Back-to-school gadgets</div>"),
        ],
    );

    groups.put(
        "spring-sale",
        vec![TargetingGroup::new(
            "spring-sale",
            ctr(0.12),
            factory.build_all(vec![PredicateRecord::Recognized { negate: false }]),
        )],
    );
    groups.put(
        "book-bundle",
        vec![TargetingGroup::new(
            "book-bundle",
            ctr(0.35),
            factory.build_all(vec![
                PredicateRecord::Recognized { negate: false },
                PredicateRecord::CategorySpend {
                    category: "books".to_string(),
                    minimum_purchases: 3,
                    negate: false,
                },
            ]),
        )],
    );
    groups.put(
        "teen-gadgets",
        vec![TargetingGroup::new(
            "teen-gadgets",
            ctr(0.50),
            factory.build_all(vec![PredicateRecord::AgeRange {
                range: AgeRange::UnderEighteen,
                negate: false,
            }]),
        )],
    );
}
