use std::sync::Arc;

use super::common::StubProfiles;
use crate::ads::domain::RequestContext;
use crate::ads::targeting::predicate::TargetingPredicateResult::{False, Indeterminate, True};
use crate::ads::targeting::predicate::{
    AgeRange, AgeRangePredicate, CategorySpendPredicate, CustomerProfileSource,
    MarketplacePredicate, RecognizedCustomerPredicate, TargetingPredicate,
};

fn recognized_context() -> RequestContext {
    RequestContext::new("customer-1", "marketplace-1")
}

#[test]
fn recognized_predicate_checks_customer_identity() {
    let predicate = RecognizedCustomerPredicate::new(false);
    assert_eq!(predicate.evaluate(&recognized_context()).expect("evaluates"), True);

    let anonymous = RequestContext::new("", "marketplace-1");
    assert_eq!(predicate.evaluate(&anonymous).expect("evaluates"), False);

    let negated = RecognizedCustomerPredicate::new(true);
    assert_eq!(negated.evaluate(&anonymous).expect("evaluates"), True);
}

#[test]
fn marketplace_predicate_compares_the_request_marketplace() {
    let predicate = MarketplacePredicate::new("marketplace-1", false);
    assert_eq!(predicate.evaluate(&recognized_context()).expect("evaluates"), True);

    let elsewhere = RequestContext::new("customer-1", "marketplace-2");
    assert_eq!(predicate.evaluate(&elsewhere).expect("evaluates"), False);
}

#[test]
fn age_predicate_answers_from_the_profile_source() {
    let mut profiles = StubProfiles::default();
    profiles
        .ages
        .insert("customer-1".to_string(), AgeRange::TwentySixToForty);
    let profiles: Arc<dyn CustomerProfileSource> = Arc::new(profiles);

    let matching = AgeRangePredicate::new(AgeRange::TwentySixToForty, false, Arc::clone(&profiles));
    assert_eq!(matching.evaluate(&recognized_context()).expect("evaluates"), True);

    let other = AgeRangePredicate::new(AgeRange::OverSixty, false, Arc::clone(&profiles));
    assert_eq!(other.evaluate(&recognized_context()).expect("evaluates"), False);
}

#[test]
fn unknown_age_is_indeterminate_even_when_negated() {
    let profiles = Arc::new(StubProfiles::default());
    let predicate = AgeRangePredicate::new(AgeRange::UnderEighteen, true, profiles);

    assert_eq!(
        predicate.evaluate(&recognized_context()).expect("evaluates"),
        Indeterminate
    );
}

#[test]
fn category_spend_predicate_applies_the_purchase_floor() {
    let mut profiles = StubProfiles::default();
    profiles
        .purchases
        .insert(("customer-1".to_string(), "books".to_string()), 7);
    let profiles: Arc<dyn CustomerProfileSource> = Arc::new(profiles);

    let met = CategorySpendPredicate::new("books", 5, false, Arc::clone(&profiles));
    assert_eq!(met.evaluate(&recognized_context()).expect("evaluates"), True);

    let unmet = CategorySpendPredicate::new("books", 10, false, Arc::clone(&profiles));
    assert_eq!(unmet.evaluate(&recognized_context()).expect("evaluates"), False);

    let unknown_category = CategorySpendPredicate::new("garden", 1, false, profiles);
    assert_eq!(
        unknown_category
            .evaluate(&recognized_context())
            .expect("evaluates"),
        Indeterminate
    );
}
