use std::sync::Arc;

use super::common::StubProfiles;
use crate::ads::domain::RequestContext;
use crate::ads::targeting::predicate::codec::{
    decode_predicates, encode_predicates, CodecError, PredicateFactory, PredicateRecord,
};
use crate::ads::targeting::predicate::{AgeRange, TargetingPredicate, TargetingPredicateResult};

fn records() -> Vec<PredicateRecord> {
    vec![
        PredicateRecord::Recognized { negate: false },
        PredicateRecord::Marketplace {
            marketplace_id: "marketplace-1".to_string(),
            negate: true,
        },
        PredicateRecord::AgeRange {
            range: AgeRange::EighteenToTwentyFive,
            negate: false,
        },
        PredicateRecord::CategorySpend {
            category: "books".to_string(),
            minimum_purchases: 3,
            negate: false,
        },
    ]
}

#[test]
fn records_round_trip_through_the_textual_form() {
    let encoded = encode_predicates(&records()).expect("encodes");
    let decoded = decode_predicates(&encoded).expect("decodes");
    assert_eq!(decoded, records());
}

#[test]
fn each_record_is_self_describing() {
    let encoded = encode_predicates(&records()).expect("encodes");
    assert!(encoded.starts_with('['));
    assert!(encoded.contains(r#""type":"recognized""#));
    assert!(encoded.contains(r#""type":"marketplace""#));
    assert!(encoded.contains(r#""type":"age_range""#));
    assert!(encoded.contains(r#""type":"category_spend""#));
}

#[test]
fn empty_list_encodes_as_empty_array() {
    assert_eq!(encode_predicates(&[]).expect("encodes"), "[]");
    assert_eq!(decode_predicates("[]").expect("decodes"), Vec::new());
}

#[test]
fn omitted_negate_defaults_to_false() {
    let decoded = decode_predicates(r#"[{"type":"recognized"}]"#).expect("decodes");
    assert_eq!(decoded, vec![PredicateRecord::Recognized { negate: false }]);
}

#[test]
fn malformed_input_is_a_decode_error() {
    let result = decode_predicates(r#"[{"type":"unheard_of"}]"#);
    assert!(matches!(result, Err(CodecError::Decode(_))));

    let result = decode_predicates("not json at all");
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

#[test]
fn factory_injects_the_profile_source() {
    let mut profiles = StubProfiles::default();
    profiles
        .ages
        .insert("customer-1".to_string(), AgeRange::EighteenToTwentyFive);
    let factory = PredicateFactory::new(Arc::new(profiles));

    let predicates = factory
        .decode(r#"[{"type":"age_range","range":"eighteen_to_twenty_five"}]"#)
        .expect("decodes and builds");
    assert_eq!(predicates.len(), 1);

    let context = RequestContext::new("customer-1", "marketplace-1");
    assert_eq!(
        predicates[0].evaluate(&context).expect("evaluates"),
        TargetingPredicateResult::True
    );
}
