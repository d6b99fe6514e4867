use crate::{
    error::{ErrorClass, ErrorDetail, ErrorOrigin},
    key_def::PartSpec,
    obs::{metrics_report, metrics_reset_all},
    region::{self, Region},
    test_support::{key_def, map, tuple},
    value::Value,
};
use std::cmp::Ordering;

#[test]
fn key_fields_follow_part_order() {
    let def = key_def(&[
        PartSpec::fieldno(3, "boolean"),
        PartSpec::fieldno(1, "unsigned"),
        PartSpec::fieldno(2, "string").path(".name"),
    ]);
    let record = tuple([
        Value::from(7_u64),
        map([("name", Value::from("ann")), ("age", Value::from(30_u64))]),
        Value::from(true),
    ]);

    let key = def.extract_key(&record).expect("extract");
    assert_eq!(
        key.to_values().expect("key values"),
        vec![Value::from(true), Value::from(7_u64), Value::from("ann")]
    );
}

#[test]
fn extracted_key_is_independent_of_the_record() {
    let def = key_def(&[PartSpec::fieldno(1, "string")]);
    let record = tuple([Value::from("abc"), Value::from(1_u64)]);

    let key = def.extract_key(&record).expect("extract");
    drop(record);

    assert_eq!(key.ref_count(), 1);
    assert_eq!(key.to_values().expect("values"), vec![Value::from("abc")]);
}

#[test]
fn absent_nullable_fields_become_nil() {
    let def = key_def(&[
        PartSpec::fieldno(1, "unsigned"),
        PartSpec::fieldno(4, "string").nullable(),
        PartSpec::fieldno(2, "unsigned").nullable().path(".missing"),
    ]);
    let record = tuple([Value::from(1_u64), map([("x", Value::from(2_u64))])]);

    let key = def.extract_key(&record).expect("extract");
    assert_eq!(
        key.to_values().expect("values"),
        vec![Value::from(1_u64), Value::Nil, Value::Nil]
    );
}

#[test]
fn extracted_key_matches_its_record() {
    let def = key_def(&[PartSpec::fieldno(2, "integer"), PartSpec::fieldno(1, "string")]);
    let record = tuple([Value::from("k"), Value::from(-4_i64), Value::from(0_u64)]);

    let key = def.extract_key(&record).expect("extract");
    assert_eq!(
        def.compare_with_key(&record, key.as_bytes())
            .expect("compare with own key"),
        Ordering::Equal
    );
}

#[test]
fn invalid_record_produces_no_key() {
    let def = key_def(&[PartSpec::fieldno(2, "unsigned")]);
    let record = tuple([Value::from(1_u64)]);

    let err = def.extract_key(&record).expect_err("missing field");
    assert_eq!(err.class, ErrorClass::KeyValidation);
    assert_eq!(err.origin, ErrorOrigin::Extract);
    assert_eq!(err.message, "Tuple field [2] required by space format is missing");
    assert_eq!(region::used(), 0);
}

#[test]
fn region_limit_surfaces_out_of_memory() {
    let def = key_def(&[PartSpec::fieldno(1, "string")]);
    let record = tuple([Value::from("x".repeat(64))]);
    let mut small = Region::with_limit(16);

    let err = def
        .extract_key_in(&record, &mut small)
        .expect_err("region too small");
    assert!(err.is_out_of_memory());
    assert!(matches!(
        err.detail,
        Some(ErrorDetail::Allocation {
            allocator: "region",
            purpose: "key field",
            ..
        })
    ));
    assert_eq!(small.used(), 0);

    let mut roomy = Region::with_limit(1024);
    let key = def.extract_key_in(&record, &mut roomy).expect("roomy region");
    assert_eq!(key.field_count(), 1);
    assert_eq!(roomy.used(), 0);
    assert!(roomy.high_water() > 64);
}

#[test]
fn extract_records_metrics() {
    let def = key_def(&[PartSpec::fieldno(1, "unsigned")]);
    let record = tuple([Value::from(7_u64)]);
    metrics_reset_all();

    let key = def.extract_key(&record).expect("extract");
    def.extract_key(&tuple([Value::from("bad")]))
        .expect_err("type mismatch");

    let counters = metrics_report(None).counters.expect("counters");
    assert_eq!(counters.ops.extract_calls, 1);
    assert_eq!(counters.ops.extract_bytes, key.as_bytes().len() as u64);
    assert_eq!(counters.ops.key_validation_failures, 1);
}
