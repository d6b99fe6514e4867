use super::{compare::compare_scalar, *};
use crate::{collation::Collation, config::EngineConfig};
use keydef_primitives::CompareStrategy;
use proptest::prelude::*;
use std::{cmp::Ordering, str::FromStr};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("decimal literal")
}

fn numeric(left: &ValueRef<'_>, right: &ValueRef<'_>) -> Ordering {
    compare_with_strategy(CompareStrategy::Numeric, None, left, right)
}

fn scalar(left: &ValueRef<'_>, right: &ValueRef<'_>) -> Ordering {
    compare_with_strategy(CompareStrategy::Scalar, None, left, right)
}

//
// numbers
//

#[test]
fn numbers_compare_across_encodings() {
    assert_eq!(numeric(&ValueRef::Uint(3), &ValueRef::Int(-3)), Ordering::Greater);
    assert_eq!(numeric(&ValueRef::Uint(3), &ValueRef::Double(3.0)), Ordering::Equal);
    assert_eq!(numeric(&ValueRef::Uint(3), &ValueRef::Double(3.5)), Ordering::Less);
    assert_eq!(numeric(&ValueRef::Int(-3), &ValueRef::Double(-3.5)), Ordering::Greater);
    assert_eq!(numeric(&ValueRef::Float(2.5), &ValueRef::Double(2.5)), Ordering::Equal);
    assert_eq!(
        numeric(&ValueRef::Uint(2), &ValueRef::Decimal(dec("2.0"))),
        Ordering::Equal
    );
    assert_eq!(
        numeric(&ValueRef::Double(2.5), &ValueRef::Decimal(dec("2.25"))),
        Ordering::Greater
    );
}

#[test]
fn large_integers_are_not_rounded_through_floats() {
    // 2^53 + 1 is not representable as f64
    let big = (1_u64 << 53) + 1;
    #[allow(clippy::cast_precision_loss)]
    let float = (1_u64 << 53) as f64;

    assert_eq!(numeric(&ValueRef::Uint(big), &ValueRef::Double(float)), Ordering::Greater);
    assert_eq!(numeric(&ValueRef::Uint(u64::MAX), &ValueRef::Double(1e30)), Ordering::Less);
    assert_eq!(numeric(&ValueRef::Int(i64::MIN), &ValueRef::Double(-1e30)), Ordering::Greater);
}

#[test]
fn nan_sorts_lowest_and_equals_itself() {
    let nan = ValueRef::Double(f64::NAN);

    assert_eq!(numeric(&nan, &nan), Ordering::Equal);
    assert_eq!(numeric(&nan, &ValueRef::Double(f64::NEG_INFINITY)), Ordering::Less);
    assert_eq!(numeric(&nan, &ValueRef::Int(i64::MIN)), Ordering::Less);
    assert_eq!(numeric(&ValueRef::Uint(0), &nan), Ordering::Greater);
    assert_eq!(numeric(&nan, &ValueRef::Decimal(dec("-1"))), Ordering::Less);
}

//
// scalar classes
//

#[test]
fn scalar_orders_by_class_first() {
    let uuid = Uuid::from_bytes([0; 16]);
    let ordered = [
        ValueRef::Nil,
        ValueRef::Bool(true),
        ValueRef::Int(-1),
        ValueRef::Uint(u64::MAX),
        ValueRef::Str(b""),
        ValueRef::Str(b"z"),
        ValueRef::Bin(b""),
        ValueRef::Uuid(uuid),
        ValueRef::Datetime(Datetime::from_epoch(0)),
        ValueRef::Ext {
            type_id: 9,
            data: &[],
        },
        ValueRef::Array(&[0x90]),
        ValueRef::Map(&[0x80]),
    ];

    for pair in ordered.windows(2) {
        assert_eq!(
            scalar(&pair[0], &pair[1]),
            Ordering::Less,
            "{:?} < {:?}",
            pair[0],
            pair[1]
        );
        assert_eq!(scalar(&pair[1], &pair[0]), Ordering::Greater);
    }
}

#[test]
fn mismatched_kinds_fall_back_to_scalar_order() {
    // a string key element against an unsigned part
    assert_eq!(numeric(&ValueRef::Uint(5), &ValueRef::Str(b"5")), Ordering::Less);
    assert_eq!(
        compare_with_strategy(
            CompareStrategy::Text,
            None,
            &ValueRef::Str(b"a"),
            &ValueRef::Bool(false)
        ),
        Ordering::Greater
    );
}

#[test]
fn datetime_ignores_timezone_fields() {
    let a = Datetime {
        epoch: 10,
        nsec: 5,
        tzoffset: 60,
        tzindex: 0,
    };
    let b = Datetime::new(10, 5);

    assert_eq!(
        compare_with_strategy(
            CompareStrategy::Datetime,
            None,
            &ValueRef::Datetime(a),
            &ValueRef::Datetime(b)
        ),
        Ordering::Equal
    );
}

#[test]
fn text_uses_collation_when_present() {
    let ci = Collation::resolve("unicode_ci", &EngineConfig::default()).expect("unicode_ci");
    let (a, b) = (ValueRef::Str(b"ABC"), ValueRef::Str(b"abc"));

    assert_eq!(
        compare_with_strategy(CompareStrategy::Text, None, &a, &b),
        Ordering::Less
    );
    assert_eq!(
        compare_with_strategy(CompareStrategy::Text, Some(&ci), &a, &b),
        Ordering::Equal
    );
    assert_eq!(compare_scalar(Some(&ci), &a, &b), Ordering::Equal);
}

//
// owned values
//

#[test]
fn signed_conversions_normalize_non_negative() {
    assert_eq!(Value::from(5_i32), Value::Uint(5));
    assert_eq!(Value::from(-5_i32), Value::Int(-5));
    assert_eq!(Value::from(None::<u64>), Value::Nil);
    assert_eq!(Value::from(Some("x")), Value::Str("x".to_string()));
}

#[test]
fn owned_value_decodes_nested_containers() {
    let value = Value::Array(vec![
        Value::from(1_u64),
        Value::Map(vec![(Value::from("k"), Value::bin([1, 2]))]),
        Value::Ext {
            type_id: 9,
            data: vec![0xaa],
        },
    ]);
    let bytes = value.to_bytes().expect("encode");

    assert_eq!(Value::decode(&bytes).expect("decode"), value);
    assert_eq!(value.kind(), ValueKind::Array);
}

fn arb_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u64>().prop_map(Value::Uint),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::Double),
        (any::<i64>(), 0_u32..10).prop_map(|(m, s)| Value::Decimal(Decimal::new(m, s))),
    ]
}

fn ordering_of(a: &Value, b: &Value) -> Ordering {
    let (ab, bb) = (
        a.to_bytes().expect("encode a"),
        b.to_bytes().expect("encode b"),
    );
    let (ar, br) = (
        crate::codec::decode_exact(&ab).expect("decode a"),
        crate::codec::decode_exact(&bb).expect("decode b"),
    );

    numeric(&ar, &br)
}

proptest! {
    #[test]
    fn numeric_order_is_antisymmetric(a in arb_number(), b in arb_number()) {
        prop_assert_eq!(ordering_of(&a, &b), ordering_of(&b, &a).reverse());
    }

    #[test]
    fn numeric_order_is_reflexive(a in arb_number()) {
        prop_assert_eq!(ordering_of(&a, &a), Ordering::Equal);
    }
}
