mod compile;
mod extract;

use super::*;
use crate::{
    test_support::{key_def, tuple},
    value::Value,
};

#[test]
fn key_def_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<KeyDef>();
    assert_send_sync::<Tuple>();
}

#[test]
fn scenario_extract_then_compare() {
    let def = key_def(&[PartSpec::fieldno(1, "unsigned")]);
    let record = tuple([Value::from(7_u64), Value::from("x"), Value::from(true)]);
    let other = tuple([Value::from(5_u64), Value::from("y"), Value::from(false)]);

    let key = def.extract_key(&record).expect("extract");
    assert_eq!(key.to_values().expect("key values"), vec![Value::from(7_u64)]);

    assert_eq!(
        def.compare(&record, &other).expect("compare"),
        std::cmp::Ordering::Greater
    );
}

#[test]
fn release_consumes_the_definition() {
    let def = key_def(&[PartSpec::fieldno(1, "unsigned")]);
    let copy_of_table = def.to_table();

    def.release();
    assert_eq!(copy_of_table.len(), 1);
}

#[test]
fn key_part_display_shows_one_based_locator() {
    let def = key_def(&[
        PartSpec::fieldno(2, "string").nullable().collation("ci").path(".a"),
        PartSpec::fieldno(1, "unsigned"),
    ]);

    assert_eq!(def.parts()[0].to_string(), "[2].a string nullable collate ci");
    assert_eq!(def.parts()[1].to_string(), "[1] unsigned");
}
