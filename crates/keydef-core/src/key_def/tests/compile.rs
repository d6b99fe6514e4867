use crate::{
    config::EngineConfig,
    error::{ErrorClass, ErrorOrigin},
    key_def::{KeyDef, KeyDefTable, KeyPart, PartSpec, PartType},
    obs::{metrics_report, metrics_reset_all},
};
use keydef_primitives::FieldType;

fn reject(specs: &[PartSpec]) -> crate::error::KeyDefError {
    KeyDef::new(specs).expect_err("key def should be rejected")
}

#[test]
fn one_based_numbers_become_zero_based() {
    let def = KeyDef::new(&[PartSpec::fieldno(3, "integer"), PartSpec::field(1, "string")])
        .expect("key def");

    assert_eq!(def.part_count(), 2);
    assert_eq!(def.parts()[0].fieldno(), 2);
    assert_eq!(def.parts()[1].fieldno(), 0);
    assert_eq!(
        def.parts()[0].field_type(),
        &PartType::Known(FieldType::Integer)
    );
}

#[test]
fn rejection_set() {
    let both = PartSpec {
        field: Some(1),
        ..PartSpec::fieldno(1, "unsigned")
    };
    let neither = PartSpec {
        field_type: Some("unsigned".to_string()),
        ..PartSpec::default()
    };
    let no_type = PartSpec {
        fieldno: Some(1),
        ..PartSpec::default()
    };

    let cases = vec![
        (vec![both], "Conflicting options: fieldno and field (key part 1)"),
        (vec![neither], "fieldno or field must not be nil (key part 1)"),
        (vec![no_type], "type must not be nil (key part 1)"),
        (
            vec![PartSpec::fieldno(1, "any")],
            "Unsupported field type: any (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "array")],
            "Unsupported field type: array (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "map")],
            "Unsupported field type: map (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "*")],
            "Unsupported field type: * (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "ANY")],
            "Unsupported field type: ANY (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "Array")],
            "Unsupported field type: Array (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "MAP")],
            "Unsupported field type: MAP (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "map").path(".a[*]")],
            "Unsupported field type: map (key part 1)",
        ),
        (
            vec![PartSpec::fieldno(1, "string").path(".a[*]")],
            "Multikey JSON path is not supported (key part 1)",
        ),
        (vec![], "At least one key part is required"),
    ];

    for (specs, message) in cases {
        let err = reject(&specs);
        assert_eq!(err.class, ErrorClass::IllegalParams, "{message}");
        assert_eq!(err.origin, ErrorOrigin::Compile);
        assert_eq!(err.message, message);
    }
}

#[test]
fn zero_fieldno_is_rejected() {
    let err = reject(&[PartSpec::fieldno(0, "unsigned")]);
    assert_eq!(err.message, "fieldno must be a positive integer (key part 1)");
}

#[test]
fn error_names_the_failing_part() {
    let err = reject(&[
        PartSpec::fieldno(1, "unsigned"),
        PartSpec::fieldno(2, "string").collation("klingon"),
    ]);

    assert_eq!(err.part_index(), Some(1));
    assert_eq!(err.message, "Unknown collation: 'klingon' (key part 2)");
    assert_eq!(
        err.display_with_class(),
        "compile:illegal_params: Unknown collation: 'klingon' (key part 2)"
    );
}

#[test]
fn unknown_type_names_are_accepted_as_scalar() {
    let def = KeyDef::new(&[PartSpec::fieldno(1, "interval")]).expect("unknown type passes");

    assert_eq!(
        def.parts()[0].field_type(),
        &PartType::Unknown("interval".to_string())
    );
    assert_eq!(def.to_table()[0].field_type.as_deref(), Some("interval"));
}

#[test]
fn legacy_aliases_resolve_to_canonical_types() {
    let def = KeyDef::new(&[PartSpec::fieldno(1, "num"), PartSpec::fieldno(2, "str")])
        .expect("aliases");

    assert_eq!(def.parts()[0].field_type().name(), "unsigned");
    assert_eq!(def.parts()[1].field_type().name(), "string");
}

#[test]
fn path_syntax_is_not_checked_at_compile_time() {
    let def = KeyDef::new(&[PartSpec::fieldno(1, "unsigned").path("..broken")])
        .expect("lazy path validation");

    assert_eq!(def.parts()[0].path(), Some("..broken"));
}

#[test]
fn empty_path_means_top_level() {
    let def = KeyDef::new(&[PartSpec::fieldno(1, "unsigned").path("")]).expect("empty path");
    assert_eq!(def.parts()[0].path(), None);
}

#[test]
fn collation_alias_keeps_its_name() {
    let def = KeyDef::new(&[PartSpec::fieldno(1, "string").collation("ci")]).expect("ci alias");

    let collation = def.parts()[0].collation().expect("collation");
    assert_eq!(collation.name(), "ci");
}

#[test]
fn part_limit_comes_from_config() {
    let config = EngineConfig {
        max_parts: 2,
        ..EngineConfig::default()
    };
    let specs: Vec<_> = (1..=3).map(|n| PartSpec::fieldno(n, "unsigned")).collect();

    let err = KeyDef::new_with_config(&specs, &config).expect_err("too many parts");
    assert_eq!(err.message, "Too many key parts (expected at most 2, got 3)");

    KeyDef::new_with_config(&specs[..2], &config).expect("within limit");
}

#[test]
fn custom_collation_alias_from_config() {
    let mut config = EngineConfig::default();
    config
        .collations
        .insert("fold".to_string(), "unicode_ci".to_string());

    let specs = [PartSpec::fieldno(1, "string").collation("fold")];
    KeyDef::new_with_config(&specs, &config).expect("alias from config");
    KeyDef::new(&specs).expect_err("alias unknown to the default config");
}

#[test]
fn single_part_converts_with_try_from() {
    let part = KeyPart::try_from(&PartSpec::fieldno(4, "boolean").nullable()).expect("part");

    assert_eq!(part.fieldno(), 3);
    assert!(part.is_nullable());

    let err = KeyPart::try_from(&PartSpec::default()).expect_err("empty spec");
    assert_eq!(err.message, "fieldno or field must not be nil");
}

#[test]
fn compile_records_metrics() {
    metrics_reset_all();

    KeyDefTable::from_vec(vec![PartSpec::fieldno(1, "unsigned"), PartSpec::fieldno(2, "string")])
        .compile()
        .expect("compile");
    reject(&[]);

    let counters = metrics_report(None).counters.expect("counters");
    assert_eq!(counters.ops.compile_calls, 2);
    assert_eq!(counters.ops.compile_rejected, 1);
    assert_eq!(counters.ops.parts_compiled, 2);
}
