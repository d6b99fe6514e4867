use super::*;

fn resolve(name: &str) -> Collation {
    Collation::resolve(name, &EngineConfig::default()).expect("collation should resolve")
}

#[test]
fn builtin_names_resolve() {
    assert_eq!(resolve("none").kind(), CollationKind::Binary);
    assert_eq!(resolve("binary").kind(), CollationKind::Binary);
    assert_eq!(resolve("unicode").kind(), CollationKind::Unicode);
    assert_eq!(resolve("unicode_ci").kind(), CollationKind::UnicodeCi);
    assert!(Collation::resolve("klingon", &EngineConfig::default()).is_none());
}

#[test]
fn alias_keeps_requested_name() {
    let ci = resolve("ci");

    assert_eq!(ci.kind(), CollationKind::UnicodeCi);
    assert_eq!(ci.name(), "ci");
    assert_eq!(ci.to_string(), "ci");
}

#[test]
fn unicode_ci_ignores_case() {
    let ci = resolve("unicode_ci");

    assert_eq!(ci.compare(b"Hello", b"hELLO"), Ordering::Equal);
    assert_eq!(ci.compare("ÄBC".as_bytes(), "äbc".as_bytes()), Ordering::Equal);
    assert_eq!(ci.compare(b"abc", b"ABD"), Ordering::Less);
}

#[test]
fn unicode_breaks_case_ties_lowercase_first() {
    let unicode = resolve("unicode");

    assert_eq!(unicode.compare(b"a", b"A"), Ordering::Less);
    assert_eq!(unicode.compare(b"A", b"b"), Ordering::Less);
    assert_eq!(unicode.compare(b"abc", b"abc"), Ordering::Equal);
}

#[test]
fn binary_is_bytewise() {
    let binary = resolve("binary");

    assert_eq!(binary.compare(b"B", b"a"), Ordering::Less);
}
