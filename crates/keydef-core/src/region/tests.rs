use super::*;
use crate::error::{ErrorClass, ErrorDetail};

#[test]
fn scope_rolls_back_on_drop() {
    let mut region = Region::with_limit(1024);

    {
        let mut scope = region.scope();
        scope.write_bytes(b"abc", "test").expect("write");
        assert_eq!(scope.bytes(), b"abc");
    }

    assert_eq!(region.used(), 0);
    assert_eq!(region.high_water(), 3);
}

#[test]
fn nested_scopes_see_only_their_bytes() {
    let mut region = Region::with_limit(1024);
    let mut outer = region.scope();
    outer.write_bytes(b"ab", "outer").expect("outer write");

    let mut inner_region = Region::with_limit(16);
    let mut inner = inner_region.scope();
    inner.write_bytes(b"cd", "inner").expect("inner write");

    assert_eq!(outer.bytes(), b"ab");
    assert_eq!(inner.bytes(), b"cd");
}

#[test]
fn limit_is_enforced_as_out_of_memory() {
    let mut region = Region::with_limit(4);
    let mut scope = region.scope();
    scope.write_bytes(b"abcd", "fill").expect("exact fit");

    let err = scope.write_bytes(b"e", "key field").expect_err("over limit");
    assert_eq!(err.class, ErrorClass::OutOfMemory);
    assert_eq!(
        err.detail,
        Some(ErrorDetail::Allocation {
            size: 1,
            allocator: "region",
            purpose: "key field",
        })
    );
    assert_eq!(err.message, "Failed to allocate 1 bytes in region for key field");
}

#[test]
fn thread_region_is_empty_after_scope() {
    let len = with_scope(|scope| {
        scope.write_bytes(b"hello", "test").expect("write");
        assert_eq!(used(), 0, "region is borrowed inside the scope");
        scope.bytes().len()
    });

    assert_eq!(len, 5);
    assert_eq!(used(), 0);
}

#[test]
fn reentrant_scope_uses_temporary_region() {
    let inner = with_scope(|outer| {
        outer.write_bytes(b"x", "outer").expect("outer write");
        with_scope(|inner| {
            inner.write_bytes(b"yz", "inner").expect("inner write");
            inner.bytes().to_vec()
        })
    });

    assert_eq!(inner, b"yz");
}

#[test]
fn region_from_config_uses_its_limit() {
    let region = Region::new(&RegionConfig {
        initial_capacity: 8,
        max_bytes: 8,
    });

    assert_eq!(region.used(), 0);
    assert_eq!(region.max_bytes, 8);
}
