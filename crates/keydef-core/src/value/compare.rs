use crate::{collation::Collation, value::ValueRef};
use keydef_primitives::CompareStrategy;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;

///
/// CONSTANTS
///

/// 2^127, the first float magnitude outside the i128 range.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Compare two decoded values with the ordering routine of one key part.
///
/// Values that do not match the strategy (possible only for unvalidated key
/// elements) fall back to scalar ordering, so the result is always total.
pub(crate) fn compare_with_strategy(
    strategy: CompareStrategy,
    collation: Option<&Collation>,
    left: &ValueRef<'_>,
    right: &ValueRef<'_>,
) -> Ordering {
    let typed = match strategy {
        CompareStrategy::Numeric => match (Number::of(left), Number::of(right)) {
            (Some(a), Some(b)) => Some(a.total_cmp(&b)),
            _ => None,
        },
        CompareStrategy::Text => match (left, right) {
            (ValueRef::Str(a), ValueRef::Str(b)) => Some(compare_text(collation, a, b)),
            _ => None,
        },
        CompareStrategy::Bool => match (left, right) {
            (ValueRef::Bool(a), ValueRef::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        },
        CompareStrategy::Binary => match (left, right) {
            (ValueRef::Bin(a), ValueRef::Bin(b)) => Some(a.cmp(b)),
            _ => None,
        },
        CompareStrategy::Uuid => match (left, right) {
            (ValueRef::Uuid(a), ValueRef::Uuid(b)) => Some(a.cmp(b)),
            _ => None,
        },
        CompareStrategy::Datetime => match (left, right) {
            (ValueRef::Datetime(a), ValueRef::Datetime(b)) => Some(a.instant().cmp(&b.instant())),
            _ => None,
        },
        CompareStrategy::Scalar => None,
    };

    typed.unwrap_or_else(|| compare_scalar(collation, left, right))
}

/// Total ordering across every value kind.
///
/// Ordering rules:
/// 1. Value class rank
/// 2. Class-specific comparison for same-class values
pub(crate) fn compare_scalar(
    collation: Option<&Collation>,
    left: &ValueRef<'_>,
    right: &ValueRef<'_>,
) -> Ordering {
    let rank = left.kind().class().cmp(&right.kind().class());
    if rank != Ordering::Equal {
        return rank;
    }

    compare_same_class(collation, left, right)
}

fn compare_same_class(
    collation: Option<&Collation>,
    left: &ValueRef<'_>,
    right: &ValueRef<'_>,
) -> Ordering {
    #[allow(clippy::match_same_arms)]
    match (left, right) {
        (ValueRef::Nil, ValueRef::Nil) => Ordering::Equal,
        (ValueRef::Bool(a), ValueRef::Bool(b)) => a.cmp(b),
        (ValueRef::Str(a), ValueRef::Str(b)) => compare_text(collation, a, b),
        (ValueRef::Bin(a), ValueRef::Bin(b)) => a.cmp(b),
        (ValueRef::Uuid(a), ValueRef::Uuid(b)) => a.cmp(b),
        (ValueRef::Datetime(a), ValueRef::Datetime(b)) => a.instant().cmp(&b.instant()),
        (
            ValueRef::Ext {
                type_id: ta,
                data: da,
            },
            ValueRef::Ext {
                type_id: tb,
                data: db,
            },
        ) => ta.cmp(tb).then_with(|| da.cmp(db)),
        (ValueRef::Array(a), ValueRef::Array(b)) => a.cmp(b),
        (ValueRef::Map(a), ValueRef::Map(b)) => a.cmp(b),
        _ => match (Number::of(left), Number::of(right)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            // same class implies both are numbers
            _ => Ordering::Equal,
        },
    }
}

fn compare_text(collation: Option<&Collation>, left: &[u8], right: &[u8]) -> Ordering {
    match collation {
        Some(collation) => collation.compare(left, right),
        None => left.cmp(right),
    }
}

///
/// Number
///
/// Widened numeric view used for cross-encoding comparison.
///

#[derive(Clone, Copy, Debug)]
enum Number {
    Int(i128),
    Float(f64),
    Decimal(Decimal),
}

impl Number {
    fn of(value: &ValueRef<'_>) -> Option<Self> {
        match *value {
            ValueRef::Uint(v) => Some(Self::Int(i128::from(v))),
            ValueRef::Int(v) => Some(Self::Int(i128::from(v))),
            ValueRef::Float(v) => Some(Self::Float(f64::from(v))),
            ValueRef::Double(v) => Some(Self::Float(v)),
            ValueRef::Decimal(v) => Some(Self::Decimal(v)),
            _ => None,
        }
    }

    /// NaN sorts below every other number and equal to itself.
    fn total_cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(&b),
            (Self::Float(a), Self::Float(b)) => compare_floats(a, b),
            (Self::Decimal(a), Self::Decimal(b)) => a.cmp(&b),
            (Self::Int(a), Self::Float(b)) => compare_int_float(a, b),
            (Self::Float(a), Self::Int(b)) => compare_int_float(b, a).reverse(),
            (Self::Int(a), Self::Decimal(b)) => compare_int_decimal(a, &b),
            (Self::Decimal(a), Self::Int(b)) => compare_int_decimal(b, &a).reverse(),
            (Self::Float(a), Self::Decimal(b)) => compare_float_decimal(a, &b),
            (Self::Decimal(a), Self::Float(b)) => compare_float_decimal(b, &a).reverse(),
        }
    }
}

fn compare_floats(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

// Exact: the float is split into integral and fractional parts instead of
// rounding the integer into a float.
#[allow(clippy::cast_possible_truncation)]
fn compare_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return Ordering::Greater;
    }

    let trunc = float.trunc();
    if trunc >= I128_BOUND {
        return Ordering::Less;
    }
    if trunc < -I128_BOUND {
        return Ordering::Greater;
    }

    match int.cmp(&(trunc as i128)) {
        Ordering::Equal => trunc.partial_cmp(&float).unwrap_or(Ordering::Equal),
        other => other,
    }
}

fn compare_int_decimal(int: i128, decimal: &Decimal) -> Ordering {
    match Decimal::try_from_i128_with_scale(int, 0) {
        Ok(int) => int.cmp(decimal),
        Err(_) if int < 0 => Ordering::Less,
        Err(_) => Ordering::Greater,
    }
}

fn compare_float_decimal(float: f64, decimal: &Decimal) -> Ordering {
    if float.is_nan() {
        return Ordering::Less;
    }

    match Decimal::from_f64(float) {
        Some(float) => float.cmp(decimal),
        None if float < 0.0 => Ordering::Less,
        None => Ordering::Greater,
    }
}
