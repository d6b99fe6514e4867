use crate::{
    key_def::{KeyDef, PartSpec},
    tuple::Tuple,
    value::Value,
};

/// Build a tuple from owned values.
pub(crate) fn tuple(values: impl IntoIterator<Item = Value>) -> Tuple {
    let values: Vec<Value> = values.into_iter().collect();
    Tuple::try_from(values).expect("test tuple should encode")
}

/// Encode a key array from owned values.
pub(crate) fn key(values: impl IntoIterator<Item = Value>) -> Vec<u8> {
    Value::Array(values.into_iter().collect())
        .to_bytes()
        .expect("test key should encode")
}

/// Compile a definition that is expected to be valid.
pub(crate) fn key_def(specs: &[PartSpec]) -> KeyDef {
    KeyDef::new(specs).expect("test key def should compile")
}

/// Encode a map with string keys.
pub(crate) fn map(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (Value::from(k), v))
            .collect(),
    )
}
