#[cfg(test)]
mod tests;

use crate::config::EngineConfig;
use std::{borrow::Cow, cmp::Ordering, fmt};

///
/// CollationKind
///
/// Built-in string ordering routines.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CollationKind {
    Binary,
    Unicode,
    UnicodeCi,
}

impl CollationKind {
    #[must_use]
    pub fn from_builtin(name: &str) -> Option<Self> {
        match name {
            "none" | "binary" => Some(Self::Binary),
            "unicode" => Some(Self::Unicode),
            "unicode_ci" => Some(Self::UnicodeCi),
            _ => None,
        }
    }
}

///
/// Collation
///
/// A resolved collation keeps the name it was requested with so that
/// definitions serialize back to the same table.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collation {
    name: String,
    kind: CollationKind,
}

impl Collation {
    #[must_use]
    pub fn resolve(name: &str, config: &EngineConfig) -> Option<Self> {
        config.collation_kind(name).map(|kind| Self {
            name: name.to_string(),
            kind,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> CollationKind {
        self.kind
    }

    /// Order two encoded strings. Invalid UTF-8 is compared lossily.
    #[must_use]
    pub fn compare(&self, left: &[u8], right: &[u8]) -> Ordering {
        match self.kind {
            CollationKind::Binary => left.cmp(right),
            CollationKind::UnicodeCi => {
                let (left, right) = (text(left), text(right));
                fold_ci(&left).cmp(&fold_ci(&right))
            }
            CollationKind::Unicode => {
                let (l, r) = (text(left), text(right));

                // lowercase sorts before uppercase on a case-only difference
                fold_ci(&l)
                    .cmp(&fold_ci(&r))
                    .then_with(|| case_marks(&l).cmp(case_marks(&r)))
                    .then_with(|| left.cmp(right))
            }
        }
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn case_marks(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

fn fold_ci(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        if !s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Borrowed(s);
        }
        return Cow::Owned(s.to_ascii_lowercase());
    }

    Cow::Owned(s.to_lowercase())
}
