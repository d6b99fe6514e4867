//! Module: path
//! Responsibility: JSON path lexing for key parts that address nested fields.
//! Does not own: tuple traversal (see `tuple`).
//! Boundary: paths are validated lazily, on first record access.

#[cfg(test)]
mod tests;

use std::fmt;
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Wildcard token marking a multikey path.
pub const MULTIKEY_TOKEN: &str = "[*]";

/// First array index accepted inside brackets.
const INDEX_BASE: usize = 1;

///
/// PathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid JSON path '{path}': error at position {position}")]
pub struct PathError {
    pub path: String,

    /// One-based character position of the offending symbol.
    pub position: usize,
}

///
/// PathToken
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathToken<'a> {
    /// Zero-based array index.
    Num(usize),
    /// Map key.
    Str(&'a str),
    Any,
}

impl fmt::Display for PathToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(index) => write!(f, "[{}]", index + INDEX_BASE),
            Self::Str(key) => write!(f, "[\"{key}\"]"),
            Self::Any => f.write_str(MULTIKEY_TOKEN),
        }
    }
}

/// Lex `path` into tokens.
#[must_use]
pub const fn tokens(path: &str) -> PathLexer<'_> {
    PathLexer {
        src: path,
        offset: 0,
        failed: false,
    }
}

/// Validate the full syntax of `path`.
pub fn validate(path: &str) -> Result<(), PathError> {
    tokens(path).try_for_each(|token| token.map(|_| ()))
}

/// Whether `path` projects every element of an array.
///
/// Substring search, so it also matches inside quoted keys; such paths are
/// rejected as well.
#[must_use]
pub fn contains_multikey(path: &str) -> bool {
    path.contains(MULTIKEY_TOKEN)
}

/// Structural path equality: `.a`, `a` and `["a"]` are the same path.
///
/// Paths that fail to lex are compared textually.
#[must_use]
pub fn paths_equal(left: Option<&str>, right: Option<&str>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => {
            let lt: Result<Vec<_>, _> = tokens(l).collect();
            let rt: Result<Vec<_>, _> = tokens(r).collect();
            match (lt, rt) {
                (Ok(lt), Ok(rt)) => lt == rt,
                _ => l == r,
            }
        }
        _ => false,
    }
}

///
/// PathLexer
///

#[derive(Clone, Debug)]
pub struct PathLexer<'a> {
    src: &'a str,
    offset: usize,
    failed: bool,
}

impl<'a> PathLexer<'a> {
    fn error_at(&self, offset: usize) -> PathError {
        PathError {
            path: self.src.to_string(),
            position: self.src[..offset].chars().count() + 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.offset).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), PathError> {
        if self.peek() == Some(byte) {
            self.offset += 1;
            Ok(())
        } else {
            Err(self.error_at(self.offset))
        }
    }

    fn lex(&mut self) -> Result<PathToken<'a>, PathError> {
        match self.peek() {
            Some(b'[') => {
                self.offset += 1;
                self.lex_bracket()
            }
            Some(b'.') => {
                self.offset += 1;
                self.lex_ident()
            }
            // a leading identifier may omit the dot
            Some(_) if self.offset == 0 => self.lex_ident(),
            _ => Err(self.error_at(self.offset)),
        }
    }

    fn lex_ident(&mut self) -> Result<PathToken<'a>, PathError> {
        let rest = &self.src[self.offset..];
        let len = rest
            .char_indices()
            .find(|&(i, c)| !(c.is_alphanumeric() || c == '_') || (i == 0 && c.is_ascii_digit()))
            .map_or(rest.len(), |(i, _)| i);

        if len == 0 {
            return Err(self.error_at(self.offset));
        }
        self.offset += len;

        Ok(PathToken::Str(&rest[..len]))
    }

    fn lex_bracket(&mut self) -> Result<PathToken<'a>, PathError> {
        let token = match self.peek() {
            Some(b'*') => {
                self.offset += 1;
                PathToken::Any
            }
            Some(quote @ (b'"' | b'\'')) => {
                self.offset += 1;
                let rest = &self.src[self.offset..];
                let Some(len) = rest.bytes().position(|b| b == quote) else {
                    return Err(self.error_at(self.src.len()));
                };
                if len == 0 {
                    return Err(self.error_at(self.offset));
                }
                self.offset += len + 1;
                PathToken::Str(&rest[..len])
            }
            Some(b'0'..=b'9') => {
                let start = self.offset;
                let rest = &self.src[start..];
                let len = rest.bytes().take_while(u8::is_ascii_digit).count();
                let index = rest[..len]
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(INDEX_BASE))
                    .ok_or_else(|| self.error_at(start))?;
                self.offset += len;
                PathToken::Num(index)
            }
            _ => return Err(self.error_at(self.offset)),
        };

        self.expect(b']')?;

        Ok(token)
    }
}

impl<'a> Iterator for PathLexer<'a> {
    type Item = Result<PathToken<'a>, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.src.len() {
            return None;
        }

        let token = self.lex();
        if token.is_err() {
            self.failed = true;
        }

        Some(token)
    }
}
