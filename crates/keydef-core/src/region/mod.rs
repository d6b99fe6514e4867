//! Module: region
//! Responsibility: per-thread bump scratch buffer for key assembly.
//! Does not own: the lifetime of produced keys; callers copy bytes out
//! before the scope ends.
//! Boundary: every scope truncates back to its savepoint on drop.

#[cfg(test)]
mod tests;

use crate::{
    config::{self, RegionConfig},
    error::{ErrorOrigin, KeyDefError},
};
use std::cell::RefCell;

///
/// CONSTANTS
///

const ALLOCATOR: &str = "region";

thread_local! {
    static REGION: RefCell<Region> = RefCell::new(Region::new(&config::current().region));
}

///
/// Region
///

#[derive(Debug)]
pub struct Region {
    buf: Vec<u8>,
    max_bytes: usize,
    high_water: usize,
}

impl Region {
    #[must_use]
    pub fn new(config: &RegionConfig) -> Self {
        Self {
            buf: Vec::with_capacity(config.initial_capacity),
            max_bytes: config.max_bytes,
            high_water: 0,
        }
    }

    #[must_use]
    pub const fn with_limit(max_bytes: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_bytes,
            high_water: 0,
        }
    }

    /// Bytes currently held by open scopes.
    #[must_use]
    pub const fn used(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub const fn high_water(&self) -> usize {
        self.high_water
    }

    /// Open a scope at the current savepoint.
    pub fn scope(&mut self) -> RegionScope<'_> {
        let savepoint = self.buf.len();

        RegionScope {
            region: self,
            savepoint,
        }
    }
}

///
/// RegionScope
///
/// Guard over a region savepoint. Bytes written through the scope are
/// discarded when it drops, on every exit path.
///

#[derive(Debug)]
pub struct RegionScope<'r> {
    region: &'r mut Region,
    savepoint: usize,
}

impl RegionScope<'_> {
    pub fn write_bytes(&mut self, bytes: &[u8], purpose: &'static str) -> Result<(), KeyDefError> {
        let region = &mut *self.region;
        let size = bytes.len();
        let out_of_memory =
            || KeyDefError::out_of_memory(ErrorOrigin::Extract, size, ALLOCATOR, purpose);

        let needed = region.buf.len().checked_add(size).ok_or_else(out_of_memory)?;
        if needed > region.max_bytes {
            return Err(out_of_memory());
        }
        region.buf.try_reserve(size).map_err(|_| out_of_memory())?;
        region.buf.extend_from_slice(bytes);
        region.high_water = region.high_water.max(needed);

        Ok(())
    }

    /// Bytes written since this scope opened.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.region.buf[self.savepoint..]
    }
}

impl Drop for RegionScope<'_> {
    fn drop(&mut self) {
        self.region.buf.truncate(self.savepoint);
    }
}

/// Run `f` with a scope on this thread's region.
///
/// A re-entrant call finds the region borrowed and gets a temporary one.
pub fn with_scope<T>(f: impl FnOnce(&mut RegionScope<'_>) -> T) -> T {
    REGION.with(|cell| match cell.try_borrow_mut() {
        Ok(mut region) => f(&mut region.scope()),
        Err(_) => {
            let mut temp = Region::new(&config::current().region);
            f(&mut temp.scope())
        }
    })
}

/// Bytes held by open scopes on this thread's region.
#[must_use]
pub fn used() -> usize {
    REGION.with(|cell| cell.try_borrow().map_or(0, |region| region.used()))
}
