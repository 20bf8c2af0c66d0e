//! Process-wide default caches.
//!
//! A thin convenience layer over [`RegexCache`] for code that just wants a
//! pattern compiled somewhere cheap. Two fixed-capacity caches are created
//! lazily, one per dialect, and the free functions here forward to them.
//! Anything beyond that — custom capacities, custom compile capabilities,
//! lifetime control — should construct and own its own [`RegexCache`].

use std::sync::{Arc, OnceLock};

use regex::Regex;
use rex_once::{Dialect, LazyRegex, PatternError};

use crate::cache::RegexCache;

/// Capacity of each process-wide default cache.
pub const DEFAULT_CAPACITY: usize = 256;

static STANDARD: OnceLock<RegexCache> = OnceLock::new();
static LITERAL: OnceLock<RegexCache> = OnceLock::new();

fn standard() -> &'static RegexCache {
    STANDARD.get_or_init(|| RegexCache::new(DEFAULT_CAPACITY))
}

fn literal() -> &'static RegexCache {
    LITERAL.get_or_init(|| RegexCache::with_dialect(DEFAULT_CAPACITY, Dialect::Literal))
}

/// Compiles `pattern` through the default standard-dialect cache.
pub fn compile(pattern: &str) -> Result<Regex, PatternError> {
    standard().compile(pattern)
}

/// Returns the shared handle for `pattern` from the default standard-dialect
/// cache, admitting it on a miss.
pub fn get(pattern: &str) -> Arc<LazyRegex> {
    standard().get(pattern)
}

/// Number of patterns resident in the default standard-dialect cache.
pub fn len() -> usize {
    standard().len()
}

/// Capacity of the default standard-dialect cache.
pub fn capacity() -> usize {
    standard().capacity()
}

/// Changes the capacity of the default standard-dialect cache, returning the
/// previous value.
pub fn set_capacity(capacity: usize) -> usize {
    standard().set_capacity(capacity)
}

/// Compiles `pattern` as a fixed string through the default literal-dialect
/// cache.
pub fn compile_literal(pattern: &str) -> Result<Regex, PatternError> {
    literal().compile(pattern)
}

/// Returns the shared handle for `pattern` from the default literal-dialect
/// cache, admitting it on a miss.
pub fn get_literal(pattern: &str) -> Arc<LazyRegex> {
    literal().get(pattern)
}

/// Number of patterns resident in the default literal-dialect cache.
pub fn len_literal() -> usize {
    literal().len()
}

/// Capacity of the default literal-dialect cache.
pub fn capacity_literal() -> usize {
    literal().capacity()
}

/// Changes the capacity of the default literal-dialect cache, returning the
/// previous value.
pub fn set_capacity_literal(capacity: usize) -> usize {
    literal().set_capacity(capacity)
}
