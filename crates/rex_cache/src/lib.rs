//! Bounded LRU caching of lazily compiled regular expressions.
//!
//! [`RegexCache`] maps pattern text to shared [`LazyRegex`] handles. Cache
//! admission and eviction are O(1) bookkeeping under a single lock; the
//! expensive compile step happens on first use of a handle, outside that
//! lock, so callers contending for the cache are never stalled behind a slow
//! compile. Once a configured capacity is exceeded the least recently used
//! pattern is evicted; a capacity of zero means unbounded.
//!
//! Process-wide default caches live in [`global`], deliberately kept to a
//! thin forwarding layer.

#![warn(missing_docs)]

pub mod cache;
pub mod global;
mod list;

pub use cache::RegexCache;
pub use global::DEFAULT_CAPACITY;

pub use rex_once::{CompileFn, Dialect, LazyRegex, PatternError};
