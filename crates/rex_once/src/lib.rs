//! Lazily compiled regular expressions with compile-at-most-once semantics.
//!
//! [`LazyRegex`] holds a pattern and defers the expensive compile step until
//! the first use, guaranteeing it runs at most once no matter how many
//! threads race on the same cell. The outcome, success or failure, is the
//! cell's terminal state: later callers read it directly, and a bad pattern
//! is never recompiled.

#![warn(missing_docs)]

pub mod dialect;
pub mod error;
pub mod lazy;

pub use dialect::{CompileFn, Dialect};
pub use error::PatternError;
pub use lazy::LazyRegex;
