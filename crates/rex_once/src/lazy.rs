//! The compile-at-most-once regex cell.

use std::mem;
use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;

use crate::dialect::{CompileFn, Dialect};
use crate::error::PatternError;

/// A regular expression that is compiled on first use, at most once.
///
/// The cell is created unresolved and cheap: construction never touches the
/// engine. The first call to [`resolve`](LazyRegex::resolve) runs the compile
/// capability exactly once; callers arriving while that compile is in flight
/// block until it finishes, and every caller then observes the same terminal
/// result. A compile failure is as terminal as a success: the error is kept,
/// replayed to all later resolvers, and never retried.
///
/// On success the pattern seed is dropped (the compiled [`Regex`] carries its
/// own copy of the source text); on failure the original pattern survives
/// inside the [`PatternError`] for diagnostics.
#[derive(Debug)]
pub struct LazyRegex {
    /// Pattern text and compile capability, consumed by the first resolver.
    seed: Mutex<Seed>,

    /// Terminal state: written once, read-only forever after.
    slot: OnceLock<Result<Regex, PatternError>>,
}

#[derive(Debug)]
struct Seed {
    pattern: String,
    compile: CompileFn,
}

impl LazyRegex {
    /// Creates an unresolved cell for the standard dialect.
    ///
    /// Does not compile. An invalid pattern is only reported by the first
    /// [`resolve`](LazyRegex::resolve).
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_compile_fn(pattern, Dialect::Standard.compile_fn())
    }

    /// Creates an unresolved cell that treats `pattern` as a fixed string.
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::with_compile_fn(pattern, Dialect::Literal.compile_fn())
    }

    /// Creates an unresolved cell with a custom compile capability.
    pub fn with_compile_fn(pattern: impl Into<String>, compile: CompileFn) -> Self {
        let cell = Self {
            seed: Mutex::new(Seed {
                pattern: pattern.into(),
                compile,
            }),
            slot: OnceLock::new(),
        };
        #[cfg(feature = "eager-validation")]
        if let Err(err) = cell.resolve() {
            panic!("{err}");
        }
        cell
    }

    /// Compiles the pattern if no terminal state exists yet, then returns it.
    ///
    /// Safe to call from any number of threads holding the same cell; the
    /// compile capability runs at most once and everyone reads the one
    /// shared outcome.
    pub fn resolve(&self) -> Result<&Regex, &PatternError> {
        self.slot
            .get_or_init(|| {
                let mut seed = self.seed.lock().unwrap_or_else(PoisonError::into_inner);
                let pattern = mem::take(&mut seed.pattern);
                match (seed.compile)(&pattern) {
                    Ok(re) => Ok(re),
                    Err(err) => Err(PatternError::new(pattern, err)),
                }
            })
            .as_ref()
    }

    /// Returns `true` once the cell holds its terminal state.
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The pattern source text. Forces resolution.
    ///
    /// For the literal dialect this is the escaped source actually handed to
    /// the engine, not the text the cell was built from.
    pub fn pattern(&self) -> &str {
        match self.resolve() {
            Ok(re) => re.as_str(),
            Err(err) => err.pattern(),
        }
    }

    /// Resolves, then reports whether `haystack` contains a match.
    pub fn is_match(&self, haystack: &str) -> Result<bool, &PatternError> {
        Ok(self.resolve()?.is_match(haystack))
    }

    /// Resolves, then returns the leftmost match in `haystack`, if any.
    pub fn find<'h>(&self, haystack: &'h str) -> Result<Option<regex::Match<'h>>, &PatternError> {
        Ok(self.resolve()?.find(haystack))
    }
}
