//! Pattern dialects and the pluggable compile capability.

use regex::Regex;

/// The compile capability used by a [`LazyRegex`](crate::LazyRegex).
///
/// Takes the pattern source text and returns the compiled regex or the
/// engine's error. The function must be callable without external
/// synchronization; the lazy cell supplies the once-semantics, so a given
/// cell invokes its capability at most once.
pub type CompileFn = fn(&str) -> Result<Regex, regex::Error>;

/// How pattern text is interpreted when it is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// The full regex syntax of the `regex` crate.
    #[default]
    Standard,

    /// The pattern is a fixed string; every metacharacter matches itself.
    Literal,
}

impl Dialect {
    /// Returns the compile function implementing this dialect.
    pub fn compile_fn(self) -> CompileFn {
        match self {
            Dialect::Standard => compile_standard,
            Dialect::Literal => compile_literal,
        }
    }
}

fn compile_standard(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)
}

fn compile_literal(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&regex::escape(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_compiles_metacharacters() {
        let re = Dialect::Standard.compile_fn()("a.c").unwrap();
        assert!(re.is_match("abc"));
        assert!(re.is_match("a.c"));
    }

    #[test]
    fn literal_escapes_metacharacters() {
        let re = Dialect::Literal.compile_fn()("a.c").unwrap();
        assert!(re.is_match("a.c"));
        assert!(!re.is_match("abc"));
    }

    #[test]
    fn literal_never_rejects() {
        // Metacharacter soup is a valid fixed string once escaped.
        assert!(Dialect::Literal.compile_fn()("*[(+").is_ok());
    }

    #[test]
    fn standard_rejects_invalid_syntax() {
        assert!(Dialect::Standard.compile_fn()("*").is_err());
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(Dialect::default(), Dialect::Standard);
    }
}
