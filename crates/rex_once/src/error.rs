//! The sticky compile error.

/// A regex compilation failure, pinned to the pattern that caused it.
///
/// This is the terminal state of a [`LazyRegex`](crate::LazyRegex) whose
/// pattern was rejected by the engine. The cell replays it to every resolver,
/// past and future, without ever re-attempting the compile. The original
/// pattern text is preserved for diagnostics and appears backtick-quoted in
/// the display message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to compile pattern `{pattern}`: {source}")]
pub struct PatternError {
    /// The pattern text that failed to compile.
    pattern: Box<str>,

    /// The underlying engine error.
    source: regex::Error,
}

impl PatternError {
    pub(crate) fn new(pattern: String, source: regex::Error) -> Self {
        Self {
            pattern: pattern.into_boxed_str(),
            source,
        }
    }

    /// The original pattern text that failed to compile.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The engine error that rejected the pattern.
    pub fn engine_error(&self) -> &regex::Error {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PatternError {
        let source = regex::Regex::new("a[").unwrap_err();
        PatternError::new("a[".to_string(), source)
    }

    #[test]
    fn display_quotes_pattern() {
        let err = sample();
        let msg = err.to_string();
        assert!(msg.contains("failed to compile pattern"));
        assert!(msg.contains("`a[`"));
    }

    #[test]
    fn preserves_pattern_text() {
        assert_eq!(sample().pattern(), "a[");
    }

    #[test]
    fn clone_replays_same_message() {
        let err = sample();
        assert_eq!(err.clone().to_string(), err.to_string());
    }

    #[test]
    fn source_is_the_engine_error() {
        use std::error::Error;
        let err = sample();
        assert!(err.source().is_some());
        assert_eq!(
            err.source().map(ToString::to_string),
            Some(err.engine_error().to_string())
        );
    }
}
