use regex::Regex;

use crate::error::BuildError;

pub const DEFAULT_MAX_WORD_LEN: usize = 24;
pub const DEFAULT_WORD_PATTERN: &str = "^[a-z]+$";

/// Acceptance rules for candidate words.
///
/// The defaults are what existing consumers of `words.txt` expect; changing
/// them changes the shape of the output file.
#[derive(Debug, Clone)]
pub struct WordPolicy {
    max_len: usize,
    pattern: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Empty,
    TooLong,
    PatternMismatch,
}

impl WordPolicy {
    pub fn new(max_len: usize, pattern: &str) -> Result<Self, BuildError> {
        if max_len == 0 {
            return Err(BuildError::InvalidMaxLen);
        }

        let pattern = Regex::new(pattern).map_err(|source| BuildError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self { max_len, pattern })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn judge(&self, candidate: &str) -> Verdict {
        if candidate.is_empty() {
            return Verdict::Empty;
        }
        // Length is counted in characters, not bytes.
        if candidate.chars().count() > self.max_len {
            return Verdict::TooLong;
        }
        if !self.pattern.is_match(candidate) {
            return Verdict::PatternMismatch;
        }
        Verdict::Accepted
    }

    pub fn accepts(&self, candidate: &str) -> bool {
        self.judge(candidate) == Verdict::Accepted
    }
}

impl Default for WordPolicy {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_WORD_LEN,
            pattern: Regex::new(DEFAULT_WORD_PATTERN).expect("default word pattern is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_accepts_plain_lowercase() {
        let policy = WordPolicy::default();
        assert!(policy.accepts("apple"));
        assert!(policy.accepts("a"));
    }

    #[test]
    fn default_policy_rejects_non_letters() {
        let policy = WordPolicy::default();
        for bad in ["123", "a-b", "don't", "ice cream", "Apple", "café", ""] {
            assert!(!policy.accepts(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn length_boundary_is_inclusive() {
        let policy = WordPolicy::default();
        let at_limit = "a".repeat(24);
        let over_limit = "a".repeat(25);

        assert_eq!(policy.judge(&at_limit), Verdict::Accepted);
        assert_eq!(policy.judge(&over_limit), Verdict::TooLong);
    }

    #[test]
    fn verdicts_are_reported_in_order() {
        let policy = WordPolicy::new(3, "^[a-z]+$").unwrap();
        assert_eq!(policy.judge(""), Verdict::Empty);
        assert_eq!(policy.judge("a1b2"), Verdict::TooLong);
        assert_eq!(policy.judge("a1"), Verdict::PatternMismatch);
        assert_eq!(policy.judge("abc"), Verdict::Accepted);
    }

    #[test]
    fn custom_pattern_is_honored() {
        let policy = WordPolicy::new(10, "^[a-z']+$").unwrap();
        assert!(policy.accepts("don't"));
        assert_eq!(policy.pattern(), "^[a-z']+$");
        assert_eq!(policy.max_len(), 10);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(matches!(
            WordPolicy::new(24, "[a-z"),
            Err(BuildError::InvalidPattern { .. })
        ));
        assert!(matches!(
            WordPolicy::new(0, DEFAULT_WORD_PATTERN),
            Err(BuildError::InvalidMaxLen)
        ));
    }
}
