//! Search patterns shared between SQL and in-memory matching.

/// A LIKE-style wildcard pattern (e.g. `%wpengine.com%`).
///
/// The same pattern set drives both searches in a run: the raw form is bound
/// as a SQL `LIKE` operand, and the stripped literal form is used for
/// in-memory substring matching when building fallback snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern(String);

impl SearchPattern {
    pub fn new(like: impl Into<String>) -> Self {
        Self(like.into())
    }

    /// SQL `LIKE` operand, exactly as configured.
    pub fn as_like(&self) -> &str {
        &self.0
    }

    /// Literal substring form with the LIKE wildcard markers (`%`, `_`)
    /// stripped out.
    pub fn literal(&self) -> String {
        self.0.chars().filter(|c| *c != '%' && *c != '_').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_like_keeps_wildcards() {
        let pattern = SearchPattern::new("%wpengine.com%");
        assert_eq!(pattern.as_like(), "%wpengine.com%");
    }

    #[test]
    fn literal_strips_percent() {
        let pattern = SearchPattern::new("%wpengine.com%");
        assert_eq!(pattern.literal(), "wpengine.com");
    }

    #[test]
    fn literal_strips_underscore() {
        let pattern = SearchPattern::new("%staging_.example.%");
        assert_eq!(pattern.literal(), "staging.example.");
    }

    #[test]
    fn literal_of_plain_string_is_identity() {
        let pattern = SearchPattern::new("staging.");
        assert_eq!(pattern.literal(), "staging.");
    }
}
