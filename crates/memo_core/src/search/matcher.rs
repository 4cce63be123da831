//! Client-side memo query matching.
//!
//! # Responsibility
//! - Re-validate store text matches against title/content.
//! - Match tags, which the store never searches.
//!
//! # Invariants
//! - Matching is a case-insensitive literal substring test.
//! - A blank query matches every memo.

use crate::model::memo::Memo;
use regex::{Regex, RegexBuilder};

/// Compiled case-insensitive substring matcher for one query.
#[derive(Debug, Clone)]
pub struct MemoMatcher {
    pattern: Regex,
}

impl MemoMatcher {
    /// Compiles `query` as an escaped literal.
    ///
    /// # Errors
    /// Returns the regex error when the query exceeds the compiled size limit.
    pub fn new(query: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    pub fn matches_text(&self, memo: &Memo) -> bool {
        self.pattern.is_match(&memo.title) || self.pattern.is_match(&memo.content)
    }

    pub fn matches_tags(&self, memo: &Memo) -> bool {
        memo.tags.iter().any(|tag| self.pattern.is_match(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoMatcher;
    use crate::model::category::Category;
    use crate::model::memo::Memo;

    fn memo(title: &str, content: &str, tags: &[&str]) -> Memo {
        Memo::new(
            title,
            content,
            Category::Personal,
            tags.iter().map(|tag| tag.to_string()).collect(),
        )
    }

    fn matcher(query: &str) -> MemoMatcher {
        MemoMatcher::new(query).expect("escaped query should compile")
    }

    #[test]
    fn text_matches_are_case_insensitive_on_title_and_content() {
        let matcher = matcher("MiLk");
        assert!(matcher.matches_text(&memo("Groceries", "buy milk", &[])));
        assert!(matcher.matches_text(&memo("MILK run", "", &[])));
        assert!(!matcher.matches_text(&memo("x", "y", &["milk"])));
    }

    #[test]
    fn text_matches_fold_non_ascii_case() {
        assert!(matcher("über").matches_text(&memo("Über Notizen", "", &[])));
        assert!(matcher("ПРИВЕТ").matches_text(&memo("x", "Ärger mit Привет", &[])));
    }

    #[test]
    fn tag_matches_ignore_title_and_content() {
        let matcher = matcher("milk");
        assert!(matcher.matches_tags(&memo("x", "y", &["Milkshake"])));
        assert!(!matcher.matches_tags(&memo("milk", "milk", &["bread"])));
    }

    #[test]
    fn regex_metacharacters_match_literally() {
        let matcher = matcher("a.c");
        assert!(!matcher.matches_text(&memo("abc", "", &[])));
        assert!(matcher.matches_text(&memo("a.c", "", &[])));
    }

    #[test]
    fn blank_query_matches_everything() {
        let matcher = matcher("");
        assert!(matcher.matches_text(&memo("anything", "", &[])));
        assert!(matcher.matches_tags(&memo("anything", "", &["t"])));
    }
}
