//! Denylist check for submitted comment/note text.
//!
//! Matching is a case-sensitive substring search: `"негодяйка"` is rejected
//! when `"негодяй"` is listed.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing warning attached to rejected text.
pub const PROHIBITED_CONTENT_WARNING: &str = "Не ругайтесь!";

pub const DEFAULT_BAD_WORDS: &[&str] = &["редиска", "негодяй"];

/// Rejected text, naming the first denylisted word found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProhibitedWord {
    pub word: String,
}

impl Display for ProhibitedWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PROHIBITED_CONTENT_WARNING}")
    }
}

impl Error for ProhibitedWord {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPolicy {
    bad_words: Vec<String>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BAD_WORDS.iter().map(|word| (*word).to_string()))
    }
}

impl ContentPolicy {
    /// Builds a policy; blank entries are dropped so they cannot match
    /// everything.
    pub fn new(bad_words: impl IntoIterator<Item = String>) -> Self {
        Self {
            bad_words: bad_words
                .into_iter()
                .filter(|word| !word.trim().is_empty())
                .collect(),
        }
    }

    pub fn bad_words(&self) -> &[String] {
        &self.bad_words
    }

    pub fn check(&self, text: &str) -> Result<(), ProhibitedWord> {
        match self
            .bad_words
            .iter()
            .find(|word| text.contains(word.as_str()))
        {
            Some(word) => Err(ProhibitedWord { word: word.clone() }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentPolicy, PROHIBITED_CONTENT_WARNING};

    #[test]
    fn rejects_text_containing_bad_word_as_substring() {
        let policy = ContentPolicy::default();
        let err = policy
            .check("Какой-то текст, негодяйка, еще текст")
            .expect_err("substring must be rejected");
        assert_eq!(err.word, "негодяй");
        assert_eq!(err.to_string(), PROHIBITED_CONTENT_WARNING);
    }

    #[test]
    fn match_is_case_sensitive() {
        let policy = ContentPolicy::default();
        assert!(policy.check("РЕДИСКА").is_ok());
        assert!(policy.check("редиска").is_err());
    }

    #[test]
    fn blank_entries_are_ignored() {
        let policy = ContentPolicy::new(vec![String::new(), "  ".to_string()]);
        assert!(policy.bad_words().is_empty());
        assert!(policy.check("anything").is_ok());
    }
}
