//! Board configuration loader (strict YAML parsing).
//!
//! # Invariants
//! - Unknown keys are rejected.
//! - A loaded config has passed `validate()`.

use crate::model::note::NOTE_SLUG_MAX_CHARS;
use crate::policy::content::{ContentPolicy, DEFAULT_BAD_WORDS};
use crate::policy::listing::{ListingPolicy, DEFAULT_HOME_PAGE_SIZE};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const HOME_PAGE_SIZE_RANGE: std::ops::RangeInclusive<usize> = 1..=100;

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(serde_yaml::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "read config failed: {err}"),
            Self::Parse(err) => write!(f, "invalid yaml: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    #[serde(default = "default_news_count_on_home_page")]
    pub news_count_on_home_page: usize,

    #[serde(default = "default_bad_words")]
    pub bad_words: Vec<String>,

    #[serde(default = "default_slug_max_length")]
    pub slug_max_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            news_count_on_home_page: default_news_count_on_home_page(),
            bad_words: default_bad_words(),
            slug_max_length: default_slug_max_length(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !HOME_PAGE_SIZE_RANGE.contains(&self.news_count_on_home_page) {
            return Err(ConfigError::Invalid(format!(
                "news_count_on_home_page must be between {} and {}",
                HOME_PAGE_SIZE_RANGE.start(),
                HOME_PAGE_SIZE_RANGE.end()
            )));
        }
        if self.bad_words.iter().any(|word| word.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "bad_words entries must not be empty".into(),
            ));
        }
        if !(1..=NOTE_SLUG_MAX_CHARS).contains(&self.slug_max_length) {
            return Err(ConfigError::Invalid(format!(
                "slug_max_length must be between 1 and {NOTE_SLUG_MAX_CHARS}"
            )));
        }
        Ok(())
    }

    pub fn listing_policy(&self) -> ListingPolicy {
        ListingPolicy::new(self.news_count_on_home_page)
    }

    pub fn content_policy(&self) -> ContentPolicy {
        ContentPolicy::new(self.bad_words.iter().cloned())
    }
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<BoardConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<BoardConfig, ConfigError> {
    let cfg: BoardConfig = serde_yaml::from_str(s).map_err(ConfigError::Parse)?;
    cfg.validate()?;
    Ok(cfg)
}

fn default_news_count_on_home_page() -> usize {
    DEFAULT_HOME_PAGE_SIZE
}
fn default_bad_words() -> Vec<String> {
    DEFAULT_BAD_WORDS.iter().map(|word| (*word).to_string()).collect()
}
fn default_slug_max_length() -> usize {
    NOTE_SLUG_MAX_CHARS
}

#[cfg(test)]
mod tests {
    use super::{load_from_file, load_from_str, BoardConfig, ConfigError};
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = load_from_str("{}").expect("defaults should load");
        assert_eq!(cfg, BoardConfig::default());
        assert_eq!(cfg.listing_policy().home_page_size(), 10);
        assert_eq!(cfg.content_policy().bad_words().len(), 2);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = load_from_str(
            "news_count_on_home_page: 5\nbad_words: [\"dang\"]\nslug_max_length: 20\n",
        )
        .expect("valid config");
        assert_eq!(cfg.news_count_on_home_page, 5);
        assert_eq!(cfg.bad_words, vec!["dang".to_string()]);
        assert_eq!(cfg.slug_max_length, 20);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_from_str("page_size: 3\n").expect_err("unknown key must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_page_size_is_rejected() {
        let err = load_from_str("news_count_on_home_page: 0\n").expect_err("zero must fail");
        assert!(err.to_string().contains("news_count_on_home_page"));
    }

    #[test]
    fn blank_bad_word_is_rejected() {
        let err = load_from_str("bad_words: [\" \"]\n").expect_err("blank word must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "news_count_on_home_page: 3").expect("write config");
        let cfg = load_from_file(file.path()).expect("config file should load");
        assert_eq!(cfg.news_count_on_home_page, 3);
    }
}
