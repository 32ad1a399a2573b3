//! News items and their comment threads.
//!
//! # Invariants
//! - `NewsItem::date` is a calendar date in years `0000..=9999`; home
//!   ordering uses it descending.
//! - `Comment::created_at` is epoch milliseconds; thread ordering uses it
//!   ascending.
//! - `Comment::author` and `Comment::news_id` are fixed at creation.

use crate::model::user::UserId;
use crate::model::{require_max_chars, require_text, ValidationError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NewsId = Uuid;
pub type CommentId = Uuid;

const NEWS_TITLE_MAX_CHARS: usize = 50;
const NEWS_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Published news item. Created by site editors, not by principals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, text: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
            date,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_max_chars("title", &self.title, NEWS_TITLE_MAX_CHARS)?;
        require_text("text", &self.text)?;
        if !NEWS_YEARS.contains(&self.date.year()) {
            return Err(ValidationError::DateOutOfRange(self.date));
        }
        Ok(())
    }
}

/// Reader comment attached to one news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub news_id: NewsId,
    pub author: UserId,
    pub text: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Comment {
    pub fn new(
        news_id: NewsId,
        author: UserId,
        text: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            news_id,
            author,
            text: text.into(),
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("text", &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::NewsItem;
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn news_on(year: i32) -> NewsItem {
        let date = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date");
        NewsItem::new("Заголовок", "Текст", date)
    }

    #[test]
    fn accepts_four_digit_years() {
        assert!(news_on(0).validate().is_ok());
        assert!(news_on(2024).validate().is_ok());
        assert!(news_on(9999).validate().is_ok());
    }

    #[test]
    fn rejects_years_that_break_text_ordering() {
        for year in [-1, 10_000] {
            let news = news_on(year);
            assert_eq!(
                news.validate(),
                Err(ValidationError::DateOutOfRange(news.date))
            );
        }
    }
}
