//! Listing rules: subset and order of records shown to a principal.
//!
//! # Invariants
//! - Home listing: at most `home_page_size` news items, `date` descending.
//! - Comment thread: `created_at` ascending.
//! - Owner-scoped notes: only the principal's own notes; anonymous gets none.
//! - Sorting is stable, so equal keys keep the input (insertion) order.

use crate::model::news::{Comment, NewsItem};
use crate::model::note::Note;
use crate::model::principal::Principal;
use std::cmp::Reverse;

pub const DEFAULT_HOME_PAGE_SIZE: usize = 10;

/// Listing rule set parameterized by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    home_page_size: usize,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_HOME_PAGE_SIZE)
    }
}

impl ListingPolicy {
    pub fn new(home_page_size: usize) -> Self {
        Self { home_page_size }
    }

    pub fn home_page_size(&self) -> usize {
        self.home_page_size
    }

    /// Newest `home_page_size` news items, newest date first.
    pub fn home(&self, mut items: Vec<NewsItem>) -> Vec<NewsItem> {
        items.sort_by_key(|item| Reverse(item.date));
        items.truncate(self.home_page_size);
        items
    }

    /// Comments of one news item, oldest first.
    pub fn comment_thread(&self, mut comments: Vec<Comment>) -> Vec<Comment> {
        comments.sort_by_key(|comment| comment.created_at);
        comments
    }

    /// Notes visible to `principal`.
    pub fn owner_scoped(&self, principal: &Principal, notes: Vec<Note>) -> Vec<Note> {
        let Some(user_id) = principal.user_id() else {
            return Vec::new();
        };
        notes
            .into_iter()
            .filter(|note| note.author == user_id)
            .collect()
    }
}
