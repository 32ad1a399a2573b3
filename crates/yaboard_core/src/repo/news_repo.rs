//! News/comment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist news items and the comments attached to them.
//! - Provide ordered read primitives for home page and comment threads.
//!
//! # Invariants
//! - News lists are ordered by `date DESC, rowid ASC`.
//! - Comment threads are ordered by `created_at ASC, rowid ASC`.
//! - Comment updates only touch `text`; author and parent are immutable.

use crate::model::news::{Comment, CommentId, NewsId, NewsItem};
use crate::repo::{ensure_tables, parse_uuid, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const NEWS_SELECT_SQL: &str = "SELECT uuid, title, text, date FROM news";
const COMMENT_SELECT_SQL: &str = "SELECT uuid, news_uuid, author_uuid, text, created_at FROM comments";

/// Repository interface for news and comment persistence.
pub trait NewsRepository {
    fn create_news(&self, news: &NewsItem) -> RepoResult<NewsId>;
    fn get_news(&self, id: NewsId) -> RepoResult<Option<NewsItem>>;
    /// Lists at most `limit` news items, newest date first.
    fn list_news(&self, limit: usize) -> RepoResult<Vec<NewsItem>>;
    fn create_comment(&self, comment: &Comment) -> RepoResult<CommentId>;
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Replaces comment text.
    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()>;
    fn delete_comment(&self, id: CommentId) -> RepoResult<()>;
    /// Lists all comments of one news item, oldest first.
    fn list_comments(&self, news_id: NewsId) -> RepoResult<Vec<Comment>>;
    fn count_comments(&self) -> RepoResult<u64>;
}

/// SQLite-backed news/comment repository.
pub struct SqliteNewsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNewsRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["news", "comments"])?;
        Ok(Self { conn })
    }
}

impl NewsRepository for SqliteNewsRepository<'_> {
    fn create_news(&self, news: &NewsItem) -> RepoResult<NewsId> {
        news.validate()?;

        self.conn.execute(
            "INSERT INTO news (uuid, title, text, date) VALUES (?1, ?2, ?3, ?4);",
            params![
                news.id.to_string(),
                news.title.as_str(),
                news.text.as_str(),
                news.date,
            ],
        )?;

        Ok(news.id)
    }

    fn get_news(&self, id: NewsId) -> RepoResult<Option<NewsItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NEWS_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_news_row(row)?));
        }
        Ok(None)
    }

    fn list_news(&self, limit: usize) -> RepoResult<Vec<NewsItem>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(&format!(
            "{NEWS_SELECT_SQL} ORDER BY date DESC, rowid ASC LIMIT ?1;"
        ))?;
        let mut rows = stmt.query([limit])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_news_row(row)?);
        }
        Ok(items)
    }

    fn create_comment(&self, comment: &Comment) -> RepoResult<CommentId> {
        comment.validate()?;

        self.conn.execute(
            "INSERT INTO comments (uuid, news_uuid, author_uuid, text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                comment.id.to_string(),
                comment.news_id.to_string(),
                comment.author.to_string(),
                comment.text.as_str(),
                comment.created_at,
            ],
        )?;

        Ok(comment.id)
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comment_row(row)?));
        }
        Ok(None)
    }

    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()> {
        crate::model::require_text("text", text)?;

        let changed = self.conn.execute(
            "UPDATE comments SET text = ?2 WHERE uuid = ?1;",
            params![id.to_string(), text],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_comments(&self, news_id: NewsId) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL}
             WHERE news_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([news_id.to_string()])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }

    fn count_comments(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments;", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn parse_news_row(row: &Row<'_>) -> RepoResult<NewsItem> {
    let uuid_text: String = row.get("uuid")?;
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in news.date"))
    })?;

    Ok(NewsItem {
        id: parse_uuid(&uuid_text, "news.uuid")?,
        title: row.get("title")?,
        text: row.get("text")?,
        date,
    })
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let uuid_text: String = row.get("uuid")?;
    let news_text: String = row.get("news_uuid")?;
    let author_text: String = row.get("author_uuid")?;

    Ok(Comment {
        id: parse_uuid(&uuid_text, "comments.uuid")?,
        news_id: parse_uuid(&news_text, "comments.news_uuid")?,
        author: parse_uuid(&author_text, "comments.author_uuid")?,
        text: row.get("text")?,
        created_at: row.get("created_at")?,
    })
}
