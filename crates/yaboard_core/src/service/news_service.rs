//! News board use-case service.
//!
//! # Responsibility
//! - Home page listing and news detail with its comment thread.
//! - Comment create/edit/delete behind the ownership gate.
//!
//! # Invariants
//! - Anonymous callers are turned away before any record lookup.
//! - Non-owners get `ServiceError::NotFound`, same as a missing comment.
//! - Rejected text never reaches storage.
//! - Successful comment mutations redirect to the news detail `#comments`
//!   anchor.

use crate::config::BoardConfig;
use crate::model::news::{Comment, CommentId, NewsId, NewsItem};
use crate::model::principal::Principal;
use crate::policy::content::ContentPolicy;
use crate::policy::gate::{authorize, Action, Decision};
use crate::policy::listing::ListingPolicy;
use crate::repo::news_repo::NewsRepository;
use crate::route::Route;
use crate::service::error::{Mutation, ServiceError, ServiceResult};
use chrono::Utc;
use log::{info, warn};

/// News detail page model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDetail {
    pub news: NewsItem,
    /// Oldest comment first.
    pub comments: Vec<Comment>,
    /// Whether the comment form is offered (authenticated principals only).
    pub comment_form: bool,
}

/// News service facade over repository implementations.
pub struct NewsService<R: NewsRepository> {
    repo: R,
    listing: ListingPolicy,
    content: ContentPolicy,
}

impl<R: NewsRepository> NewsService<R> {
    /// Creates a service with default listing and content rules.
    pub fn new(repo: R) -> Self {
        Self::with_policies(repo, ListingPolicy::default(), ContentPolicy::default())
    }

    pub fn with_config(repo: R, config: &BoardConfig) -> Self {
        Self::with_policies(repo, config.listing_policy(), config.content_policy())
    }

    pub fn with_policies(repo: R, listing: ListingPolicy, content: ContentPolicy) -> Self {
        Self {
            repo,
            listing,
            content,
        }
    }

    /// Publishes a news item. Editorial path; no principal involved.
    pub fn publish_news(&self, news: &NewsItem) -> ServiceResult<NewsItem> {
        let news_id = self.repo.create_news(news)?;
        info!("event=news_publish module=news status=ok news_id={news_id}");
        self.repo
            .get_news(news_id)?
            .ok_or(ServiceError::InconsistentState(
                "published news not found in read-back",
            ))
    }

    /// Newest news items for the home page.
    pub fn home_listing(&self) -> ServiceResult<Vec<NewsItem>> {
        let items = self.repo.list_news(self.listing.home_page_size())?;
        Ok(self.listing.home(items))
    }

    /// All comments of one news item, oldest first.
    pub fn comment_thread(&self, news_id: NewsId) -> ServiceResult<Vec<Comment>> {
        if self.repo.get_news(news_id)?.is_none() {
            return Err(ServiceError::NotFound);
        }
        let comments = self.repo.list_comments(news_id)?;
        Ok(self.listing.comment_thread(comments))
    }

    /// News detail page; public.
    pub fn news_detail(&self, principal: &Principal, news_id: NewsId) -> ServiceResult<NewsDetail> {
        let news = self
            .repo
            .get_news(news_id)?
            .ok_or(ServiceError::NotFound)?;
        let comments = self.listing.comment_thread(self.repo.list_comments(news_id)?);
        Ok(NewsDetail {
            news,
            comments,
            comment_form: principal.is_authenticated(),
        })
    }

    /// Posts a comment as `principal` under `news_id`.
    ///
    /// # Errors
    /// - `AuthRequired` for anonymous principals (return target: news detail).
    /// - `NotFound` when the news item does not exist.
    /// - `ProhibitedContent` when `text` contains a denylisted word.
    pub fn create_comment(
        &self,
        principal: &Principal,
        news_id: NewsId,
        text: impl Into<String>,
    ) -> ServiceResult<Mutation<Comment>> {
        let Some(author) = principal.user_id() else {
            info!("event=comment_create module=news status=denied reason=anonymous news_id={news_id}");
            return Err(ServiceError::auth_required(&Route::NewsDetail(news_id)));
        };
        if self.repo.get_news(news_id)?.is_none() {
            return Err(ServiceError::NotFound);
        }

        let text = text.into();
        if let Err(err) = self.content.check(&text) {
            warn!("event=comment_create module=news status=rejected reason=prohibited_content news_id={news_id}");
            return Err(err.into());
        }

        let comment = Comment::new(news_id, author, text, Utc::now().timestamp_millis());
        let comment_id = self.repo.create_comment(&comment)?;
        info!(
            "event=comment_create module=news status=ok news_id={news_id} comment_id={comment_id}"
        );

        let record = self
            .repo
            .get_comment(comment_id)?
            .ok_or(ServiceError::InconsistentState(
                "created comment not found in read-back",
            ))?;
        Ok(Mutation {
            record,
            redirect: Route::NewsComments(news_id),
        })
    }

    /// Loads the comment edit page; owner only.
    pub fn comment_for_edit(
        &self,
        principal: &Principal,
        comment_id: CommentId,
    ) -> ServiceResult<Comment> {
        self.owned_comment(principal, comment_id, Action::Edit)
    }

    /// Loads the comment delete confirmation page; owner only.
    pub fn comment_for_delete(
        &self,
        principal: &Principal,
        comment_id: CommentId,
    ) -> ServiceResult<Comment> {
        self.owned_comment(principal, comment_id, Action::Delete)
    }

    /// Replaces comment text; owner only.
    pub fn edit_comment(
        &self,
        principal: &Principal,
        comment_id: CommentId,
        text: impl Into<String>,
    ) -> ServiceResult<Mutation<Comment>> {
        let comment = self.owned_comment(principal, comment_id, Action::Edit)?;

        let text = text.into();
        if let Err(err) = self.content.check(&text) {
            warn!("event=comment_edit module=news status=rejected reason=prohibited_content comment_id={comment_id}");
            return Err(err.into());
        }

        self.repo.update_comment_text(comment_id, &text)?;
        info!("event=comment_edit module=news status=ok comment_id={comment_id}");

        let record = self
            .repo
            .get_comment(comment_id)?
            .ok_or(ServiceError::InconsistentState(
                "updated comment not found in read-back",
            ))?;
        Ok(Mutation {
            redirect: Route::NewsComments(comment.news_id),
            record,
        })
    }

    /// Deletes a comment; owner only. Returns the redirect destination.
    pub fn delete_comment(
        &self,
        principal: &Principal,
        comment_id: CommentId,
    ) -> ServiceResult<Route> {
        let comment = self.owned_comment(principal, comment_id, Action::Delete)?;
        self.repo.delete_comment(comment_id)?;
        info!("event=comment_delete module=news status=ok comment_id={comment_id}");
        Ok(Route::NewsComments(comment.news_id))
    }

    fn owned_comment(
        &self,
        principal: &Principal,
        comment_id: CommentId,
        action: Action,
    ) -> ServiceResult<Comment> {
        let requested = match action {
            Action::Delete => Route::CommentDelete(comment_id),
            Action::Edit | Action::View => Route::CommentEdit(comment_id),
        };
        if !principal.is_authenticated() {
            info!(
                "event=comment_{} module=news status=denied reason=anonymous comment_id={comment_id}",
                action.as_str()
            );
            return Err(ServiceError::auth_required(&requested));
        }

        let comment = self
            .repo
            .get_comment(comment_id)?
            .ok_or(ServiceError::NotFound)?;
        let decision = authorize(principal, comment.author, action);
        match decision {
            Decision::Allow => Ok(comment),
            Decision::DenyNotFound => {
                warn!(
                    "event=comment_{} module=news status=denied decision={} comment_id={comment_id}",
                    action.as_str(),
                    decision.as_str()
                );
                Err(ServiceError::NotFound)
            }
            Decision::DenyAuthRequired => Err(ServiceError::auth_required(&requested)),
        }
    }
}
