//! Named destinations returned by use-cases.
//!
//! # Responsibility
//! - Map route names (`news:detail`, `notes:success`, ...) to stable paths.
//! - Build login redirects that preserve the requested path as `next`.
//! - Decide page-level access before any record is loaded.
//!
//! # Invariants
//! - Public pages are reachable by every principal.
//! - All other pages require an authenticated principal; record ownership is
//!   checked separately by `policy::gate`.

use crate::model::news::{CommentId, NewsId};
use crate::model::principal::Principal;
use crate::policy::gate::Decision;
use std::fmt::{Display, Formatter};

/// Anchor on the news detail page where the comment thread starts.
pub const COMMENTS_ANCHOR: &str = "comments";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    NewsHome,
    NewsDetail(NewsId),
    /// News detail scrolled to the comment thread.
    NewsComments(NewsId),
    CommentEdit(CommentId),
    CommentDelete(CommentId),
    NotesHome,
    NotesList,
    NoteAdd,
    NoteDetail(String),
    NoteEdit(String),
    NoteDelete(String),
    NotesSuccess,
    Login,
    Logout,
    Signup,
}

impl Route {
    /// Route name in `namespace:name` form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewsHome => "news:home",
            Self::NewsDetail(_) | Self::NewsComments(_) => "news:detail",
            Self::CommentEdit(_) => "news:edit",
            Self::CommentDelete(_) => "news:delete",
            Self::NotesHome => "notes:home",
            Self::NotesList => "notes:list",
            Self::NoteAdd => "notes:add",
            Self::NoteDetail(_) => "notes:detail",
            Self::NoteEdit(_) => "notes:edit",
            Self::NoteDelete(_) => "notes:delete",
            Self::NotesSuccess => "notes:success",
            Self::Login => "users:login",
            Self::Logout => "users:logout",
            Self::Signup => "users:signup",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::NewsHome => "/".to_string(),
            Self::NewsDetail(id) => format!("/news/{id}/"),
            Self::NewsComments(id) => format!("/news/{id}/#{COMMENTS_ANCHOR}"),
            Self::CommentEdit(id) => format!("/edit_comment/{id}/"),
            Self::CommentDelete(id) => format!("/delete_comment/{id}/"),
            Self::NotesHome => "/notes/".to_string(),
            Self::NotesList => "/notes/list/".to_string(),
            Self::NoteAdd => "/notes/add/".to_string(),
            Self::NoteDetail(slug) => format!("/notes/note/{slug}/"),
            Self::NoteEdit(slug) => format!("/notes/edit/{slug}/"),
            Self::NoteDelete(slug) => format!("/notes/delete/{slug}/"),
            Self::NotesSuccess => "/notes/done/".to_string(),
            Self::Login => "/auth/login/".to_string(),
            Self::Logout => "/auth/logout/".to_string(),
            Self::Signup => "/auth/signup/".to_string(),
        }
    }

    /// Whether anonymous principals may open this page.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::NewsHome
                | Self::NewsDetail(_)
                | Self::NewsComments(_)
                | Self::NotesHome
                | Self::Login
                | Self::Logout
                | Self::Signup
        )
    }

    /// Login page path carrying this route as the return target.
    ///
    /// Each path segment is percent-encoded, so `&`, `?`, `#` and `=` from a
    /// slug cannot leak into the login query. Slashes stay readable.
    pub fn login_redirect(&self) -> String {
        let path = self.path();
        let next = path
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        format!("{}?next={next}", Route::Login.path())
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Page-level access check; never returns `DenyNotFound`.
pub fn route_access(route: &Route, principal: &Principal) -> Decision {
    if route.is_public() || principal.is_authenticated() {
        Decision::Allow
    } else {
        Decision::DenyAuthRequired
    }
}

#[cfg(test)]
mod tests {
    use super::{route_access, Route};
    use crate::model::principal::Principal;
    use crate::policy::gate::Decision;
    use uuid::Uuid;

    #[test]
    fn public_pages_are_open_to_anonymous() {
        let news_id = Uuid::new_v4();
        for route in [
            Route::NewsHome,
            Route::NewsDetail(news_id),
            Route::Login,
            Route::Logout,
            Route::Signup,
            Route::NotesHome,
        ] {
            assert_eq!(
                route_access(&route, &Principal::Anonymous),
                Decision::Allow,
                "{} should be public",
                route.name()
            );
        }
    }

    #[test]
    fn private_pages_require_login() {
        let comment_id = Uuid::new_v4();
        for route in [
            Route::CommentEdit(comment_id),
            Route::CommentDelete(comment_id),
            Route::NotesList,
            Route::NoteAdd,
            Route::NotesSuccess,
            Route::NoteEdit("slug".to_string()),
        ] {
            assert_eq!(
                route_access(&route, &Principal::Anonymous),
                Decision::DenyAuthRequired
            );
            assert_eq!(
                route_access(&route, &Principal::Authenticated(Uuid::new_v4())),
                Decision::Allow
            );
        }
    }

    #[test]
    fn login_redirect_preserves_requested_path() {
        let comment_id = Uuid::new_v4();
        assert_eq!(
            Route::CommentEdit(comment_id).login_redirect(),
            format!("/auth/login/?next=/edit_comment/{comment_id}/")
        );
    }

    #[test]
    fn login_redirect_encodes_query_characters_in_slug() {
        let redirect =
            Route::NoteDetail("x/&next=https://evil.example".to_string()).login_redirect();
        assert_eq!(redirect.matches("next=").count(), 1);
        assert_eq!(
            redirect,
            "/auth/login/?next=/notes/note/x/%26next%3Dhttps%3A//evil.example/"
        );
    }

    #[test]
    fn login_redirect_encodes_comments_anchor() {
        let news_id = Uuid::new_v4();
        assert_eq!(
            Route::NewsComments(news_id).login_redirect(),
            format!("/auth/login/?next=/news/{news_id}/%23comments")
        );
    }

    #[test]
    fn comments_anchor_points_into_news_detail() {
        let news_id = Uuid::new_v4();
        let detail = Route::NewsDetail(news_id).path();
        assert_eq!(
            Route::NewsComments(news_id).path(),
            format!("{detail}#comments")
        );
    }
}
