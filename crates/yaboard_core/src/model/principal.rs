//! Requesting identity.
//!
//! Core never reads identity from ambient state: every use-case receives a
//! `Principal` from the caller's session layer.

use crate::model::user::{User, UserId};
use serde::{Deserialize, Serialize};

/// Identity making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "user_id")]
pub enum Principal {
    /// No session; only public pages are reachable.
    Anonymous,
    /// Logged-in user.
    Authenticated(UserId),
}

impl Principal {
    /// Returns the user id for authenticated principals.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Whether this principal is the given owner.
    pub fn is_owner_of(&self, owner: UserId) -> bool {
        self.user_id() == Some(owner)
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::Authenticated(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::Principal;
    use uuid::Uuid;

    #[test]
    fn anonymous_has_no_user_id() {
        assert_eq!(Principal::Anonymous.user_id(), None);
        assert!(!Principal::Anonymous.is_authenticated());
        assert!(!Principal::Anonymous.is_owner_of(Uuid::new_v4()));
    }

    #[test]
    fn authenticated_owns_only_its_own_id() {
        let id = Uuid::new_v4();
        let principal = Principal::Authenticated(id);
        assert!(principal.is_owner_of(id));
        assert!(!principal.is_owner_of(Uuid::new_v4()));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let id = Uuid::new_v4();
        assert_eq!(
            serde_json::to_value(Principal::Authenticated(id)).expect("serialize principal"),
            serde_json::json!({ "kind": "authenticated", "user_id": id.to_string() })
        );
        assert_eq!(
            serde_json::to_value(Principal::Anonymous).expect("serialize anonymous"),
            serde_json::json!({ "kind": "anonymous" })
        );
    }
}
