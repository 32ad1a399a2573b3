//! Ownership authorization gate.
//!
//! Only the owner of a comment/note may edit or delete it (or open an
//! owner-only page such as a note's detail view). Anonymous callers
//! are sent to login; other authenticated users get the same answer they
//! would get for a record that does not exist.

use crate::model::principal::Principal;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Action requested on an owned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Open an owner-only page.
    View,
    Edit,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Gate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    /// Authenticated but not the owner. Must be indistinguishable from a
    /// missing record.
    DenyNotFound,
    /// Anonymous; redirect to login with the requested path as `next`.
    DenyAuthRequired,
}

impl Decision {
    /// Stable name used in `decision=` log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::DenyNotFound => "deny_not_found",
            Self::DenyAuthRequired => "deny_auth_required",
        }
    }
}

/// Decides whether `principal` may perform `action` on a record owned by
/// `owner`.
///
/// The decision does not depend on `action`: every action shares one rule.
pub fn authorize(principal: &Principal, owner: UserId, _action: Action) -> Decision {
    if !principal.is_authenticated() {
        Decision::DenyAuthRequired
    } else if principal.is_owner_of(owner) {
        Decision::Allow
    } else {
        Decision::DenyNotFound
    }
}

#[cfg(test)]
mod tests {
    use super::{authorize, Action, Decision};
    use crate::model::principal::Principal;
    use uuid::Uuid;

    const ACTIONS: [Action; 3] = [Action::View, Action::Edit, Action::Delete];

    #[test]
    fn owner_is_allowed_for_every_action() {
        let owner = Uuid::new_v4();
        for action in ACTIONS {
            assert_eq!(
                authorize(&Principal::Authenticated(owner), owner, action),
                Decision::Allow
            );
        }
    }

    #[test]
    fn other_user_sees_not_found() {
        let owner = Uuid::new_v4();
        let reader = Principal::Authenticated(Uuid::new_v4());
        for action in ACTIONS {
            assert_eq!(authorize(&reader, owner, action), Decision::DenyNotFound);
        }
    }

    #[test]
    fn anonymous_must_log_in() {
        let owner = Uuid::new_v4();
        for action in ACTIONS {
            let decision = authorize(&Principal::Anonymous, owner, action);
            assert_eq!(decision, Decision::DenyAuthRequired);
        }
    }

    #[test]
    fn decision_names_match_serde_form() {
        for decision in [
            Decision::Allow,
            Decision::DenyNotFound,
            Decision::DenyAuthRequired,
        ] {
            assert_eq!(
                serde_json::to_value(decision).expect("serialize decision"),
                serde_json::json!(decision.as_str())
            );
        }
    }
}
