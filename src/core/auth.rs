//! Authenticated-context values.
//!
//! Every mutating registry operation receives an explicit [`AuthContext`]
//! instead of reading ambient session state. The front-door collaborator
//! performs the actual credential check and hands the core a resolved
//! identity; the core only trusts the gate. Screens polling for their
//! render document carry the anonymous context.

use serde::{Deserialize, Serialize};

use crate::core::error::{MarqueeError, MarqueeResult};

/// Resolved caller identity for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Logged-in user id, if any.
    pub user_id: Option<u64>,

    /// Whether the front door authorized this caller for mutations.
    pub authorized: bool,
}

impl AuthContext {
    /// Context for an authenticated, authorized user.
    pub const fn user(user_id: u64) -> Self {
        Self {
            user_id: Some(user_id),
            authorized: true,
        }
    }

    /// Context for an unauthenticated caller (polling screens).
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            authorized: false,
        }
    }

    /// Context for the service acting on its own behalf (bootstrap).
    pub const fn service() -> Self {
        Self {
            user_id: None,
            authorized: true,
        }
    }

    /// Check whether this caller may mutate fleet state.
    pub const fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Require an authorized caller, failing with Unauthenticated otherwise.
    pub fn require_authorized(&self) -> MarqueeResult<()> {
        if self.authorized {
            Ok(())
        } else {
            Err(MarqueeError::Unauthenticated)
        }
    }
}
