//! User role and naming rules.

use serde::{Deserialize, Serialize};

/// Role snapshot carried in the access token and on user rows.
///
/// Wire format: two independent booleans. `is_admin` gates privileged
/// operations, `is_seller` gates catalog ownership; neither implies the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_seller: bool,
}

impl RoleFlags {
    pub fn customer() -> Self {
        Self::default()
    }

    pub fn seller() -> Self {
        Self {
            is_admin: false,
            is_seller: true,
        }
    }

    pub fn admin() -> Self {
        Self {
            is_admin: true,
            is_seller: false,
        }
    }

    pub fn seller_or_admin(self) -> bool {
        self.is_seller || self.is_admin
    }
}

/// Validate a username: alphanumeric + hyphen + underscore, 1-30 chars.
/// Rejects names starting with '@' (reserved for path aliases).
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.len() > 30 {
        return false;
    }
    if username.starts_with('@') {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
