//! Bearer-token helpers for integration tests.
//!
//! Handlers read the caller identity from a JWT in the `Authorization`
//! header. `TestIdentity` signs a real token with the test secret so no
//! separate auth service is needed.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use emporium_auth_types::token::issue_access_token;
use emporium_domain::user::RoleFlags;
use uuid::Uuid;

/// Configurable identity for test requests.
pub struct TestIdentity {
    pub id: Uuid,
    pub username: String,
    pub role: RoleFlags,
}

impl TestIdentity {
    pub fn new(username: &str, role: RoleFlags) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            role,
        }
    }

    /// Sign an access token for this identity with `secret`.
    pub fn token(&self, secret: &str) -> String {
        issue_access_token(self.id, &self.username, self.role, secret)
            .expect("signing a test token should not fail")
    }

    /// Return an `Authorization: Bearer <token>` header map.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap(),
        );
        map
    }
}
