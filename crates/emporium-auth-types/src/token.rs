//! JWT access-token issuance and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use emporium_domain::user::RoleFlags;

use crate::identity::Identity;

/// Access-token lifetime in seconds (24 hours).
///
/// The role flags inside the token go stale for up to this long after a role
/// change; freshness requires re-login.
pub const ACCESS_TOKEN_EXP: u64 = 86_400;

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | UUID string | user ID |
/// | `username` | custom | string | login name at issuance |
/// | `adm` | custom | bool | admin flag snapshot |
/// | `sel` | custom | bool | seller flag snapshot |
/// | `exp` | `exp` | seconds since epoch | token expiration |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub username: String,
    pub adm: bool,
    pub sel: bool,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign an access token for the given identity fields.
pub fn issue_access_token(
    id: Uuid,
    username: &str,
    role: RoleFlags,
    secret: &str,
) -> Result<String, AuthError> {
    let claims = JwtClaims {
        sub: id.to_string(),
        username: username.to_owned(),
        adm: role.is_admin,
        sel: role.is_seller,
        exp: now_secs() + ACCESS_TOKEN_EXP,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Malformed)
}

/// Decode and validate an access token, returning the identity snapshot.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew.
pub fn validate_access_token(token: &str, secret: &str) -> Result<Identity, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;

    Ok(Identity {
        id,
        username: data.claims.username,
        role: RoleFlags {
            is_admin: data.claims.adm,
            is_seller: data.claims.sel,
        },
    })
}
