use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
};
use chrono::Utc;
use uuid::Uuid;

use emporium_domain::pagination::PageRequest;
use emporium_domain::user::{RoleFlags, validate_username};

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserPatch};
use crate::error::StoreError;

const PASSWORD_MIN: usize = 5;
const PASSWORD_MAX: usize = 72;

fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Internal(anyhow::anyhow!("hash password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, StoreError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| StoreError::Internal(anyhow::anyhow!("parse stored password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.len() < PASSWORD_MIN || password.len() > PASSWORD_MAX {
        return Err(StoreError::Validation(format!(
            "password must be {PASSWORD_MIN} to {PASSWORD_MAX} bytes"
        )));
    }
    Ok(())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    pub password: String,
    pub is_seller: bool,
    pub age: Option<i16>,
    pub address: Option<String>,
}

/// Self-service registration. The caller chooses the seller flag; admin
/// accounts can only come from `CreateAdminUseCase`.
pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, StoreError> {
        if !validate_username(&input.username) {
            return Err(StoreError::Validation("invalid username".into()));
        }
        validate_password(&input.password)?;
        let role = if input.is_seller {
            RoleFlags::seller()
        } else {
            RoleFlags::customer()
        };
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            password_hash: hash_password(&input.password)?,
            role,
            age: input.age,
            address: input.address,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── CreateAdmin ──────────────────────────────────────────────────────────────

pub struct CreateAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateAdminUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, StoreError> {
        if !validate_username(&input.username) {
            return Err(StoreError::Validation("invalid username".into()));
        }
        validate_password(&input.password)?;
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            password_hash: hash_password(&input.password)?,
            role: RoleFlags {
                is_admin: true,
                is_seller: input.is_seller,
            },
            age: input.age,
            address: input.address,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    /// Unknown usernames surface as `UserNotFound`, a known username with a
    /// wrong password as `InvalidCredentials`.
    pub async fn execute(&self, username: &str, password: &str) -> Result<User, StoreError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        if !verify_password(password, &user.password_hash)? {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(user)
    }
}

// ── GetUser / ListUsers ──────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, username: &str) -> Result<User, StoreError> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)
    }
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<User>, StoreError> {
        self.repo.list(page).await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_seller: Option<bool>,
    pub age: Option<i16>,
    pub address: Option<String>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(&self, username: &str, input: UpdateUserInput) -> Result<User, StoreError> {
        if let Some(ref new_username) = input.username {
            if !validate_username(new_username) {
                return Err(StoreError::Validation("invalid username".into()));
            }
        }
        let password_hash = match input.password {
            Some(ref password) => {
                validate_password(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };
        let patch = UserPatch {
            username: input.username,
            password_hash,
            is_seller: input.is_seller,
            age: input.age,
            address: input.address,
        };
        if patch.is_empty() {
            return Err(StoreError::Validation("no fields to update".into()));
        }
        self.repo
            .update(username, &patch)
            .await?
            .ok_or(StoreError::UserNotFound)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, username: &str) -> Result<(), StoreError> {
        if self.repo.delete(username).await? {
            Ok(())
        } else {
            Err(StoreError::UserNotFound)
        }
    }
}
