//! Login, user administration, and default-user bootstrap.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use buswatch_auth::jwt::JwtEncoder;
use buswatch_auth::password::PasswordHasher;
use buswatch_core::error::AppError;
use buswatch_core::result::AppResult;
use buswatch_database::repositories::user::UserRepository;
use buswatch_entity::user::model::CreateUser;
use buswatch_entity::user::{User, UserRole};

/// Default accounts created when the user table is empty.
const DEFAULT_USERS: [(&str, &str, UserRole); 2] = [
    ("admin", "admin123", UserRole::Admin),
    ("operator1", "operator123", UserRole::Operator),
];

/// Manages users and credential verification.
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
        }
    }

    /// Verify credentials and issue an access token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let token = self.encoder.generate_token(&user)?;
        Ok((token, user))
    }

    /// Fetch a user by id.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// List all users.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all().await
    }

    /// Create a new user. A duplicate username surfaces as Conflict.
    pub async fn create(&self, username: &str, password: &str, role: UserRole) -> AppResult<User> {
        let password_hash = self.hasher.hash_password(password)?;
        self.user_repo
            .create(&CreateUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await
    }

    /// Delete a user. Self-deletion is rejected.
    pub async fn delete(&self, user_id: Uuid, acting_user: Uuid) -> AppResult<()> {
        if user_id == acting_user {
            return Err(AppError::validation("Cannot delete your own account"));
        }
        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Change a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::authentication("Current password is incorrect"));
        }
        let password_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user.id, &password_hash).await
    }

    /// Create the default accounts when the table is empty.
    pub async fn bootstrap_default_users(&self) -> AppResult<()> {
        if self.user_repo.count().await? > 0 {
            return Ok(());
        }
        for (username, password, role) in DEFAULT_USERS {
            if let Err(e) = self.create(username, password, role).await {
                warn!(username, error = %e, "Failed to bootstrap default user");
            }
        }
        info!("Bootstrapped default users");
        Ok(())
    }
}
