//! Account management and authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::account::{Account, Claims, RegisterAccount, UpdateProfile},
    repository::accounts::AccountsRepository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: AccountsRepository,
    config: AuthConfig,
}

impl AccountsService {
    pub fn new(repository: AccountsRepository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account
    pub async fn register(&self, account: RegisterAccount) -> AppResult<Account> {
        account
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let password_hash = self.hash_password(&account.password)?;
        let created = self.repository.create(&account, &password_hash).await?;

        tracing::info!("Registered account '{}' with role {}", created.username, created.role);
        Ok(created)
    }

    /// Authenticate by username and password, returning a session token and
    /// the account. Login is role-agnostic: the token carries the account's
    /// role and clients route on it.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, Account)> {
        let account = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.verify_password(&account, password)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.issue_token(&account)?;
        Ok((token, account))
    }

    /// Get an account's profile
    pub async fn profile(&self, account_id: i64) -> AppResult<Account> {
        self.repository.get_by_id(account_id).await
    }

    /// Update an account's own profile fields
    pub async fn update_profile(&self, account_id: i64, profile: UpdateProfile) -> AppResult<Account> {
        profile
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository.update_profile(account_id, &profile).await
    }

    /// Create a session token for an account
    fn issue_token(&self, account: &Account) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = Claims {
            sub: account.username.clone(),
            id: account.id,
            role: account.role,
            name: account.full_name.clone(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against the stored hash
    fn verify_password(&self, account: &Account, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&account.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
