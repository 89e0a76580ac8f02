//! Accounts repository for the auth database

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::account::{Account, RegisterAccount, Role, UpdateProfile},
};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct AccountsRepository {
    pool: Pool<Postgres>,
}

impl AccountsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an account by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Account> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account with id {} not found", id)))
    }

    /// Get an account by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    /// Insert a new account with an already-hashed password
    pub async fn create(&self, account: &RegisterAccount, password_hash: &str) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, password, role, full_name, email, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&account.username)
        .bind(password_hash)
        .bind(account.role.unwrap_or(Role::User))
        .bind(&account.full_name)
        .bind(&account.email)
        .bind(&account.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict("Username already registered".to_string())
            }
            other => AppError::Database(other),
        })
    }

    /// Update profile fields: provided values win, absent ones are preserved
    pub async fn update_profile(&self, id: i64, profile: &UpdateProfile) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET full_name = COALESCE($1, full_name),
                email = COALESCE($2, email),
                phone_number = COALESCE($3, phone_number)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account with id {} not found", id)))
    }
}
