//! Business logic services

pub mod accounts;
pub mod catalog;
pub mod loans;

use crate::{config::AuthConfig, repository::{accounts::AccountsRepository, Repository}};

/// Container for the auth service's business logic
#[derive(Clone)]
pub struct AuthServices {
    pub accounts: accounts::AccountsService,
}

impl AuthServices {
    pub fn new(repository: AccountsRepository, auth_config: AuthConfig) -> Self {
        Self {
            accounts: accounts::AccountsService::new(repository, auth_config),
        }
    }
}

/// Container for the main service's business logic
#[derive(Clone)]
pub struct MainServices {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl MainServices {
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository),
        }
    }
}
