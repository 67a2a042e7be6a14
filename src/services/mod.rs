//! Business logic services

pub mod catalog;
pub mod loans;
pub mod members;

use chrono::{Local, NaiveDate};

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub members: members::MembersService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            members: members::MembersService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository),
        }
    }
}

/// Calendar date stamped on joins, borrows and returns
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
