//! Repository layer for table store operations

pub mod books;
pub mod loans;
pub mod members;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult, StoreError},
    store::TableStore,
};

/// Per-table repositories sharing one table store client
#[derive(Clone)]
pub struct Repository {
    pub members: members::MembersRepository,
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            members: members::MembersRepository::new(store.clone()),
            books: books::BooksRepository::new(store.clone()),
            loans: loans::LoansRepository::new(store),
        }
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> AppResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| AppError::from(StoreError::from(e))))
        .collect()
}

fn encode_row<T: Serialize>(row: &T) -> AppResult<Value> {
    Ok(serde_json::to_value(row).map_err(StoreError::from)?)
}
