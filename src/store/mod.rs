//! Table store client
//!
//! The remote store is a set of tables addressed by name, each row a JSON
//! object. [`TableStore`] is the seam between the repositories and the
//! network: [`PostgrestStore`] talks HTTP to the hosted project,
//! [`MemoryStore`] keeps rows in process and is used as a test double.

pub mod memory;
pub mod postgrest;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

/// Tables known to the library schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Members,
    Books,
    BorrowRecords,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Members => "members",
            Table::Books => "books",
            Table::BorrowRecords => "borrow_records",
        }
    }

    /// Column holding the externally assigned unique id
    pub fn primary_key(&self) -> &'static str {
        match self {
            Table::Members => "member_id",
            Table::Books => "book_id",
            Table::BorrowRecords => "record_id",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row filter; several filters on one call are combined with AND
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(&'static str, Value),
    /// Case-insensitive substring match
    ILike(&'static str, String),
    In(&'static str, Vec<Value>),
    IsNull(&'static str),
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Filter::Eq(column, value.into())
    }

    pub fn column(&self) -> &'static str {
        match self {
            Filter::Eq(c, _) | Filter::ILike(c, _) | Filter::In(c, _) | Filter::IsNull(c) => c,
        }
    }
}

/// Per-table insert/select/update/delete against a remote store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert one row, returning the number of rows written
    async fn insert(&self, table: Table, row: Value) -> StoreResult<u64>;

    /// Fetch every row matching all filters
    async fn select(&self, table: Table, filters: Vec<Filter>) -> StoreResult<Vec<Value>>;

    /// Apply `patch` to every matching row, returning the number of rows affected
    async fn update(&self, table: Table, patch: Value, filters: Vec<Filter>) -> StoreResult<u64>;

    /// Delete every matching row, returning the number of rows affected
    async fn delete(&self, table: Table, filters: Vec<Filter>) -> StoreResult<u64>;
}
