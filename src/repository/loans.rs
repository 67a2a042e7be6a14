//! Borrow records repository for table store operations

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Value};

use super::{decode_rows, encode_row};
use crate::{
    error::AppResult,
    models::loan::BorrowRecord,
    store::{Filter, Table, TableStore},
};

#[derive(Clone)]
pub struct LoansRepository {
    store: Arc<dyn TableStore>,
}

impl LoansRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Get borrow record by ID
    pub async fn find_by_id(&self, record_id: i64) -> AppResult<Option<BorrowRecord>> {
        let rows = self
            .store
            .select(Table::BorrowRecords, vec![Filter::eq("record_id", record_id)])
            .await?;
        Ok(decode_rows::<BorrowRecord>(rows)?.into_iter().next())
    }

    /// Get every record (open or closed) for a member
    pub async fn get_member_records(&self, member_id: i64) -> AppResult<Vec<BorrowRecord>> {
        let rows = self
            .store
            .select(Table::BorrowRecords, vec![Filter::eq("member_id", member_id)])
            .await?;
        decode_rows(rows)
    }

    /// Get every record (open or closed) for a book
    pub async fn get_book_records(&self, book_id: i64) -> AppResult<Vec<BorrowRecord>> {
        let rows = self
            .store
            .select(Table::BorrowRecords, vec![Filter::eq("book_id", book_id)])
            .await?;
        decode_rows(rows)
    }

    /// Create a new borrow record
    pub async fn create(&self, record: &BorrowRecord) -> AppResult<()> {
        self.store
            .insert(Table::BorrowRecords, encode_row(record)?)
            .await?;
        Ok(())
    }

    /// Close an open record, returning the number of rows affected
    pub async fn mark_returned(&self, record_id: i64, return_date: NaiveDate) -> AppResult<u64> {
        let affected = self
            .store
            .update(
                Table::BorrowRecords,
                json!({ "return_date": return_date }),
                vec![
                    Filter::eq("record_id", record_id),
                    Filter::IsNull("return_date"),
                ],
            )
            .await?;
        Ok(affected)
    }

    /// Reopen a record, used to undo a return whose stock update failed
    pub async fn clear_return(&self, record_id: i64) -> AppResult<u64> {
        let affected = self
            .store
            .update(
                Table::BorrowRecords,
                json!({ "return_date": Value::Null }),
                vec![Filter::eq("record_id", record_id)],
            )
            .await?;
        Ok(affected)
    }
}
