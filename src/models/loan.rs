//! Borrow record model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Borrow record row from the `borrow_records` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub record_id: i64,
    pub member_id: i64,
    pub book_id: i64,
    pub borrow_date: NaiveDate,
    /// `None` while the book is still out
    pub return_date: Option<NaiveDate>,
}

impl BorrowRecord {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Create borrow request
#[derive(Debug, Clone, Copy)]
pub struct CreateBorrow {
    pub record_id: i64,
    pub member_id: i64,
    pub book_id: i64,
}

impl CreateBorrow {
    pub fn into_record(self, borrow_date: NaiveDate) -> BorrowRecord {
        BorrowRecord {
            record_id: self.record_id,
            member_id: self.member_id,
            book_id: self.book_id,
            borrow_date,
            return_date: None,
        }
    }
}
