//! Member model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::loan::BorrowRecord;

/// Member row from the `members` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: i64,
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
}

/// Create member request
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub member_id: i64,
    pub name: String,
    pub email: String,
}

impl CreateMember {
    pub fn into_member(self, join_date: NaiveDate) -> Member {
        Member {
            member_id: self.member_id,
            name: self.name,
            email: self.email,
            join_date,
        }
    }
}

/// One borrow record with its book title resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLoan {
    pub book_id: i64,
    /// `None` when the book no longer exists
    pub title: Option<String>,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl MemberLoan {
    pub fn new(record: &BorrowRecord, title: Option<String>) -> Self {
        Self {
            book_id: record.book_id,
            title,
            borrow_date: record.borrow_date,
            return_date: record.return_date,
        }
    }
}

/// Member with full borrow history for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetails {
    pub member: Member,
    pub loans: Vec<MemberLoan>,
}
