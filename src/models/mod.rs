//! Data models for the library console

pub mod book;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, CreateBook, SearchField, StockUpdate};
pub use loan::{BorrowRecord, CreateBorrow};
pub use member::{CreateMember, Member, MemberDetails, MemberLoan};
