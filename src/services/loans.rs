//! Loan management service
//!
//! Borrowing and returning each touch two tables. The store offers no
//! multi-table transaction, so when the second write fails the first one is
//! reverted before the error is returned.

use crate::{
    error::{AppError, AppResult},
    models::loan::{BorrowRecord, CreateBorrow},
    repository::Repository,
};

use super::today;

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend one copy of a book: decrement its stock, then open a borrow record
    pub async fn borrow_book(&self, request: CreateBorrow) -> AppResult<BorrowRecord> {
        let book_id = request.book_id;

        // A missing book counts as having no copies
        let stock = self.repository.books.get_stock(book_id).await?.unwrap_or(0);
        if stock < 1 {
            tracing::warn!(book_id, stock, "Book not available");
            return Err(AppError::OutOfStock(book_id));
        }

        let swapped = self
            .repository
            .books
            .swap_stock(book_id, stock, stock - 1)
            .await?;
        if swapped == 0 {
            return Err(AppError::Conflict(format!(
                "Stock of book ID {} changed during checkout, try again",
                book_id
            )));
        }

        let record = request.into_record(today());
        if let Err(e) = self.repository.loans.create(&record).await {
            tracing::warn!(record_id = record.record_id, error = %e, "Borrow record insert failed, restoring stock");
            self.restore_stock(book_id, stock - 1, stock).await;
            return Err(e);
        }

        tracing::info!(
            record_id = record.record_id,
            member_id = record.member_id,
            book_id,
            "Book borrowed"
        );
        Ok(record)
    }

    /// Close a borrow record and put the copy back in stock
    pub async fn return_book(&self, record_id: i64) -> AppResult<BorrowRecord> {
        let mut record = self
            .repository
            .loans
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow record {} not found", record_id)))?;

        if !record.is_open() {
            return Err(AppError::AlreadyReturned(record_id));
        }

        let return_date = today();
        let closed = self
            .repository
            .loans
            .mark_returned(record_id, return_date)
            .await?;
        if closed == 0 {
            return Err(AppError::AlreadyReturned(record_id));
        }

        if let Err(e) = self.increment_stock(record.book_id).await {
            tracing::warn!(record_id, error = %e, "Stock update failed, reopening borrow record");
            match self.repository.loans.clear_return(record_id).await {
                Ok(1) => {}
                Ok(_) | Err(_) => tracing::error!(
                    record_id,
                    book_id = record.book_id,
                    "Could not reopen borrow record; record is closed but stock was not restored"
                ),
            }
            return Err(e);
        }

        record.return_date = Some(return_date);
        tracing::info!(record_id, book_id = record.book_id, "Book returned");
        Ok(record)
    }

    async fn increment_stock(&self, book_id: i64) -> AppResult<()> {
        let Some(stock) = self.repository.books.get_stock(book_id).await? else {
            tracing::warn!(book_id, "Returned book no longer exists, stock not restored");
            return Ok(());
        };

        let restored = stock.checked_add(1).ok_or_else(|| {
            AppError::Conflict(format!("Stock of book ID {} is at its maximum", book_id))
        })?;
        let swapped = self
            .repository
            .books
            .swap_stock(book_id, stock, restored)
            .await?;
        if swapped == 0 {
            return Err(AppError::Conflict(format!(
                "Stock of book ID {} changed during return, try again",
                book_id
            )));
        }
        Ok(())
    }

    async fn restore_stock(&self, book_id: i64, current: i64, previous: i64) {
        match self.repository.books.swap_stock(book_id, current, previous).await {
            Ok(1) => {}
            Ok(_) => tracing::error!(
                book_id,
                expected = current,
                restore_to = previous,
                "Stock changed before it could be restored"
            ),
            Err(e) => tracing::error!(
                book_id,
                restore_to = previous,
                error = %e,
                "Could not restore stock after failed borrow"
            ),
        }
    }
}
