//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, SearchField, StockUpdate},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book to the catalog
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        let book = Book::from(book);
        self.repository.books.create(&book).await?;
        tracing::info!(book_id = book.book_id, stock = book.stock, "Book added");
        Ok(book)
    }

    /// List every book
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Search books on title, author or category
    pub async fn search_books(&self, field: &str, keyword: &str) -> AppResult<Vec<Book>> {
        let field: SearchField = field.parse()?;
        self.repository.books.search(field, keyword).await
    }

    /// Overwrite the available stock of a book
    pub async fn update_stock(&self, update: StockUpdate) -> AppResult<()> {
        update.validate()?;
        let affected = self
            .repository
            .books
            .set_stock(update.book_id, update.stock)
            .await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Book ID {} not found", update.book_id)));
        }
        tracing::info!(book_id = update.book_id, stock = update.stock, "Book stock updated");
        Ok(())
    }

    /// Delete a book that was never borrowed
    pub async fn delete_book(&self, book_id: i64) -> AppResult<()> {
        let records = self.repository.loans.get_book_records(book_id).await?;
        if !records.is_empty() {
            tracing::warn!(book_id, records = records.len(), "Book deletion blocked");
            return Err(AppError::HasBorrowHistory(if records.iter().any(|r| r.is_open()) {
                "Cannot delete book: Currently borrowed".to_string()
            } else {
                "Cannot delete book: Book has borrow history".to_string()
            }));
        }

        let affected = self.repository.books.delete(book_id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Book ID {} not found", book_id)));
        }
        tracing::info!(book_id, "Book deleted");
        Ok(())
    }
}
