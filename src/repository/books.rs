//! Books repository for table store operations

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use super::{decode_rows, encode_row};
use crate::{
    error::AppResult,
    models::book::{Book, BookStock, BookTitle, SearchField},
    store::{Filter, Table, TableStore},
};

#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<dyn TableStore>,
}

impl BooksRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Get every book (one full-table fetch)
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = self.store.select(Table::Books, Vec::new()).await?;
        decode_rows(rows)
    }

    /// Case-insensitive substring search on one column
    pub async fn search(&self, field: SearchField, keyword: &str) -> AppResult<Vec<Book>> {
        let rows = self
            .store
            .select(
                Table::Books,
                vec![Filter::ILike(field.column(), keyword.to_string())],
            )
            .await?;
        decode_rows(rows)
    }

    /// Current stock, `None` when the book does not exist
    pub async fn get_stock(&self, book_id: i64) -> AppResult<Option<i64>> {
        let rows = self
            .store
            .select(Table::Books, vec![Filter::eq("book_id", book_id)])
            .await?;
        Ok(decode_rows::<BookStock>(rows)?.first().map(|b| b.stock))
    }

    /// Resolve titles for a set of books in a single lookup
    pub async fn titles(&self, book_ids: &[i64]) -> AppResult<HashMap<i64, String>> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut ids: Vec<i64> = book_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let rows = self
            .store
            .select(
                Table::Books,
                vec![Filter::In("book_id", ids.into_iter().map(Value::from).collect())],
            )
            .await?;

        Ok(decode_rows::<BookTitle>(rows)?
            .into_iter()
            .map(|b| (b.book_id, b.title))
            .collect())
    }

    /// Create a new book
    pub async fn create(&self, book: &Book) -> AppResult<()> {
        self.store.insert(Table::Books, encode_row(book)?).await?;
        Ok(())
    }

    /// Overwrite the stock, returning the number of rows affected
    pub async fn set_stock(&self, book_id: i64, stock: i64) -> AppResult<u64> {
        let affected = self
            .store
            .update(
                Table::Books,
                json!({ "stock": stock }),
                vec![Filter::eq("book_id", book_id)],
            )
            .await?;
        Ok(affected)
    }

    /// Set the stock only if it still holds `expected`
    pub async fn swap_stock(&self, book_id: i64, expected: i64, stock: i64) -> AppResult<u64> {
        let affected = self
            .store
            .update(
                Table::Books,
                json!({ "stock": stock }),
                vec![
                    Filter::eq("book_id", book_id),
                    Filter::eq("stock", expected),
                ],
            )
            .await?;
        Ok(affected)
    }

    /// Delete a book, returning the number of rows affected
    pub async fn delete(&self, book_id: i64) -> AppResult<u64> {
        let affected = self
            .store
            .delete(Table::Books, vec![Filter::eq("book_id", book_id)])
            .await?;
        Ok(affected)
    }
}
