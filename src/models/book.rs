//! Book (catalog entry) model and related types

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Book row from the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub stock: i64,
}

/// Create book request
#[derive(Debug, Clone, Validate)]
pub struct CreateBook {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i64,
}

impl From<CreateBook> for Book {
    fn from(b: CreateBook) -> Self {
        Book {
            book_id: b.book_id,
            title: b.title,
            author: b.author,
            category: b.category,
            stock: b.stock,
        }
    }
}

/// Direct stock correction
#[derive(Debug, Clone, Validate)]
pub struct StockUpdate {
    pub book_id: i64,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i64,
}

/// Projection used to resolve titles in bulk
#[derive(Debug, Clone, Deserialize)]
pub struct BookTitle {
    pub book_id: i64,
    pub title: String,
}

/// Projection used by the borrow/return workflow
#[derive(Debug, Clone, Deserialize)]
pub struct BookStock {
    pub stock: i64,
}

/// Columns a book search may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Category,
}

impl SearchField {
    pub fn column(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Category => "category",
        }
    }
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "category" => Ok(SearchField::Category),
            _ => Err(AppError::InvalidField(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_field_parse() {
        assert_eq!("title".parse::<SearchField>().unwrap(), SearchField::Title);
        assert_eq!(" Author ".parse::<SearchField>().unwrap(), SearchField::Author);
        assert_eq!("CATEGORY".parse::<SearchField>().unwrap(), SearchField::Category);

        let err = "isbn".parse::<SearchField>().unwrap_err();
        assert!(matches!(err, AppError::InvalidField(f) if f == "isbn"));
    }

    #[test]
    fn test_negative_stock_rejected() {
        let book = CreateBook {
            book_id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            category: "Fiction".to_string(),
            stock: -1,
        };
        assert!(book.validate().is_err());

        let update = StockUpdate { book_id: 1, stock: 0 };
        assert!(update.validate().is_ok());
    }
}
