//! Human-readable rendering of results and warnings

use crate::{
    error::AppError,
    models::{Book, MemberDetails},
};

pub fn book_line(book: &Book) -> String {
    format!(
        "- {} by {} | Category: {} | Stock: {}",
        book.title, book.author, book.category, book.stock
    )
}

pub fn member_details(details: &MemberDetails) -> Vec<String> {
    let member = &details.member;
    let mut lines = vec![
        String::new(),
        format!(
            "👤 {} | Email: {} | Joined: {}",
            member.name, member.email, member.join_date
        ),
    ];

    if details.loans.is_empty() {
        lines.push("No borrowed books.".to_string());
        return lines;
    }

    lines.push("Borrowed Books:".to_string());
    for loan in &details.loans {
        let status = loan
            .return_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Not returned".to_string());
        lines.push(format!(
            "- {} | Borrowed on: {} | Return: {}",
            loan.title.as_deref().unwrap_or("Unknown"),
            loan.borrow_date,
            status
        ));
    }
    lines
}

/// Text of the warning line printed for a failed operation
pub fn warning(error: &AppError) -> String {
    match error {
        AppError::OutOfStock(_) => "Book not available".to_string(),
        AppError::InvalidField(_) => "Invalid search field".to_string(),
        AppError::NotFound(msg) | AppError::HasBorrowHistory(msg) => msg.clone(),
        other => other.to_string(),
    }
}
