//! Integration tests for the borrow/return workflow and deletion rules.

mod common;

use chrono::Local;
use library_console::{
    models::{BorrowRecord, CreateBorrow, StockUpdate},
    store::Table,
    AppError,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use common::TestHarness;

fn borrow(record_id: i64, member_id: i64, book_id: i64) -> CreateBorrow {
    CreateBorrow {
        record_id,
        member_id,
        book_id,
    }
}

async fn stock(h: &TestHarness, book_id: i64) -> i64 {
    h.services
        .catalog
        .list_books()
        .await
        .unwrap()
        .into_iter()
        .find(|b| b.book_id == book_id)
        .map(|b| b.stock)
        .expect("book exists")
}

fn records(h: &TestHarness) -> Vec<BorrowRecord> {
    h.store
        .rows(Table::BorrowRecords)
        .into_iter()
        .map(|row| serde_json::from_value(row).unwrap())
        .collect()
}

#[tokio::test]
async fn borrow_then_return_restores_stock() {
    let h = TestHarness::new().with_book(1, "Dune", "Fiction", 3).await;
    let loans = &h.services.loans;

    let record = assert_ok!(loans.borrow_book(borrow(10, 5, 1)).await);
    assert!(record.is_open());
    assert_eq!(stock(&h, 1).await, 2);

    let returned = assert_ok!(loans.return_book(10).await);
    assert_eq!(returned.return_date, Some(Local::now().date_naive()));
    assert_eq!(stock(&h, 1).await, 3);

    let records = records(&h);
    assert_eq!(records.len(), 1);
    assert!(records[0].return_date.is_some());
}

#[tokio::test]
async fn borrow_out_of_stock_changes_nothing() {
    let h = TestHarness::new().with_book(1, "Dune", "Fiction", 0).await;

    let err = assert_err!(h.services.loans.borrow_book(borrow(10, 5, 1)).await);
    assert!(matches!(err, AppError::OutOfStock(1)));
    assert_eq!(stock(&h, 1).await, 0);
    assert!(records(&h).is_empty());
}

#[tokio::test]
async fn dune_scenario() {
    let h = TestHarness::new().with_book(1, "Dune", "Fiction", 2).await;
    let loans = &h.services.loans;
    let today = Local::now().date_naive();

    assert_ok!(loans.borrow_book(borrow(100, 5, 1)).await);
    assert_eq!(stock(&h, 1).await, 1);
    assert_eq!(
        records(&h),
        vec![BorrowRecord {
            record_id: 100,
            member_id: 5,
            book_id: 1,
            borrow_date: today,
            return_date: None,
        }]
    );

    assert_ok!(loans.borrow_book(borrow(101, 6, 1)).await);
    assert_eq!(stock(&h, 1).await, 0);

    let err = assert_err!(loans.borrow_book(borrow(102, 7, 1)).await);
    assert!(matches!(err, AppError::OutOfStock(1)));
    assert_eq!(stock(&h, 1).await, 0);
    assert_eq!(records(&h).len(), 2);

    assert_ok!(loans.return_book(100).await);
    assert_eq!(stock(&h, 1).await, 1);
    let record = records(&h).into_iter().find(|r| r.record_id == 100).unwrap();
    assert_eq!(record.return_date, Some(today));
}

#[tokio::test]
async fn returning_twice_is_rejected() {
    let h = TestHarness::new().with_book(1, "Dune", "Fiction", 1).await;
    let loans = &h.services.loans;

    assert_ok!(loans.borrow_book(borrow(100, 5, 1)).await);
    assert_ok!(loans.return_book(100).await);

    let err = assert_err!(loans.return_book(100).await);
    assert!(matches!(err, AppError::AlreadyReturned(100)));
    assert_eq!(stock(&h, 1).await, 1);
}

#[tokio::test]
async fn duplicate_record_id_keeps_stock() {
    let h = TestHarness::new().with_book(1, "Dune", "Fiction", 2).await;
    let loans = &h.services.loans;

    assert_ok!(loans.borrow_book(borrow(100, 5, 1)).await);
    let err = assert_err!(loans.borrow_book(borrow(100, 6, 1)).await);
    assert!(matches!(err, AppError::Store(_)));
    assert!(!err.is_fatal());
    assert_eq!(stock(&h, 1).await, 1);
}

#[tokio::test]
async fn delete_member_with_history_is_rejected() {
    let h = TestHarness::new()
        .with_book(1, "Dune", "Fiction", 1)
        .await
        .with_member(5, "Ada")
        .await;

    assert_ok!(h.services.loans.borrow_book(borrow(100, 5, 1)).await);
    let err = assert_err!(h.services.members.delete_member(5).await);
    assert!(matches!(err, AppError::HasBorrowHistory(_)));

    // Closed records still block
    assert_ok!(h.services.loans.return_book(100).await);
    let err = assert_err!(h.services.members.delete_member(5).await);
    assert!(matches!(err, AppError::HasBorrowHistory(_)));
    assert_eq!(h.store.rows(Table::Members).len(), 1);
}

#[tokio::test]
async fn delete_book_with_history_is_rejected() {
    let h = TestHarness::new().with_book(1, "Dune", "Fiction", 1).await;

    assert_ok!(h.services.loans.borrow_book(borrow(100, 5, 1)).await);
    assert_ok!(h.services.loans.return_book(100).await);

    let err = assert_err!(h.services.catalog.delete_book(1).await);
    assert!(matches!(err, AppError::HasBorrowHistory(msg) if msg.contains("borrow history")));
    assert_eq!(h.store.rows(Table::Books).len(), 1);
}

#[tokio::test]
async fn delete_without_history() {
    let h = TestHarness::new()
        .with_book(1, "Dune", "Fiction", 1)
        .await
        .with_member(5, "Ada")
        .await;

    assert_ok!(h.services.members.delete_member(5).await);
    assert_ok!(h.services.catalog.delete_book(1).await);
    assert!(h.store.rows(Table::Members).is_empty());
    assert!(h.store.rows(Table::Books).is_empty());

    let err = assert_err!(h.services.catalog.delete_book(1).await);
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn search_by_category_is_case_insensitive() {
    let h = TestHarness::new()
        .with_book(1, "Dune", "Fiction", 1)
        .await
        .with_book(2, "Foundation", "SCI-FIC", 1)
        .await
        .with_book(3, "Hamlet", "Drama", 1)
        .await;

    let mut ids: Vec<i64> = h
        .services
        .catalog
        .search_books("category", "fic")
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.book_id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);

    let err = assert_err!(h.services.catalog.search_books("publisher", "x").await);
    assert!(matches!(err, AppError::InvalidField(_)));
}

#[tokio::test]
async fn member_details_resolves_titles() {
    let h = TestHarness::new()
        .with_book(1, "Dune", "Fiction", 2)
        .await
        .with_book(2, "Hamlet", "Drama", 1)
        .await
        .with_member(5, "Ada")
        .await;
    let loans = &h.services.loans;

    assert_ok!(loans.borrow_book(borrow(100, 5, 1)).await);
    assert_ok!(loans.borrow_book(borrow(101, 5, 2)).await);
    assert_ok!(loans.return_book(100).await);

    let details = h.services.members.member_details(5).await.unwrap();
    assert_eq!(details.member.email, "ada@example.org");
    assert_eq!(details.loans.len(), 2);
    assert_eq!(details.loans[0].title.as_deref(), Some("Dune"));
    assert!(details.loans[0].return_date.is_some());
    assert_eq!(details.loans[1].title.as_deref(), Some("Hamlet"));
    assert!(details.loans[1].return_date.is_none());
}

#[tokio::test]
async fn updates_require_existing_rows() {
    let h = TestHarness::new()
        .with_book(1, "Dune", "Fiction", 2)
        .await
        .with_member(5, "Ada")
        .await;

    assert_ok!(h.services.members.update_email(5, "ada@lovelace.org").await);
    assert_eq!(h.store.rows(Table::Members)[0]["email"], json!("ada@lovelace.org"));

    let err = assert_err!(h.services.members.update_email(6, "x@y.org").await);
    assert!(matches!(err, AppError::NotFound(_)));

    assert_ok!(
        h.services
            .catalog
            .update_stock(StockUpdate { book_id: 1, stock: 7 })
            .await
    );
    assert_eq!(stock(&h, 1).await, 7);

    let err = assert_err!(
        h.services
            .catalog
            .update_stock(StockUpdate { book_id: 2, stock: 7 })
            .await
    );
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn return_at_maximum_stock_keeps_record_open() {
    let h = TestHarness::new().with_book(1, "Dune", "Fiction", 1).await;
    let loans = &h.services.loans;

    assert_ok!(loans.borrow_book(borrow(100, 5, 1)).await);
    assert_ok!(
        h.services
            .catalog
            .update_stock(StockUpdate {
                book_id: 1,
                stock: i64::MAX
            })
            .await
    );

    let err = assert_err!(loans.return_book(100).await);
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(!err.is_fatal());
    assert_eq!(stock(&h, 1).await, i64::MAX);
    assert!(records(&h)[0].is_open());
}
