//! Shared fixtures for integration tests

use std::io::Cursor;
use std::sync::Arc;

use library_console::{
    console::Console,
    models::{CreateBook, CreateMember},
    repository::Repository,
    services::Services,
    store::MemoryStore,
};

pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub services: Services,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let services = Services::new(Repository::new(store.clone()));
        Self { store, services }
    }

    pub async fn with_book(self, book_id: i64, title: &str, category: &str, stock: i64) -> Self {
        self.services
            .catalog
            .add_book(CreateBook {
                book_id,
                title: title.to_string(),
                author: "Herbert".to_string(),
                category: category.to_string(),
                stock,
            })
            .await
            .expect("add book");
        self
    }

    pub async fn with_member(self, member_id: i64, name: &str) -> Self {
        self.services
            .members
            .add_member(CreateMember {
                member_id,
                name: name.to_string(),
                email: format!("{}@example.org", name.to_lowercase()),
            })
            .await
            .expect("add member");
        self
    }

    /// Feed `input` to a console session and return everything it printed
    #[allow(dead_code)]
    pub async fn run_console(&self, input: &str) -> String {
        let mut console = Console::new(
            self.services.clone(),
            Cursor::new(input.to_string()),
            Vec::new(),
        );
        console.run().await.expect("console session");
        String::from_utf8(console.output().clone()).expect("utf-8 output")
    }
}
