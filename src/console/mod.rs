//! Interactive text console
//!
//! Reads a menu choice and the fields it needs, runs the matching service
//! operation and prints a confirmation or warning line. Expected failures
//! are reported and the loop continues; store outages end the session.

pub mod menu;
pub mod render;

use std::io::{self, BufRead, Write};

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::{CreateBook, CreateBorrow, CreateMember, StockUpdate},
    services::Services,
};

use menu::{MenuChoice, MENU};

pub struct Console<R, W> {
    services: Services,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(services: Services, input: R, output: W) -> Self {
        Self {
            services,
            input,
            output,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run the menu loop until the user exits or input ends
    pub async fn run(&mut self) -> AppResult<()> {
        loop {
            writeln!(self.output, "\n{}", MENU)?;

            let line = match self.prompt("Enter your choice: ") {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };

            let Ok(choice) = line.parse::<MenuChoice>() else {
                writeln!(self.output, "⚠️ Invalid choice, try again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                break;
            }

            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) if e.is_fatal() => {
                    tracing::error!(error = %e, ?choice, "Aborting session");
                    return Err(e);
                }
                Err(e) => {
                    match e.kind() {
                        ErrorKind::Validation | ErrorKind::NotFound => {
                            tracing::info!(error = %e, ?choice, "Operation refused")
                        }
                        _ => tracing::warn!(error = %e, ?choice, "Operation failed"),
                    }
                    writeln!(self.output, "⚠️ {}", render::warning(&e))?;
                }
            }
        }

        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> AppResult<()> {
        match choice {
            MenuChoice::Exit => {}
            MenuChoice::AddMember => {
                let member = CreateMember {
                    member_id: self.prompt_id("Member ID: ")?,
                    name: self.prompt("Name: ")?,
                    email: self.prompt("Email: ")?,
                };
                let member = self.services.members.add_member(member).await?;
                writeln!(self.output, "✅ Member {} added", member.member_id)?;
            }
            MenuChoice::AddBook => {
                let book = CreateBook {
                    book_id: self.prompt_id("Book ID: ")?,
                    title: self.prompt("Title: ")?,
                    author: self.prompt("Author: ")?,
                    category: self.prompt("Category: ")?,
                    stock: self.prompt_id("Stock: ")?,
                };
                let book = self.services.catalog.add_book(book).await?;
                writeln!(self.output, "✅ Book {} added", book.book_id)?;
            }
            MenuChoice::UpdateMemberEmail => {
                let member_id = self.prompt_id("Member ID: ")?;
                let email = self.prompt("New Email: ")?;
                self.services.members.update_email(member_id, &email).await?;
                writeln!(self.output, "✅ Email updated for Member ID {}", member_id)?;
            }
            MenuChoice::UpdateBookStock => {
                let update = StockUpdate {
                    book_id: self.prompt_id("Book ID: ")?,
                    stock: self.prompt_id("New Stock: ")?,
                };
                let book_id = update.book_id;
                self.services.catalog.update_stock(update).await?;
                writeln!(self.output, "✅ Stock updated for Book ID {}", book_id)?;
            }
            MenuChoice::DeleteMember => {
                let member_id = self.prompt_id("Member ID: ")?;
                self.services.members.delete_member(member_id).await?;
                writeln!(self.output, "✅ Member deleted")?;
            }
            MenuChoice::DeleteBook => {
                let book_id = self.prompt_id("Book ID: ")?;
                self.services.catalog.delete_book(book_id).await?;
                writeln!(self.output, "✅ Book deleted")?;
            }
            MenuChoice::BorrowBook => {
                let request = CreateBorrow {
                    record_id: self.prompt_id("Record ID: ")?,
                    member_id: self.prompt_id("Member ID: ")?,
                    book_id: self.prompt_id("Book ID: ")?,
                };
                self.services.loans.borrow_book(request).await?;
                writeln!(self.output, "✅ Book borrowed successfully")?;
            }
            MenuChoice::ReturnBook => {
                let record_id = self.prompt_id("Record ID: ")?;
                self.services.loans.return_book(record_id).await?;
                writeln!(self.output, "✅ Book returned successfully")?;
            }
            MenuChoice::ListBooks => {
                let books = self.services.catalog.list_books().await?;
                writeln!(self.output, "\n📚 Books:")?;
                for book in &books {
                    writeln!(self.output, "{}", render::book_line(book))?;
                }
            }
            MenuChoice::SearchBooks => {
                let field = self.prompt("Search by (title/author/category): ")?;
                let keyword = self.prompt("Keyword: ")?;
                let books = self.services.catalog.search_books(&field, &keyword).await?;
                if books.is_empty() {
                    writeln!(self.output, "No matching books.")?;
                }
                for book in &books {
                    writeln!(self.output, "{}", render::book_line(book))?;
                }
            }
            MenuChoice::MemberDetails => {
                let member_id = self.prompt_id("Member ID: ")?;
                let details = self.services.members.member_details(member_id).await?;
                for line in render::member_details(&details) {
                    writeln!(self.output, "{}", line)?;
                }
            }
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line; end of input is `UnexpectedEof`
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Read an integer, asking again until the input parses
    fn prompt_id(&mut self, label: &str) -> io::Result<i64> {
        loop {
            let line = self.prompt(label)?;
            match line.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    let error = AppError::Validation(format!("'{}' is not a whole number", line));
                    writeln!(self.output, "⚠️ {}", error)?;
                }
            }
        }
    }
}
