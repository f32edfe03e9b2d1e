//! Book display formatting
//!
//! Formats books for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Book;

#[derive(Tabled)]
struct BookRow<'a> {
    #[tabled(rename = "ISBN")]
    isbn: &'a str,
    #[tabled(rename = "Title")]
    title: &'a str,
    #[tabled(rename = "Author")]
    author: &'a str,
    #[tabled(rename = "Available")]
    quantity: u32,
}

impl<'a> From<&'a Book> for BookRow<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            isbn: book.isbn(),
            title: book.title(),
            author: book.author(),
            quantity: book.quantity(),
        }
    }
}

/// Format a list of books as a table
pub fn format_book_list<'a, I>(books: I) -> String
where
    I: IntoIterator<Item = &'a Book>,
{
    let rows: Vec<BookRow<'a>> = books.into_iter().map(BookRow::from).collect();
    if rows.is_empty() {
        return "No books found.".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a single book's details
pub fn format_book_details(book: &Book, borrowers: &[&str]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Book: {}\n", book.title()));
    output.push_str(&format!("  Author:     {}\n", book.author()));
    output.push_str(&format!("  ISBN:       {}\n", book.isbn()));
    output.push_str(&format!("  Available:  {}\n", book.quantity()));

    if !borrowers.is_empty() {
        output.push_str(&format!("  Borrowed by: {}\n", borrowers.join(", ")));
    }

    output
}
