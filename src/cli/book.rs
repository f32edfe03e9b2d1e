//! Book CLI commands
//!
//! Implements CLI commands for managing the books in the catalog.

use clap::{ArgGroup, Subcommand};

use crate::display::{format_book_details, format_book_list};
use crate::error::{LibraryError, LibraryResult};
use crate::services::{CatalogService, SearchQuery};

/// Book subcommands
#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a new book to the catalog
    Add {
        /// Book title
        title: String,
        /// Book author
        author: String,
        /// ISBN (unique key)
        isbn: String,
        /// Copies available for lending
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a book from the catalog
    Remove {
        /// ISBN
        isbn: String,
    },
    /// List all books
    List,
    /// Search books by exact title, author or ISBN
    #[command(group(
        ArgGroup::new("query")
            .required(true)
            .multiple(false)
            .args(["title", "author", "isbn"])
    ))]
    Search {
        /// Match the title exactly
        #[arg(short, long)]
        title: Option<String>,
        /// Match the author exactly
        #[arg(short, long)]
        author: Option<String>,
        /// Match the ISBN
        #[arg(short, long)]
        isbn: Option<String>,
    },
    /// Show book details
    Show {
        /// ISBN
        isbn: String,
    },
}

/// Handle a book command
pub fn handle_book_command(service: &mut CatalogService, cmd: BookCommands) -> LibraryResult<()> {
    match cmd {
        BookCommands::Add {
            title,
            author,
            isbn,
            quantity,
        } => {
            let book = service.add_book(&title, &author, &isbn, quantity)?;
            println!("Added book: {}", book);
            println!("  Copies: {}", book.quantity());
        }

        BookCommands::Remove { isbn } => {
            let book = service.remove_book(&isbn)?;
            println!("Removed book: {}", book);
        }

        BookCommands::List => {
            let books = service.list_books();
            println!("{}", format_book_list(books.iter().copied()));
            if !books.is_empty() {
                println!("\nTotal: {} books", books.len());
            }
        }

        BookCommands::Search {
            title,
            author,
            isbn,
        } => {
            let query = match (title, author, isbn) {
                (Some(title), _, _) => SearchQuery::Title(title),
                (_, Some(author), _) => SearchQuery::Author(author),
                (_, _, Some(isbn)) => SearchQuery::Isbn(isbn),
                (None, None, None) => {
                    return Err(LibraryError::Validation(
                        "Specify one of --title, --author or --isbn".into(),
                    ))
                }
            };

            let books = service.search(&query);
            if books.is_empty() {
                println!("No matching books.");
            } else {
                println!("{}", format_book_list(&books));
            }
        }

        BookCommands::Show { isbn } => {
            let book = service.book(&isbn)?;
            let borrowers: Vec<&str> = service
                .list_users()
                .into_iter()
                .filter(|u| u.has_borrowed(&isbn))
                .map(|u| u.id())
                .collect();
            print!("{}", format_book_details(book, &borrowers));
        }
    }

    Ok(())
}
