//! Delimited text codec for the catalog files
//!
//! Books are stored one per line as `title;author;isbn;quantity`, users as
//! `name;id;isbn1,isbn2,...`. Parsing never fails as a whole: a line that
//! does not yield a complete record is counted and skipped. Nothing here
//! touches the filesystem, so the skip rules can be tested on plain strings.

use std::io::{self, Read, Write};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::models::{Book, User};

/// Field separator within a line
pub const FIELD_DELIMITER: u8 = b';';

/// Separator between ISBNs in a user's borrowed list
pub const ISBN_DELIMITER: char = ',';

/// Records recovered from one file and the number of lines dropped
#[derive(Debug)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Parse a books file
pub fn parse_books<R: Read>(input: R) -> Parsed<Book> {
    parse_records(input, "book", book_from_record)
}

/// Parse a users file
pub fn parse_users<R: Read>(input: R) -> Parsed<User> {
    parse_records(input, "user", user_from_record)
}

/// Build a book from `title;author;isbn;quantity`
///
/// Fields past the fourth are ignored. The quantity may be padded with
/// whitespace but must be a non-negative integer.
fn book_from_record(record: &StringRecord) -> Option<Book> {
    let title = record.get(0)?;
    let author = record.get(1)?;
    let isbn = record.get(2)?;
    let quantity = record.get(3)?.trim().parse::<u32>().ok()?;
    Some(Book::new(title, author, isbn, quantity))
}

/// Build a user from `name;id;isbns`
///
/// An empty or missing ISBN field means nothing is borrowed. Otherwise every
/// segment between commas is kept, empty ones included, so a list written by
/// [`format_user`] reads back unchanged.
fn user_from_record(record: &StringRecord) -> Option<User> {
    let name = record.get(0)?;
    let id = record.get(1)?;

    let mut user = User::new(name, id);
    match record.get(2) {
        None | Some("") => {}
        Some(isbns) => isbns
            .split(ISBN_DELIMITER)
            .for_each(|isbn| user.borrow_book(isbn)),
    }
    Some(user)
}

fn parse_records<R, T>(
    input: R,
    kind: &'static str,
    build: impl Fn(&StringRecord) -> Option<T>,
) -> Parsed<T>
where
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let mut parsed = Parsed::default();

    for result in reader.records() {
        match result {
            Ok(record) => match build(&record) {
                Some(entity) => parsed.records.push(entity),
                None => {
                    debug!(
                        kind,
                        line = record.position().map(|p| p.line()),
                        "Skipping malformed line"
                    );
                    parsed.skipped += 1;
                }
            },
            Err(e) if e.is_io_error() => {
                debug!(kind, error = %e, "Stopping parse after read error");
                break;
            }
            Err(e) => {
                debug!(kind, error = %e, "Skipping unreadable line");
                parsed.skipped += 1;
            }
        }
    }

    parsed
}

/// Format a book as one line, without the trailing newline
pub fn format_book(book: &Book) -> String {
    format!(
        "{};{};{};{}",
        book.title(),
        book.author(),
        book.isbn(),
        book.quantity()
    )
}

/// Format a user as one line, without the trailing newline
pub fn format_user(user: &User) -> String {
    format!(
        "{};{};{}",
        user.name(),
        user.id(),
        user.borrowed_isbns().join(",")
    )
}

/// Write books one per line
pub fn write_books<'a, W: Write>(
    mut writer: W,
    books: impl IntoIterator<Item = &'a Book>,
) -> io::Result<()> {
    for book in books {
        writeln!(writer, "{}", format_book(book))?;
    }
    writer.flush()
}

/// Write users one per line
pub fn write_users<'a, W: Write>(
    mut writer: W,
    users: impl IntoIterator<Item = &'a User>,
) -> io::Result<()> {
    for user in users {
        writeln!(writer, "{}", format_user(user))?;
    }
    writer.flush()
}
