//! Borrow and return commands

use crate::error::LibraryResult;
use crate::services::CatalogService;

/// Lend a copy of a book to a user
pub fn handle_borrow_command(
    service: &mut CatalogService,
    user_id: &str,
    isbn: &str,
) -> LibraryResult<()> {
    let (user, book) = service.borrow(user_id, isbn)?;
    println!("{} borrowed {}", user.name(), book);
    println!("  Copies left: {}", book.quantity());
    Ok(())
}

/// Take a book back from a user
pub fn handle_return_command(
    service: &mut CatalogService,
    user_id: &str,
    isbn: &str,
) -> LibraryResult<()> {
    let receipt = service.return_book(user_id, isbn)?;
    println!("{} returned {}", receipt.user.name(), receipt.book);
    println!("  Copies available: {}", receipt.book.quantity());

    match receipt.entries_removed {
        1 => {}
        0 => println!("  Note: {} had no record of borrowing this book", receipt.user.id()),
        n => println!(
            "  Note: cleared {} borrow records but restocked one copy",
            n
        ),
    }

    Ok(())
}
