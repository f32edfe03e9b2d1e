//! User display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::catalog::Catalog;
use crate::models::User;

#[derive(Tabled)]
struct UserRow<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Borrowed")]
    borrowed: usize,
}

impl<'a> From<&'a User> for UserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id(),
            name: user.name(),
            borrowed: user.borrowed_isbns().len(),
        }
    }
}

/// Format a list of users as a table
pub fn format_user_list(users: &[&User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let mut table = Table::new(users.iter().map(|u| UserRow::from(*u)));
    table.with(Style::psql());
    table.to_string()
}

/// Format a user's details, resolving borrowed ISBNs to titles
///
/// ISBNs no longer in the catalog are listed as removed.
pub fn format_user_details(user: &User, catalog: &Catalog) -> String {
    let mut output = String::new();

    output.push_str(&format!("User: {}\n", user.name()));
    output.push_str(&format!("  ID:         {}\n", user.id()));

    if user.borrowed_isbns().is_empty() {
        output.push_str("  Borrowed:   none\n");
        return output;
    }

    output.push_str("  Borrowed:\n");
    for isbn in user.borrowed_isbns() {
        match catalog.search_by_isbn(isbn) {
            Some(book) => output.push_str(&format!("    {}\n", book)),
            None => output.push_str(&format!("    {} (removed from catalog)\n", isbn)),
        }
    }

    output
}
