//! Display formatting for terminal output
//!
//! Provides utilities for formatting books and users for terminal display.

pub mod book;
pub mod user;

pub use book::{format_book_details, format_book_list};
pub use user::{format_user_details, format_user_list};
