//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod book;
pub mod loan;
pub mod user;

pub use audit::handle_audit_command;
pub use book::{handle_book_command, BookCommands};
pub use loan::{handle_borrow_command, handle_return_command};
pub use user::{handle_user_command, UserCommands};
