//! User CLI commands

use clap::Subcommand;

use crate::display::{format_user_details, format_user_list};
use crate::error::LibraryResult;
use crate::services::CatalogService;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Add {
        /// User name
        name: String,
        /// User ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove a user
    Remove {
        /// User ID
        id: String,
    },
    /// List all users
    List,
    /// Show a user and the books they have borrowed
    Show {
        /// User ID
        id: String,
    },
}

/// Handle a user command
pub fn handle_user_command(service: &mut CatalogService, cmd: UserCommands) -> LibraryResult<()> {
    match cmd {
        UserCommands::Add { name, id } => {
            let user = service.add_user(&name, id.as_deref())?;
            println!("Added user: {}", user);
        }

        UserCommands::Remove { id } => {
            let user = service.remove_user(&id)?;
            println!("Removed user: {}", user);
            if !user.borrowed_isbns().is_empty() {
                println!(
                    "  Note: {} borrowed copies were not returned",
                    user.borrowed_isbns().len()
                );
            }
        }

        UserCommands::List => {
            let users = service.list_users();
            println!("{}", format_user_list(&users));
            if !users.is_empty() {
                println!("\nTotal: {} users", users.len());
            }
        }

        UserCommands::Show { id } => {
            let user = service.user(&id)?;
            print!("{}", format_user_details(user, service.catalog()));
        }
    }

    Ok(())
}
