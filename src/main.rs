use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use library::cli::{
    handle_audit_command, handle_book_command, handle_borrow_command, handle_return_command,
    handle_user_command, BookCommands, UserCommands,
};
use library::config::{paths::LibraryPaths, settings::Settings};
use library::services::CatalogService;
use library::storage::CatalogStore;

#[derive(Parser)]
#[command(
    name = "library",
    version,
    about = "Terminal-based library catalog",
    long_about = "Keeps track of the books in a small lending library, the users \
                  registered with it, and which copies each user has borrowed."
)]
struct Cli {
    /// Print diagnostic logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Book management commands
    #[command(subcommand)]
    Book(BookCommands),

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Lend a copy of a book to a user
    Borrow {
        /// User ID
        user: String,
        /// ISBN
        isbn: String,
    },

    /// Take a borrowed book back from a user
    Return {
        /// User ID
        user: String,
        /// ISBN
        isbn: String,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize a new catalog
    Init,

    /// Show current configuration and paths
    Config,
}

fn setup_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = LibraryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Book(cmd)) => {
            let mut service = CatalogService::open(&paths, settings)?;
            handle_book_command(&mut service, cmd)?;
        }
        Some(Commands::User(cmd)) => {
            let mut service = CatalogService::open(&paths, settings)?;
            handle_user_command(&mut service, cmd)?;
        }
        Some(Commands::Borrow { user, isbn }) => {
            let mut service = CatalogService::open(&paths, settings)?;
            handle_borrow_command(&mut service, &user, &isbn)?;
        }
        Some(Commands::Return { user, isbn }) => {
            let mut service = CatalogService::open(&paths, settings)?;
            handle_return_command(&mut service, &user, &isbn)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&paths, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing library catalog at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;

            let store = CatalogStore::from_config(&paths, &settings);
            store.initialize()?;

            println!("Initialization complete!");
            println!();
            println!("Books file: {}", store.books_file().display());
            println!("Users file: {}", store.users_file().display());
            println!();
            println!("Run 'library book add <title> <author> <isbn>' to add your first book.");
        }
        Some(Commands::Config) => {
            let store = CatalogStore::from_config(&paths, &settings);

            println!("Library Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Books file:       {}", store.books_file().display());
            println!("Users file:       {}", store.users_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit enabled:  {}", settings.audit_enabled);
            println!("  User ID prefix: {}", settings.user_id_prefix);
        }
        None => {
            println!("library - Terminal-based library catalog");
            println!();
            println!("Run 'library --help' for usage information.");
        }
    }

    Ok(())
}
