//! Todo - Command-line front end
//!
//! Every subcommand maps onto one [`todo_core::App`] operation. The session
//! established by `register` or `login` is persisted, so later invocations
//! act on the same user until `logout`.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todo_core::{App, Config};

use commands::Output;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Personal todo lists with a trash bin", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the database (defaults to $TODO_DATA_DIR or the platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Log in to an existing account
    Login { email: String, password: String },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List active tasks
    List,

    /// Mark a task done, or not done again
    Toggle { id: String },

    /// Replace the text of a task
    Edit {
        id: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Move a task to the trash
    Delete { id: String },

    /// Move every active task to the trash
    DeleteAll,

    /// List tasks in the trash
    Trash,

    /// Move a task from the trash back to the list
    Restore { id: String },

    /// Permanently delete a task from the trash
    Purge { id: String },

    /// Permanently delete everything in the trash
    EmptyTrash,
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match cli.data_dir {
        Some(dir) => Config::new(dir),
        None => Config::default(),
    };

    let app = App::open(&config)?;
    app.initialize()?;

    let out = Output::new(cli.json);

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::register(&app, &out, &name, &email, &password),
        Commands::Login { email, password } => {
            commands::account::login(&app, &out, &email, &password)
        }
        Commands::Logout => commands::account::logout(&app, &out),
        Commands::Whoami => commands::account::whoami(&app, &out),
        Commands::Add { text } => commands::todos::add(&app, &out, &text.join(" ")),
        Commands::List => commands::todos::list(&app, &out),
        Commands::Toggle { id } => commands::todos::toggle(&app, &out, &id),
        Commands::Edit { id, text } => commands::todos::edit(&app, &out, &id, &text.join(" ")),
        Commands::Delete { id } => commands::todos::delete(&app, &out, &id),
        Commands::DeleteAll => commands::todos::delete_all(&app, &out),
        Commands::Trash => commands::trash::list(&app, &out),
        Commands::Restore { id } => commands::trash::restore(&app, &out, &id),
        Commands::Purge { id } => commands::trash::purge(&app, &out, &id),
        Commands::EmptyTrash => commands::trash::empty(&app, &out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    todo_core::init_logging(log_filter(cli.verbose));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
