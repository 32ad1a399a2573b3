//! Local inspection CLI for the board store.
//!
//! # Responsibility
//! - Verify `yaboard_core` linkage (`ping`).
//! - Migrate a database file and print listings as JSON lines.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;
use yaboard_core::db::migrations::latest_version;
use yaboard_core::db::open_db;
use yaboard_core::{
    init_logging, load_from_file, BoardConfig, NewsService, NoteService, Principal,
    SqliteNewsRepository, SqliteNoteRepository, SqliteUserRepository, UserRepository,
};

#[derive(Debug, Parser)]
#[command(name = "yaboard")]
#[command(about = "News board and notes inspection CLI")]
struct Cli {
    #[arg(long, default_value = "./yaboard.sqlite3")]
    db: PathBuf,

    /// YAML board config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long, default_value = yaboard_core::default_log_level())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core ping and version.
    Ping,
    /// Apply pending schema migrations.
    Migrate,
    /// Print the home page listing.
    Home,
    /// Print the comment thread of one news item.
    Comments { news_id: Uuid },
    /// Print the notes owned by one user.
    Notes { username: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir)?;
    }

    let config = match cli.config.as_ref() {
        Some(path) => load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BoardConfig::default(),
    };

    match cli.command {
        Command::Ping => {
            println!("yaboard_core ping={}", yaboard_core::ping());
            println!("yaboard_core version={}", yaboard_core::core_version());
        }
        Command::Migrate => {
            open_db(&cli.db)
                .with_context(|| format!("failed to open {}", cli.db.display()))?;
            println!("{}", json!({ "schema_version": latest_version() }));
        }
        Command::Home => {
            let conn = open_db(&cli.db)?;
            let service = NewsService::with_config(SqliteNewsRepository::try_new(&conn)?, &config);
            for news in service.home_listing()? {
                println!("{}", serde_json::to_string(&news)?);
            }
        }
        Command::Comments { news_id } => {
            let conn = open_db(&cli.db)?;
            let service = NewsService::with_config(SqliteNewsRepository::try_new(&conn)?, &config);
            for comment in service.comment_thread(news_id)? {
                println!("{}", serde_json::to_string(&comment)?);
            }
        }
        Command::Notes { username } => {
            let conn = open_db(&cli.db)?;
            let user = SqliteUserRepository::try_new(&conn)?
                .find_by_username(&username)?
                .ok_or_else(|| anyhow!("unknown user `{username}`"))?;
            let service = NoteService::with_config(SqliteNoteRepository::try_new(&conn)?, &config);
            for note in service.owner_scoped_notes(&Principal::from(&user))? {
                println!("{}", serde_json::to_string(&note)?);
            }
        }
    }

    Ok(())
}
