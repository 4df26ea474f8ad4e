//! Command-line entry point.
//!
//! # Responsibility
//! - Load configuration, open the dictionary database, and print one page
//!   context as JSON.

use clap::{Parser, Subcommand};
use dictionaria_core::db::open_db;
use dictionaria_core::{
    init_from_config, views, AppConfig, ConfigError, LexiconService, SqliteDictionaryRepository,
    SqliteLexiconRepository, SqliteResourceRepository,
};
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "dictionaria", version, about = "Query dictionary page contexts")]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database path, overriding `database.path` from the config.
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all dictionaries ordered by number.
    Download,
    /// Show the home page example lookups.
    Home,
    /// Show one word page by public id.
    Word { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the config file (or defaults) and applies the `--db` override.
fn resolve_config(path: Option<&Path>, db: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = db {
        config.database.path = db;
        config.validate()?;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(cli.config.as_deref(), cli.db)?;

    init_from_config(&config.logging)?;
    info!(
        "event=cli_start module=cli status=ok version={} db={}",
        dictionaria_core::core_version(),
        config.database.path.display()
    );

    let conn = open_db(&config.database.path)?;
    let output = match cli.command {
        Command::Download => {
            let dictionaries = SqliteDictionaryRepository::try_new(&conn)?;
            serde_json::to_string_pretty(&views::download(&dictionaries)?)?
        }
        Command::Home => {
            let resources = SqliteResourceRepository::try_new(&conn)?;
            serde_json::to_string_pretty(&views::home(&resources, &config.home)?)?
        }
        Command::Word { id } => {
            let lexicon = LexiconService::new(SqliteLexiconRepository::try_new(&conn)?);
            let dictionaries = SqliteDictionaryRepository::try_new(&conn)?;
            let resources = SqliteResourceRepository::try_new(&conn)?;
            let context = views::word(&lexicon, &dictionaries, &resources, &id)?;
            serde_json::to_string_pretty(&context)?
        }
    };

    println!("{output}");
    Ok(())
}
