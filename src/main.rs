use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use ntultra::config::{self, AppConfig};
use ntultra::logging;
use ntultra::settings::is_scalar;
use ntultra::store::SqliteStore;
use ntultra::sync::{DirectoryMirror, NoopMirror, SyncMirror};
use ntultra::theme::{export_file_name, ThemeRegistry};
use ntultra::{ErrorSeverity, StoreError, ThemeError};

#[derive(Parser)]
#[command(author, version, about = "Manage new-tab themes and settings", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.ntultra/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database, overriding the configured path
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List themes, marking the active one
    List,
    /// Print the active theme's settings
    Show,
    /// Save the active settings as a new theme
    Create {
        name: String,
    },
    /// Activate a theme
    Switch {
        name: String,
    },
    /// Remove the active theme
    Remove,
    /// Change one setting on the active theme
    Set {
        key: String,
        /// JSON scalar (true, 12, 0.5, "text"); anything else is taken as text
        value: String,
    },
    /// Flip the expanded theme-controls panel
    ToggleExpanded,
    /// Export the active settings as a theme document
    Export {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Directory to write the document into (defaults to the current one)
        #[arg(long, conflicts_with = "stdout")]
        out: Option<PathBuf>,
        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Import a theme document from a file, or `-` for stdin
    Import {
        source: String,
    },
    /// Drop every user theme and return to the defaults
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let _guard = logging::init(config.log_to_file);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (severity, message) = describe(&err);
            eprintln!("{}: {}", severity_label(severity), message);
            ExitCode::from(exit_status(severity))
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let db_path = cli.db.unwrap_or_else(|| config.get_database_path());
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;

    let mirror: Arc<dyn SyncMirror> = match config.get_sync_dir() {
        Some(dir) => Arc::new(DirectoryMirror::new(dir)),
        None => Arc::new(NoopMirror),
    };

    let mut registry = ThemeRegistry::new(Arc::new(store), mirror);
    registry.load().await;
    info!(
        db = %db_path.display(),
        mirror = registry.has_mirror(),
        "Registry ready"
    );

    match cli.command {
        Command::List => {
            for theme in registry.theme_list() {
                let marker = if theme == registry.active_theme() { "*" } else { " " };
                println!("{} {}", marker, theme);
            }
        }
        Command::Show => {
            println!("Active theme: {}", registry.active_theme());
            println!("{}", serde_json::to_string_pretty(registry.settings())?);
        }
        Command::Create { name } => {
            let created = registry.create(&name).await?;
            println!("Created and activated '{}'", created);
        }
        Command::Switch { name } => {
            registry.switch_to(&name).await?;
            println!("Switched to '{}'", registry.active_theme());
        }
        Command::Remove => {
            let removed = registry.active_theme().to_string();
            match registry.remove().await {
                Some(fallback) => println!("Removed '{}', now using '{}'", removed, fallback),
                None => println!("'{}' is built in and can't be removed", removed),
            }
        }
        Command::Set { key, value } => {
            registry.update(&key, parse_setting_value(&value)).await?;
            println!("{} = {} on '{}'", key, value, registry.active_theme());
        }
        Command::ToggleExpanded => {
            let expanded = registry.toggle_style_expanded().await;
            println!("styleExpanded = {}", expanded);
        }
        Command::Export {
            name,
            author,
            description,
            out,
            stdout,
        } => {
            let document = registry.export(&name, &author, &description);
            let text = document.to_pretty_json()?;
            if stdout {
                println!("{}", text);
            } else {
                let dir = out.unwrap_or_else(|| PathBuf::from("."));
                let path = dir.join(export_file_name(&document.name));
                std::fs::write(&path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Exported '{}' -> {}", document.name, path.display());
            }
        }
        Command::Import { source } => {
            let text = read_source(&source)?;
            let imported = registry.import_json(&text).await?;
            println!("Imported and activated '{}'", imported);
        }
        Command::Reset => {
            registry.reset_themes().await;
            println!("All themes removed, using defaults");
        }
    }

    Ok(())
}

/// Severity and user-facing text for a failed command.
fn describe(err: &anyhow::Error) -> (ErrorSeverity, String) {
    if let Some(theme_err) = err.downcast_ref::<ThemeError>() {
        return (theme_err.severity(), theme_err.user_message());
    }
    if let Some(store_err) = err.downcast_ref::<StoreError>() {
        return (store_err.severity(), format!("{:#}", err));
    }
    (ErrorSeverity::Error, format!("{:#}", err))
}

fn severity_label(severity: ErrorSeverity) -> &'static str {
    match severity {
        ErrorSeverity::Info => "Note",
        ErrorSeverity::Warning => "Warning",
        ErrorSeverity::Error | ErrorSeverity::Critical => "Error",
    }
}

/// 2 for rejected input the user can simply retry, 1 for real failures.
fn exit_status(severity: ErrorSeverity) -> u8 {
    match severity {
        ErrorSeverity::Info => 0,
        ErrorSeverity::Warning => 2,
        ErrorSeverity::Error | ErrorSeverity::Critical => 1,
    }
}

/// JSON scalars keep their type; anything else is a plain string.
fn parse_setting_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if is_scalar(&value) => value,
        _ => Value::String(raw.to_string()),
    }
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
