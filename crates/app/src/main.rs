use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, GameService, import_levels, load_connection_fixture};
use storage::content::ContentFile;
use storage::repository::Storage;
use storage::sqlite::SqliteDataSources;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://detective.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidPair { flag: &'static str, raw: String },
    NothingToSeed,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPair { flag, raw } => {
                write!(f, "invalid {flag} value (expected <id>=<value>): {raw}")
            }
            ArgsError::NothingToSeed => write!(f, "seed needs --levels or --fixture"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    game: Arc<GameService>,
}

impl UiApp for DesktopApp {
    fn game(&self) -> Arc<GameService> {
        Arc::clone(&self.game)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--source <id>=<sqlite_url>]...");
    eprintln!(
        "  cargo run -p app -- seed [--db <sqlite_url>] [--source <id>=<sqlite_url>]... \
         [--levels <levels.json>] [--fixture <id>=<script.sql>]..."
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DETECTIVE_DB_URL, DETECTIVE_SOURCES (id=url;id=url), DETECTIVE_LEVELS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    db_url: String,
    sources: Vec<(String, String)>,
    levels: Option<String>,
    fixtures: Vec<(String, String)>,
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let db_url = std::env::var("DETECTIVE_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let sources = match std::env::var("DETECTIVE_SOURCES") {
            Ok(raw) => parse_source_list(&raw)?,
            Err(_) => Vec::new(),
        };
        let levels = std::env::var("DETECTIVE_LEVELS")
            .ok()
            .filter(|value| !value.trim().is_empty());
        Ok(Self {
            db_url,
            sources,
            levels,
            fixtures: Vec::new(),
        })
    }

    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env()?;

        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (_, "--db") => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                (_, "--source") => {
                    let value = require_value(args, "--source")?;
                    let (id, url) = parse_pair(&value, "--source")?;
                    parsed.set_source(id, normalize_sqlite_url(url));
                }
                (Command::Seed, "--levels") => {
                    parsed.levels = Some(require_value(args, "--levels")?);
                }
                (Command::Seed, "--fixture") => {
                    let value = require_value(args, "--fixture")?;
                    parsed.fixtures.push(parse_pair(&value, "--fixture")?);
                }
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Seed && parsed.levels.is_none() && parsed.fixtures.is_empty() {
            return Err(ArgsError::NothingToSeed);
        }
        Ok(parsed)
    }

    /// Command-line sources override env sources with the same id.
    fn set_source(&mut self, id: String, url: String) {
        self.sources.retain(|(existing, _)| *existing != id);
        self.sources.push((id, url));
    }
}

fn parse_pair(raw: &str, flag: &'static str) -> Result<(String, String), ArgsError> {
    let invalid = || ArgsError::InvalidPair {
        flag,
        raw: raw.to_string(),
    };
    let (id, value) = raw.split_once('=').ok_or_else(invalid)?;
    let (id, value) = (id.trim(), value.trim());
    if id.is_empty() || value.is_empty() {
        return Err(invalid());
    }
    Ok((id.to_string(), value.to_string()))
}

fn parse_source_list(raw: &str) -> Result<Vec<(String, String)>, ArgsError> {
    raw.split(';')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (id, url) = parse_pair(entry, "DETECTIVE_SOURCES")?;
            Ok((id, normalize_sqlite_url(url)))
        })
        .collect()
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| format!("failed to initialize tracing subscriber: {err}"))?;
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing()?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let sources = Arc::new(SqliteDataSources::new(parsed.sources.clone())?);

    match cmd {
        Command::Ui => {
            if parsed.sources.is_empty() {
                tracing::warn!("no data sources configured; every query will fail");
            } else {
                let connections: Vec<&str> = sources.connections().collect();
                tracing::info!(?connections, "data sources configured");
            }
            let services = AppServices::new_sqlite(&parsed.db_url, sources).await?;
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                game: services.game(),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("SQL Detective")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let storage = Storage::sqlite(&parsed.db_url, sources.clone()).await?;
            if let Some(path) = parsed.levels.as_deref() {
                let content = ContentFile::from_path(path)?;
                let count = import_levels(storage.levels.as_ref(), content).await?;
                eprintln!("seed: imported {count} levels from {path}");
            }
            for (connection, script_path) in &parsed.fixtures {
                if let Some(url) = sources.url(connection) {
                    prepare_sqlite_file(url)?;
                }
                let script = std::fs::read_to_string(script_path)?;
                load_connection_fixture(&sources, connection, &script).await?;
                eprintln!("seed: loaded {script_path} into {connection}");
            }
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_split_on_the_first_equals() {
        assert_eq!(
            parse_pair("cases=sqlite://cases.db?mode=ro", "--source").unwrap(),
            ("cases".to_string(), "sqlite://cases.db?mode=ro".to_string())
        );
        assert!(matches!(
            parse_pair("cases", "--source"),
            Err(ArgsError::InvalidPair { flag: "--source", .. })
        ));
        assert!(parse_pair("=x", "--fixture").is_err());
        assert!(parse_pair("cases=", "--fixture").is_err());
    }

    #[test]
    fn source_list_skips_blank_entries() {
        let sources = parse_source_list("cases=sqlite:///tmp/cases.db; ;archive=sqlite:///tmp/a.db;")
            .unwrap();
        assert_eq!(
            sources,
            vec![
                ("cases".to_string(), "sqlite:///tmp/cases.db".to_string()),
                ("archive".to_string(), "sqlite:///tmp/a.db".to_string()),
            ]
        );
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("data/cases.sqlite3".to_string());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/cases.sqlite3"), "{url}");
        assert_eq!(
            normalize_sqlite_url("sqlite://already.db".to_string()),
            "sqlite://already.db"
        );
    }

    #[test]
    fn later_sources_replace_earlier_ids() {
        let mut args = Args::default();
        args.set_source("cases".into(), "sqlite:///a.db".into());
        args.set_source("cases".into(), "sqlite:///b.db".into());
        assert_eq!(args.sources, vec![("cases".to_string(), "sqlite:///b.db".to_string())]);
    }
}
