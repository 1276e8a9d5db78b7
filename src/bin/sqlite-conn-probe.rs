use clap::Parser;
use serde::Serialize;
use tracing::Level;

use sqlite_conn::config::{JULIAN_DAY_PROPERTY, Properties, SHARED_CACHE_PROPERTY};
use sqlite_conn::{Driver, IsolationLevel, SqliteConnError};

/// Open a `sqlite:` URL, apply the requested settings and report the
/// resulting connection state.
#[derive(Parser, Debug)]
#[command(author, version, about = "Open a sqlite: URL and report connection state")]
struct Args {
    /// `sqlite:<path>` or `sqlite::memory:`
    url: String,
    #[arg(long)]
    shared_cache: bool,
    #[arg(long)]
    julian_day: bool,
    #[arg(long, value_enum)]
    isolation: Option<IsolationLevel>,
    #[arg(long)]
    busy_timeout_ms: Option<u32>,
    /// Log engine commands to stderr.
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    url: String,
    read_only: bool,
    auto_commit: bool,
    isolation: IsolationLevel,
    busy_timeout_ms: u32,
    shared_cache: bool,
    julian_day: bool,
    library_version: String,
    driver_version: String,
}

fn probe(args: &Args) -> Result<Report, SqliteConnError> {
    let mut props = Properties::new();
    props.insert(SHARED_CACHE_PROPERTY.into(), args.shared_cache.to_string());
    props.insert(JULIAN_DAY_PROPERTY.into(), args.julian_day.to_string());

    let mut conn = Driver::new()
        .connect(&args.url, &props)?
        .ok_or_else(|| SqliteConnError::ConfigError(format!("not a sqlite URL: '{}'", args.url)))?;

    if let Some(level) = args.isolation {
        conn.set_isolation_level(level)?;
    }
    if let Some(ms) = args.busy_timeout_ms {
        conn.set_busy_timeout(ms)?;
    }

    let driver_version = conn.meta_data()?.driver_version().to_string();
    let report = Report {
        url: conn.url().to_string(),
        read_only: conn.is_read_only(),
        auto_commit: conn.auto_commit()?,
        isolation: conn.isolation_level()?,
        busy_timeout_ms: conn.busy_timeout()?,
        shared_cache: conn.shared_cache(),
        julian_day: args.julian_day,
        library_version: conn.library_version()?,
        driver_version,
    };
    conn.close()?;
    Ok(report)
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if args.verbose { Level::TRACE } else { Level::WARN })
        .init();

    match probe(&args) {
        Ok(report) => {
            let json =
                serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
