use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use diesel::SqliteConnection;
use tracing::{error, info};

use feed_ingestor::FeedClient;
use feed_ingestor::login::{LoginProvider, STATION_LIST};
use feed_ingestor::source::HttpSource;

use station_sync::config::AppConfig;
use station_sync::notify::{LogNotifier, Notifier};
use station_sync::{catalog, db, places, snapshot};

#[derive(Parser)]
#[command(version, about = "Station Sync CLI")]
struct Cli {
    /// Configuration file (feed URL, time zone, selection).
    #[arg(long, value_name = "FILE", default_value = "station_sync.toml", global = true)]
    config: String,

    /// SQLite database file; falls back to DATABASE_URL.
    #[arg(long, value_name = "FILE", global = true)]
    database: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    Master(MasterCmd),
    Snapshot(SnapshotCmd),
}

#[derive(Args)]
struct MasterCmd {
    #[command(subcommand)]
    sub: MasterSub,
}

#[derive(Subcommand)]
enum MasterSub {
    /// Fetch the feed and insert unseen catalog entities.
    Update,
    /// Fetch the feed and print the catalog tree without writing anything.
    Show,
}

#[derive(Args)]
struct SnapshotCmd {
    #[command(subcommand)]
    sub: SnapshotSub,
}

#[derive(Subcommand)]
enum SnapshotSub {
    /// Record the current occupancy of the configured places.
    Record,
    /// Import previously saved feed files.
    Import {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = AppConfig::load_path(&cli.config)?;
    let tz = cfg.feed.tz()?;

    let db_path = match cli.database {
        Some(path) => path,
        None => shared_utils::env::database_url()
            .context("no --database given and DATABASE_URL is unset")?,
    };

    db::migrate::run_sqlite(&db_path)?;
    let mut conn = db::connection::connect_sqlite(&db_path)?;

    let client = feed_client(&cfg)?;

    match cli.cmd {
        Cmd::Master(MasterCmd { sub: MasterSub::Update }) => {
            let (tree, _) = client.fetch_and_parse()?;
            let summary = catalog::reconcile(&mut conn, &tree)?;
            if !summary.is_empty() {
                let subject = format!(
                    "[{}] {}",
                    cfg.notify.subject_prefix,
                    chrono::Local::now().format("%Y-%m-%d %H:%Mh")
                );
                LogNotifier.notify(&subject, &summary.to_string())?;
            }
            println!("{summary}");
        }

        Cmd::Master(MasterCmd { sub: MasterSub::Show }) => {
            let (tree, query_time) = client.fetch_and_parse()?;
            println!("feed state as of {query_time}");
            for domain in tree.domains() {
                println!("{}: {}", domain.country, domain.name);
                for city in &domain.cities {
                    println!(
                        "  {} (city {})",
                        city.name.as_deref().unwrap_or("?"),
                        city.uid
                    );
                    for place in &city.places {
                        println!(
                            "    {} (place {})",
                            place.name.as_deref().unwrap_or("?"),
                            place.uid
                        );
                    }
                }
                println!("----------------------------------------------------");
            }
        }

        Cmd::Snapshot(SnapshotCmd { sub: SnapshotSub::Record }) => {
            if let Some(summary) = catalog::fill_if_empty(&mut conn, &client)? {
                info!(inserted = summary.len(), "bootstrapped master catalog");
            }
            let filter = resolve_filter(&mut conn, &cfg)?;
            let inserted =
                snapshot::add_current_state(&mut conn, &client, tz, filter.as_ref())?;
            info!(inserted, "recorded current feed state");
        }

        Cmd::Snapshot(SnapshotCmd { sub: SnapshotSub::Import { files } }) => {
            if let Some(summary) = catalog::fill_if_empty(&mut conn, &client)? {
                info!(inserted = summary.len(), "bootstrapped master catalog");
            }
            let filter = resolve_filter(&mut conn, &cfg)?;
            for file in &files {
                match snapshot::import_file(&mut conn, Path::new(file), tz, filter.as_ref()) {
                    Ok(inserted) => info!(file = %file, inserted, "imported feed file"),
                    Err(err) => error!(file = %file, "import failed: {err:#}"),
                }
            }
        }
    }

    Ok(())
}

/// Build the retry-capable feed client from the configured URL table.
fn feed_client(cfg: &AppConfig) -> Result<FeedClient> {
    let url = cfg.url(STATION_LIST)?;
    let source = HttpSource::new(url, Duration::from_secs(cfg.feed.timeout_secs))?;
    Ok(FeedClient::new(Box::new(source)))
}

/// Resolve the configured selection, `None` meaning "record everything".
fn resolve_filter(
    conn: &mut SqliteConnection,
    cfg: &AppConfig,
) -> Result<Option<BTreeSet<i32>>> {
    if cfg.selection.is_empty() {
        return Ok(None);
    }
    let set = places::resolve(conn, &cfg.selection)?;
    Ok(Some(set))
}
