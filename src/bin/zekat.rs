//! CLI binary for zekat.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zekat::render;
use zekat::{ApiStatus, AppConfig, HealthMonitor, SearchHistory, Session, ViewController};
use zekat_search::{ResultSource, WebhookClient};

/// Zekat: search academic research on zakat and Islamic finance.
#[derive(Parser)]
#[command(name = "zekat", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Start an interactive search session (default).
    Interactive,

    /// Search once and record the query in history.
    Search {
        /// Query text.
        query: String,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or clear the search history.
    History {
        /// Remove every saved query.
        #[arg(long)]
        clear: bool,
    },

    /// Probe the search webhook once.
    Status,

    /// Query the alternate publication index directly, without fallback.
    Direct {
        /// Query text.
        query: String,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout carries results; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("zekat=info,zekat_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => run_interactive(config).await,
        Command::Search { query, json } => run_search(config, &query, json).await,
        Command::History { clear } => run_history(&config, clear),
        Command::Status => run_status(config).await,
        Command::Direct { query, json } => run_direct(config, &query, json).await,
    }
}

fn load_history(config: &AppConfig) -> SearchHistory {
    SearchHistory::load_with_capacity(config.history.resolved_path(), config.history.capacity)
}

async fn run_interactive(config: AppConfig) -> anyhow::Result<()> {
    println!("Zekat v{}", env!("CARGO_PKG_VERSION"));

    let client = Arc::new(WebhookClient::new(config.search.clone())?);
    let monitor = HealthMonitor::spawn(Arc::clone(&client), config.ui.health_poll());
    let controller = ViewController::new(
        client,
        load_history(&config),
        config.ui.min_query_chars,
    )
    .with_health(monitor.handle());

    let mut session = Session::new(controller, monitor.subscribe(), &config.ui);
    let stdin = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = session.run(stdin, tokio::io::stdout()) => result?,
        _ = tokio::signal::ctrl_c() => info!("received Ctrl+C, shutting down..."),
    }

    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn run_search(config: AppConfig, query: &str, json: bool) -> anyhow::Result<()> {
    let query = query.trim();
    if query.chars().count() < config.ui.min_query_chars {
        anyhow::bail!(
            "Arama yapmak için en az {} karakter girmelisiniz",
            config.ui.min_query_chars
        );
    }

    let client = WebhookClient::new(config.search.clone())?;
    let pb = spinner(format!("\"{query}\" aranıyor..."));
    let outcome = client.search(query).await;
    pb.finish_and_clear();

    let mut history = load_history(&config);
    if let Err(e) = history.add(query) {
        tracing::warn!(error = %e, "cannot record search history");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if outcome.records.is_empty() {
        print!("{}", render::render_empty(query));
        return Ok(());
    }
    let status = match outcome.source {
        ResultSource::Remote => ApiStatus::Online,
        ResultSource::Fallback => ApiStatus::Offline,
    };
    print!("{}", render::render_results(query, &outcome.records, status, false));
    Ok(())
}

fn run_history(config: &AppConfig, clear: bool) -> anyhow::Result<()> {
    let mut history = load_history(config);
    if clear {
        history.clear()?;
        println!("Arama geçmişi silindi.");
    } else {
        print!("{}", render::render_history(&history));
    }
    Ok(())
}

async fn run_status(config: AppConfig) -> anyhow::Result<()> {
    let client = WebhookClient::new(config.search)?;
    let pb = spinner("Kontrol ediliyor...".to_owned());
    let online = client.check_health().await;
    pb.finish_and_clear();

    let status = if online {
        ApiStatus::Online
    } else {
        ApiStatus::Offline
    };
    println!("{}  [{}]", client.config().webhook_url, render::status_badge(status));
    Ok(())
}

async fn run_direct(config: AppConfig, query: &str, json: bool) -> anyhow::Result<()> {
    let client = WebhookClient::new(config.search)?;
    let pb = spinner(format!("\"{query}\" TRDizin üzerinde aranıyor..."));
    let result = client.fetch_direct(query.trim()).await;
    pb.finish_and_clear();

    let records = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        print!("{}", render::render_empty(query.trim()));
    } else {
        for (index, record) in records.iter().enumerate() {
            println!("{}", render::render_card(record, index));
        }
    }
    Ok(())
}
