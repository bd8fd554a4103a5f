//! Adboard: backend for the ad-classification dashboard

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use adboard::{
    config::{Config, StorageBackendKind},
    records::{export::write_csv_file, RecordStore},
    server::{handlers::AppState, HttpServer},
    storage::{MemoryObjectStore, ObjectStore, S3ObjectStore},
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "adboard")]
#[command(about = "Backend service for the ad-classification dashboard")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "adboard.toml")]
    config: PathBuf,

    /// Record data directory override
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Listen address override
        #[arg(short, long)]
        listen: Option<String>,

        /// Use the in-memory object store (no bucket credentials needed)
        #[arg(long)]
        memory: bool,
    },

    /// Write a starter configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Export analysis records to a CSV file
    Export {
        /// Output path
        output: PathBuf,
    },

    /// Show record store statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // Override data dir if specified
    if let Some(data_dir) = cli.data_dir {
        config.records.data_dir = data_dir;
    }

    init_tracing(&config, cli.verbose)?;

    match cli.command {
        Commands::Serve { listen, memory } => run_server(config, listen, memory).await,
        Commands::Init { path } => init_config(path).await,
        Commands::Export { output } => export_records(config, output).await,
        Commands::Stats => show_stats(config).await,
    }
}

/// Install the global tracing subscriber
fn init_tracing(config: &Config, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => config.logging.level.to_tracing(),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    match config.logging.format {
        adboard::config::LogFormat::Text => {
            tracing::subscriber::set_global_default(builder.finish())?
        }
        adboard::config::LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.json().finish())?
        }
    }

    Ok(())
}

async fn run_server(mut config: Config, listen: Option<String>, memory: bool) -> Result<()> {
    if let Some(addr) = listen {
        config.server.listen_addr = addr;
    }

    info!("Starting adboard server");

    let store: Arc<dyn ObjectStore> =
        if memory || config.storage.backend == StorageBackendKind::Memory {
            info!("Using in-memory object store");
            Arc::new(MemoryObjectStore::new())
        } else {
            info!("Connecting to bucket '{}'", config.storage.bucket);
            Arc::new(S3ObjectStore::connect(&config.storage).await?)
        };

    std::fs::create_dir_all(&config.records.data_dir)?;
    let records = Arc::new(RecordStore::open(&config.records.data_dir)?);
    info!(
        "Record store opened at {} ({} records)",
        config.records.data_dir.display(),
        records.len()
    );

    let state = AppState {
        store,
        records: records.clone(),
        signed_url_ttl: Duration::from_secs(config.storage.signed_url_ttl_secs),
        max_probe_attempts: config.storage.max_probe_attempts,
    };

    let (shutdown_tx, _) = broadcast::channel(4);

    let server = HttpServer::new(config.server.clone(), state);
    let server_rx = shutdown_tx.subscribe();
    let server_handle = tokio::spawn(async move {
        match server.run(server_rx).await {
            Ok(()) => info!("HTTP server shut down cleanly"),
            Err(e) => tracing::error!("HTTP server failed: {}", e),
        }
    });

    // Wait for shutdown signal (Ctrl+C or SIGTERM)
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    let _ = shutdown_tx.send(());

    let server_abort = server_handle.abort_handle();
    if tokio::time::timeout(Duration::from_secs(5), server_handle)
        .await
        .is_err()
    {
        warn!("HTTP server did not shut down within 5s, aborting");
        server_abort.abort();
    }

    // Flush pending record writes before exit
    records.flush()?;
    info!("Shutdown complete");

    Ok(())
}

/// Wait for SIGTERM signal
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!(
                "Failed to register SIGTERM handler: {}. Falling back to pending future.",
                e
            );
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    // On non-Unix, just wait forever (Ctrl+C will still work)
    std::future::pending::<()>().await
}

async fn init_config(path: PathBuf) -> Result<()> {
    let config = Config::default();
    let config_path = path.join("adboard.toml");

    let toml_content = format!(
        r#"# Adboard Configuration

[server]
listen_addr = "{}"
cors_enabled = {}
max_upload_bytes = {}
# api_keys = ["change-me"]

[storage]
backend = "s3"
bucket = "{}"
# region = "us-east-1"
# endpoint = "http://localhost:9000"
# force_path_style = true
signed_url_ttl_secs = {}
max_probe_attempts = {}

[records]
data_dir = ".adboard"

[logging]
format = "text"
level = "info"
"#,
        config.server.listen_addr,
        config.server.cors_enabled,
        config.server.max_upload_bytes,
        config.storage.bucket,
        config.storage.signed_url_ttl_secs,
        config.storage.max_probe_attempts,
    );

    std::fs::write(&config_path, toml_content)?;
    println!("Created configuration file: {}", config_path.display());

    let data_dir = path.join(".adboard");
    std::fs::create_dir_all(&data_dir)?;
    println!("Created data directory: {}", data_dir.display());

    Ok(())
}

async fn export_records(config: Config, output: PathBuf) -> Result<()> {
    let records_store = RecordStore::open(&config.records.data_dir)?;
    let records = records_store.list()?;

    write_csv_file(&records, &output)?;

    println!("Exported {} records to {}", records.len(), output.display());

    Ok(())
}

async fn show_stats(config: Config) -> Result<()> {
    let records_store = RecordStore::open(&config.records.data_dir)?;
    let records = records_store.list()?;

    let advertisements = records
        .iter()
        .filter(|r| r.label == "advertisement")
        .count();

    println!("\nAdboard Statistics:");
    println!("===================");
    println!("Data directory: {}", config.records.data_dir.display());
    println!("Total records:  {}", records.len());
    println!("Advertisements: {}", advertisements);
    println!("Other labels:   {}", records.len() - advertisements);

    Ok(())
}
