use anyhow::Result;
use clap::Parser;
use infrastructure::{ServerConfig, StorageBackend, StorageFactory};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message_server::{api, setup_app_state};

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-device message store over HTTP", long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long)]
    config_dir: Option<String>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,

    /// Override API port
    #[arg(long)]
    port: Option<u16>,

    /// Override storage backend (file, sqlite, memory)
    #[arg(long)]
    storage: Option<StorageBackend>,

    /// Override data directory for the file backend
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,message_server=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("📨 Device Message Server Starting...");

    // Run from the workspace root or from the install directory
    let config_dir = args.config_dir.clone().unwrap_or_else(|| {
        let dev_dir = "crates/message-server/config";
        if std::path::Path::new(dev_dir).exists() {
            dev_dir.to_string()
        } else {
            "config".to_string()
        }
    });
    info!("📂 Config directory: {}", config_dir);

    let mut config = ServerConfig::load(&config_dir)?;

    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(backend) = args.storage {
        config.storage.backend = backend;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }
    info!(backend = ?config.storage.backend, "✅ Configuration loaded");

    let storage = StorageFactory::create(&config.storage).await?;
    let state = setup_app_state(storage);
    let app = api::create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 API Listening on http://{}", addr);
    info!("📡 Device endpoint: http://{}/message?id=device1", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
