//! Pinboard server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), builds an
//! in-memory store, and serves the JSON API over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for an `[auth.users]` entry:
//!
//! ```
//! cargo run -p pinboard-server --bin pinboard -- --hash-password
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use pinboard_server::{AppState, ServerConfig};
use pinboard_store_memory::MemoryStore;
use rand_core::OsRng;
use tokio::{net::TcpListener, sync::watch};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Pinboard asset favourites server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured listen port.
  #[arg(short, long)]
  port: Option<u16>,

  /// Enable per-user rate limiting regardless of the configuration file.
  #[arg(long)]
  rate_limit: bool,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_password {
    let password = read_password()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("PINBOARD")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(port) = cli.port {
    server_cfg.port = port;
  }
  if cli.rate_limit {
    server_cfg.rate_limit.enabled = true;
  }
  if server_cfg.auth.users.is_empty() {
    tracing::warn!("no users configured under [auth.users]; login will always fail");
  }

  let store = Arc::new(MemoryStore::new());
  if server_cfg.preload {
    pinboard_store_memory::seed(store.as_ref(), server_cfg.preload_assets)
      .context("failed to seed store")?;
  }

  let state = AppState::new(store, &server_cfg);
  let app = pinboard_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(
    rate_limit = server_cfg.rate_limit.enabled,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  let (stop_tx, mut stop_rx) = watch::channel(false);
  let server = axum::serve(listener, app).with_graceful_shutdown(async move {
    shutdown_signal().await;
    let _ = stop_tx.send(true);
  });
  let server = server.into_future();
  tokio::pin!(server);

  let drain = Duration::from_secs(server_cfg.shutdown_timeout_secs);
  tokio::select! {
    res = &mut server => res.context("server error")?,
    _ = async {
      let _ = stop_rx.wait_for(|stopped| *stopped).await;
      tokio::time::sleep(drain).await;
    } => {
      tracing::warn!(?drain, "in-flight requests did not drain in time");
    }
  }

  tracing::info!("server stopped");
  Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
    {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
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
  tracing::info!("shutdown signal received, draining connections");
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
