#![forbid(unsafe_code)]

//! `task-relay` — Asana → Telegram task mirror binary.
//!
//! Bootstraps configuration from the environment, loads the persisted state
//! store, and runs the polling reconciliation loop until terminated.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use task_relay::asana::AsanaClient;
use task_relay::config::GlobalConfig;
use task_relay::persistence::StateStore;
use task_relay::reconcile::{spawn_poll_task, Reconciler};
use task_relay::telegram::TelegramClient;
use task_relay::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "task-relay", about = "Asana → Telegram task mirror", version, long_about = None)]
struct Cli {
    /// Path to the JSON state file correlating tasks with messages.
    #[arg(long, default_value = "messages.json")]
    state_file: PathBuf,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Run a single reconciliation pass and exit.
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    let config = GlobalConfig::from_env()?;
    info!("configuration loaded");

    let store = StateStore::load(&args.state_file)?;
    info!(
        path = %store.path().display(),
        tracked = store.len(),
        "state store loaded"
    );

    let source = AsanaClient::new(config.asana.access_token.clone())?;
    let sink = TelegramClient::new(&config.telegram)?;
    let mut reconciler = Reconciler::new(source, sink, config.asana.project_gid.clone(), store);

    if args.once {
        reconciler.run_pass().await?;
        info!("single pass complete");
        return Ok(());
    }

    info!(
        interval_seconds = config.poll_interval_seconds,
        "polling started"
    );
    let ct = CancellationToken::new();
    let poll_handle = spawn_poll_task(
        reconciler,
        Duration::from_secs(config.poll_interval_seconds),
        ct.clone(),
    );

    shutdown_signal().await;
    info!("shutdown signal received");
    ct.cancel();

    let _ = poll_handle.await;
    info!("task-relay shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
