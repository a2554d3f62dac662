//! Watch command implementation
//!
//! Runs the live terminal dashboard until `q`, SIGINT or SIGTERM.

use crate::cli::WatchArgs;
use crate::client::{HttpMonitorApi, MonitorApi};
use crate::config::{ConfigError, LogFormat, UptimeConfig};
use crate::dashboard::{
    ControllerSettings, DashboardController, NonInteractive, Prompter, RenderTarget,
    TerminalRenderer,
};
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keyboard commands accepted while watching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    Refresh,
    Quit,
}

/// Parse one line of keyboard input
pub fn parse_command(line: &str) -> Option<WatchCommand> {
    match line.trim().to_lowercase().as_str() {
        "r" | "refresh" => Some(WatchCommand::Refresh),
        "q" | "quit" | "exit" => Some(WatchCommand::Quit),
        _ => None,
    }
}

/// Load configuration with watch-specific CLI overrides
pub fn load_config_with_overrides(args: &WatchArgs) -> Result<UptimeConfig, ConfigError> {
    let mut config = args.connection.load_config()?;

    if let Some(interval_ms) = args.interval_ms {
        config.polling.interval_ms = interval_ms;
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing subscriber from logging configuration
///
/// Logs go to stderr so they never interleave with dashboard frames.
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Wait for a shutdown signal, then cancel the token
///
/// Returns early if the token is cancelled elsewhere.
pub async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install CTRL+C handler");
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
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => return,
    }

    cancel_token.cancel();
}

/// Forward stdin lines as commands from a plain thread.
///
/// A blocking read on tokio's stdin would hold up runtime shutdown.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<WatchCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => tracing::debug!(input = %line.trim(), "Ignoring unknown command"),
            }
        }
    });
}

/// Apply keyboard commands until quit or cancellation
pub async fn drive_commands<A, R, P>(
    controller: Arc<DashboardController<A, R, P>>,
    mut commands: mpsc::UnboundedReceiver<WatchCommand>,
    cancel_token: CancellationToken,
) where
    A: MonitorApi,
    R: RenderTarget,
    P: Prompter,
{
    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            command = commands.recv() => match command {
                Some(WatchCommand::Refresh) => {
                    tracing::debug!("Manual refresh requested");
                    controller.refresh().await;
                }
                Some(WatchCommand::Quit) => {
                    cancel_token.cancel();
                    break;
                }
                // Input closed; keep watching until a signal arrives
                None => {
                    cancel_token.cancelled().await;
                    break;
                }
            }
        }
    }
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    init_tracing(&config.logging)?;

    let api = Arc::new(HttpMonitorApi::new(&config.api)?);
    tracing::info!(
        api_url = %api.base_url(),
        interval_ms = config.polling.interval_ms,
        "Starting uptime dashboard"
    );

    let renderer = if args.no_clear {
        TerminalRenderer::new(std::io::stdout())
    } else {
        TerminalRenderer::live(std::io::stdout())
    };
    let controller = Arc::new(
        DashboardController::new(api, renderer, NonInteractive)
            .with_settings(ControllerSettings::from(&config)),
    );

    let cancel_token = CancellationToken::new();
    let poller = Arc::clone(&controller).start_polling(cancel_token.clone());

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(tx);
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    drive_commands(controller, rx, cancel_token).await;
    poller.await?;

    tracing::info!("Dashboard stopped");
    Ok(())
}
