//! # haxbot
//!
//! Runs a room session against an in-memory host driven from stdin.
//! Each input line is one JSON object, see [`ConsoleInput`].

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use haxbot_engine::SessionController;
use haxbot_room::{ConsoleInput, LocalRoom};
use haxbot_settings::{load_settings, load_settings_from_path};
use haxbot_telemetry::{init_telemetry, parse_level, TelemetryConfig};

/// Room bot with a chat command line and autostart.
#[derive(Parser, Debug)]
#[command(name = "haxbot", version, about = "HaxBall room bot")]
struct Cli {
    /// Settings file (defaults to ~/.haxbot/settings.json).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Default log level. RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = parse_level(&cli.log_level)
        .ok_or_else(|| anyhow!("invalid log level: {}", cli.log_level))?;
    init_telemetry(&TelemetryConfig {
        log_level,
        json: cli.json_logs,
        ..TelemetryConfig::default()
    });

    let settings = match &cli.settings {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => load_settings().context("Failed to load settings")?,
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let room = Arc::new(LocalRoom::open(&settings.room, event_tx).with_transcript());
    info!(
        listing = %room.listing(),
        autostart = settings.autostart.enabled,
        "opening room"
    );
    let controller = SessionController::new(room.clone(), settings);
    controller.init().await.context("Room init failed")?;

    let shutdown = CancellationToken::new();
    let session = tokio::spawn(controller.run(event_rx, shutdown.clone()));
    let console = tokio::spawn(read_console(room.clone(), shutdown.clone()));

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("Failed to listen for ctrl+c")?;
            info!("interrupted");
        }
        _ = shutdown.cancelled() => {}
    }
    shutdown.cancel();
    console.abort();

    let controller = session.await.context("Session task failed")?;
    room.close();
    info!(
        state = %controller.session().state(),
        stadium = %room.stadium(),
        "session ended"
    );
    Ok(())
}

/// Feed stdin lines into the room until EOF, then request shutdown.
async fn read_console(room: Arc<LocalRoom>, shutdown: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match ConsoleInput::parse_line(line) {
                    Ok(input) => {
                        if let Err(e) = room.apply(input) {
                            warn!(error = %e, "console input rejected");
                        }
                    }
                    Err(e) => warn!(error = %e, line, "invalid console input"),
                }
            }
            Ok(None) => {
                info!("console input closed");
                break;
            }
            Err(e) => {
                warn!(error = %e, "failed to read console input");
                break;
            }
        }
    }
    shutdown.cancel();
}
