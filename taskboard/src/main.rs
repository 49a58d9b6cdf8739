//! Taskboard server binary.

use taskboard::infrastructure::{config::Settings, server, telemetry::TelemetryBuilder};
use taskboard::state::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Settings::new()?;

    TelemetryBuilder::from_settings(&config.telemetry, env!("CARGO_PKG_VERSION")).init()?;

    info!("Taskboard starting...");

    let state = match AppState::from_settings(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application state: {:?}", e);
            std::process::exit(1);
        }
    };

    server::run_server(&config, state).await
}
