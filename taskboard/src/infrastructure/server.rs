use crate::api;
use crate::infrastructure::audit::{self, AuditEvent};
use crate::infrastructure::config::Settings;
use crate::state::AppState;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Runs the HTTP server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the address is invalid, the listener cannot bind, or
/// the server fails while running.
pub async fn run_server(config: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = api::router(state).layer(TraceLayer::new_for_http());

    let addr = config.bind_address().to_socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    tracing::info!("Taskboard listening on {}", local);
    audit::log_audit(&AuditEvent::ServiceStartup {
        address: local.to_string(),
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    audit::log_audit(&AuditEvent::ServiceShutdown {
        reason: "Signal received".into(),
    });
    tracing::info!("Taskboard shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
