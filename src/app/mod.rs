mod router;
pub mod server;
pub mod signal;
pub mod state;
pub mod tracing;

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use crate::adapter::LogReporter;
use crate::config::{BuildInfo, Cli};
use crate::error::ServerError;
use server::Server;
use state::Lifecycle;

/// Application entry point: configure → start → await signal → stop.
///
/// Exits non-zero when configuration, start or stop fails.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    tracing::init_tracing(cli.log_format);

    let config = match cli.into_server_config(BuildInfo::from_build_env()) {
        Ok(config) => config,
        Err(e) => {
            ::tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let server = Arc::new(Server::new(config, Arc::new(LogReporter)));

    let stopper = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { stop_on(&server, signal::shutdown_signal).await })
    };

    if let Err(e) = server.start().await {
        ::tracing::error!(error = %e, "Error starting server");
        return ExitCode::FAILURE;
    }

    match stopper.await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            ::tracing::error!(error = %e, "Error stopping server");
            ExitCode::FAILURE
        }
        Err(e) => {
            ::tracing::error!(error = %e, "Shutdown task failed");
            ExitCode::FAILURE
        }
    }
}

/// Stop `server` on the first `signal` that finds it started.
///
/// A signal that lands before `start` has run is logged and the wait goes on.
async fn stop_on<F, Fut>(server: &Server, mut signal: F) -> Result<(), ServerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        signal().await;
        match server.stop().await {
            Err(ServerError::InvalidState {
                state: Lifecycle::Created,
                ..
            }) => {
                ::tracing::warn!("Shutdown signal arrived before start, still waiting");
            }
            result => return result,
        }
    }
}
