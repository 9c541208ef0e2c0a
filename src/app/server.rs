use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use parking_lot::Mutex;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::app::router::otlp_router;
use crate::app::state::Lifecycle;
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::otlp::OTLPState;
use crate::port::SpanReporter;

/// Pause after a failed `accept` (e.g. out of file descriptors)
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// OTLP/HTTP server with a start/stop lifecycle.
///
/// `start` and `stop` take `&self` so one task can block in `start` while
/// another calls `stop`; share the server through an `Arc`.
pub struct Server {
    config: ServerConfig,
    address: String,
    router: Router,
    http: http1::Builder,
    state: Mutex<Lifecycle>,
    local_addr: Mutex<Option<SocketAddr>>,
    /// Stops accepting and asks connections to finish their current request
    shutdown: CancellationToken,
    /// Drops whatever is still open once the grace period is over
    force: CancellationToken,
    connections: TaskTracker,
}

impl Server {
    /// Build the route table and connection settings. Does no I/O.
    pub fn new(config: ServerConfig, reporter: Arc<dyn SpanReporter>) -> Self {
        let address = config.bind_address();
        let state = OTLPState {
            reporter,
            max_body_bytes: config.max_body_bytes,
        };
        let router = otlp_router(state, &config.timeouts);

        let mut http = http1::Builder::new();
        http.timer(TokioTimer::new())
            .header_read_timeout(config.timeouts.read_header)
            .keep_alive(true);

        Self {
            config,
            address,
            router,
            http,
            state: Mutex::new(Lifecycle::Created),
            local_addr: Mutex::new(None),
            shutdown: CancellationToken::new(),
            force: CancellationToken::new(),
            connections: TaskTracker::new(),
        }
    }

    /// Configured `host:port`
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Address actually bound, once listening
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.state.lock()
    }

    /// Bind and serve until `stop` closes the listener.
    ///
    /// Returns `Ok(())` when the listener was closed by `stop`; in-flight
    /// requests may still be draining at that point.
    pub async fn start(&self) -> Result<(), ServerError> {
        // While this token lives, `stop` also waits for the listener to close.
        let _listening = {
            let mut state = self.state.lock();
            if *state != Lifecycle::Created {
                return Err(ServerError::InvalidState {
                    operation: "start",
                    state: *state,
                });
            }
            *state = Lifecycle::Running;
            self.connections.token()
        };

        let listener = match TcpListener::bind(&self.address).await {
            Ok(listener) => listener,
            Err(source) => {
                *self.state.lock() = Lifecycle::Stopped;
                return Err(ServerError::Bind {
                    address: self.address.clone(),
                    source,
                });
            }
        };
        let local_addr = listener.local_addr().ok();
        *self.local_addr.lock() = local_addr;

        let build = &self.config.build;
        info!(
            version = build.version,
            commit = build.commit,
            release = build.release,
            build_date = build.date,
            address = %self.address,
            "Starting HTTP/OTLP server"
        );
        info!("  - POST /v1/traces     (OTLP traces)");

        loop {
            let (stream, peer) = tokio::select! {
                biased;
                () = self.shutdown.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                        continue;
                    }
                },
            };
            self.serve_connection(stream, peer);
        }

        drop(listener);
        info!(address = %self.address, "HTTP/OTLP listener closed");
        Ok(())
    }

    fn serve_connection(&self, stream: TcpStream, peer: SocketAddr) {
        let http = self.http.clone();
        let service = TowerToHyperService::new(self.router.clone());
        let shutdown = self.shutdown.clone();
        let force = self.force.clone();

        self.connections.spawn(async move {
            let conn = http.serve_connection(TokioIo::new(stream), service);
            let mut conn = std::pin::pin!(conn);

            let result = tokio::select! {
                result = conn.as_mut() => result,
                () = shutdown.cancelled() => {
                    // Idle keep-alive connections close right away; busy ones
                    // finish the current request first.
                    conn.as_mut().graceful_shutdown();
                    tokio::select! {
                        result = conn.as_mut() => result,
                        () = force.cancelled() => {
                            debug!(%peer, "Dropping connection after shutdown grace period");
                            return;
                        }
                    }
                }
            };

            if let Err(e) = result {
                debug!(%peer, error = %e, "Connection closed with error");
            }
        });
    }

    /// Stop accepting, then wait up to the grace period for open requests.
    ///
    /// Connections still open when the grace period ends are dropped and
    /// `ServerError::ShutdownTimeout` is returned.
    pub async fn stop(&self) -> Result<(), ServerError> {
        {
            let mut state = self.state.lock();
            if *state != Lifecycle::Running {
                return Err(ServerError::InvalidState {
                    operation: "stop",
                    state: *state,
                });
            }
            *state = Lifecycle::Stopping;
        }

        let build = &self.config.build;
        info!(
            version = build.version,
            commit = build.commit,
            address = %self.address,
            "Stopping HTTP/OTLP server"
        );

        self.shutdown.cancel();
        self.connections.close();

        let grace = self.config.shutdown_grace;
        let drained = tokio::time::timeout(grace, self.connections.wait())
            .await
            .is_ok();

        if !drained {
            warn!(
                remaining = self.connections.len(),
                grace_secs = grace.as_secs_f64(),
                "Shutdown grace period elapsed, closing remaining connections"
            );
            self.force.cancel();
            self.connections.wait().await;
        }

        *self.state.lock() = Lifecycle::Stopped;

        if drained {
            info!("Server shutdown complete");
            Ok(())
        } else {
            Err(ServerError::ShutdownTimeout { grace })
        }
    }
}
