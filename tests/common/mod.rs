#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use jaegerin::error::ServerError;
use jaegerin::test_support::RecordingReporter;
use jaegerin::{Server, ServerConfig, Timeouts};
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub struct RunningServer {
    pub server: Arc<Server>,
    pub reporter: Arc<RecordingReporter>,
    pub addr: SocketAddr,
    pub handle: JoinHandle<Result<(), ServerError>>,
}

impl RunningServer {
    pub fn traces_url(&self) -> String {
        format!("http://{}/v1/traces", self.addr)
    }
}

pub fn local_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

pub fn config_with(timeouts: Timeouts, shutdown_grace: Duration) -> ServerConfig {
    ServerConfig {
        timeouts,
        shutdown_grace,
        ..local_config()
    }
}

/// Start a server on an ephemeral port and wait until it is listening
pub async fn start_server(config: ServerConfig) -> RunningServer {
    let reporter = Arc::new(RecordingReporter::new());
    let server = Arc::new(Server::new(config, reporter.clone()));

    let handle = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.start().await })
    };

    let mut addr = None;
    for _ in 0..200 {
        if let Some(bound) = server.local_addr() {
            addr = Some(bound);
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }

    RunningServer {
        server,
        reporter,
        addr: addr.expect("server did not start listening"),
        handle,
    }
}
