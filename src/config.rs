use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4318;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Build identifiers, fixed at compile time and only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub release: &'static str,
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl BuildInfo {
    /// Read `JAEGERIN_RELEASE`, `JAEGERIN_COMMIT` and `JAEGERIN_BUILD_DATE`
    /// from the build environment.
    pub const fn from_build_env() -> Self {
        Self {
            release: unknown_if_unset(option_env!("JAEGERIN_RELEASE")),
            version: env!("CARGO_PKG_VERSION"),
            commit: unknown_if_unset(option_env!("JAEGERIN_COMMIT")),
            date: unknown_if_unset(option_env!("JAEGERIN_BUILD_DATE")),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::from_build_env()
    }
}

const fn unknown_if_unset(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => "unknown",
    }
}

/// Per-connection I/O bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Reading request headers; also bounds idle keep-alive waits
    pub read_header: Duration,
    /// Reading the request body
    pub read_body: Duration,
    /// Handling the request and producing the response
    pub write: Duration,
}

impl Timeouts {
    pub const fn uniform(timeout: Duration) -> Self {
        Self {
            read_header: timeout,
            read_body: timeout,
            write: timeout,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_TIMEOUT)
    }
}

/// Everything the server needs, fixed for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeouts: Timeouts,
    pub shutdown_grace: Duration,
    pub max_body_bytes: usize,
    pub build: BuildInfo,
}

impl ServerConfig {
    /// `host:port`, with IPv6 literals bracketed.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeouts: Timeouts::default(),
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            build: BuildInfo::from_build_env(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Text,
}

/// OTLP/HTTP trace receiver
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Interface to listen on
    #[arg(long, env = "JAEGERIN_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "JAEGERIN_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Header read, body read and response timeout in seconds
    #[arg(long, env = "JAEGERIN_TIMEOUT_SECS", default_value = "5")]
    pub timeout_secs: u64,

    /// Time allowed for in-flight requests on shutdown, in seconds
    #[arg(long, env = "JAEGERIN_SHUTDOWN_GRACE_SECS", default_value = "30")]
    pub shutdown_grace_secs: u64,

    /// Largest accepted body, compressed or decompressed
    #[arg(long, env = "JAEGERIN_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Log output format
    #[arg(long, env = "RUST_LOG_FORMAT", value_enum, default_value = "json")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Validates the arguments and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_host(&self.host)?;
        validate_port(self.port)?;
        validate_non_zero("timeout-secs", self.timeout_secs)?;
        validate_non_zero("shutdown-grace-secs", self.shutdown_grace_secs)?;
        validate_non_zero("max-body-bytes", self.max_body_bytes as u64)?;
        Ok(())
    }

    pub fn into_server_config(self, build: BuildInfo) -> Result<ServerConfig, ConfigError> {
        self.validate()?;

        Ok(ServerConfig {
            host: self.host,
            port: self.port,
            timeouts: Timeouts::uniform(Duration::from_secs(self.timeout_secs)),
            shutdown_grace: Duration::from_secs(self.shutdown_grace_secs),
            max_body_bytes: self.max_body_bytes,
            build,
        })
    }
}

/// Validates that the host is not empty or whitespace-only.
fn validate_host(host: &str) -> Result<(), ConfigError> {
    if host.trim().is_empty() {
        return Err(ConfigError::Invalid("Host cannot be empty".into()));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ConfigError> {
    if port == 0 {
        return Err(ConfigError::Invalid("Port cannot be 0".into()));
    }
    Ok(())
}

fn validate_non_zero(name: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{name} cannot be 0")));
    }
    Ok(())
}
