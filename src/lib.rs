#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod otlp;
pub mod port;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use app::server::Server;
pub use config::{BuildInfo, ServerConfig, Timeouts};
pub use domain::SpanRecord;
pub use error::{IngestError, ServerError};
pub use port::SpanReporter;
