use crate::config::LogFormat;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber.
/// JSON is the production default; `text` gives human-readable output.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_current_span(true),
                )
                .with(filter)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .init();
        }
    }
}
