pub mod log_reporter;

pub use log_reporter::LogReporter;
