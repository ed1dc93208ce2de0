//! Logging infrastructure: structured logging via `tracing`, with an
//! `OVH_LOG_API_KEY`-gated transport field layer (spec.md §6).

mod config;
mod logger;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
