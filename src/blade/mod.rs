//! Blade-side runtime: the HTTP surface and intent executor every worker
//! process runs (spec.md §4.7, §4.8).

pub mod context;
pub mod executor;
pub mod receiver_state;
pub mod scraping_module;
pub mod server;
pub mod status;

pub use context::BladeContext;
