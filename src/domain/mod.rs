//! Domain layer: models, ports, and the error taxonomy. No I/O here.

pub mod errors;
pub mod models;
pub mod ports;
