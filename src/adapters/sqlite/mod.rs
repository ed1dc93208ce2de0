//! SQLite-backed adapters (spec.md §4.2).

pub mod connection;
pub mod version_store;

pub use connection::DatabaseConnection;
pub use version_store::SqliteVersionStore;
