//! Dipplan Persistence - SQLite storage and JSON file transport

pub mod sqlite;
pub mod transport;

pub use sqlite::Database;
