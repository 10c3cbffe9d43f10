//! SQLite database management

mod connection;
mod presets;
mod state;

pub use connection::Database;
pub use presets::*;
pub use state::*;
