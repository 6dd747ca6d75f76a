//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the catalog API.

pub mod browse;
pub mod config;
pub mod filters;
pub mod health;
pub mod list;
pub mod show;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use config::execute as config;
pub use filters::execute as filters;
pub use health::execute as health;
pub use list::execute as list;
pub use show::execute as show;
