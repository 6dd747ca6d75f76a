//! Browse module - query state synchronization
//!
//! This module keeps the user's query, the shareable location and the remote
//! catalog results in step. It is UI-agnostic: the CLI and the terminal UI drive
//! the same session.
//!
//! # Architecture
//!
//! - `store`: `QueryStore`, the single owner of the query state
//! - `session`: `BrowseSession`, the synchronizer returning `Command`s
//! - `detail`: `DetailLoader`, the selection-driven detail slot
//! - `location`: the `Location` trait and its memory and file backends
//! - `driver`: `CatalogDriver`, which executes commands on a tokio runtime

pub mod detail;
pub mod driver;
pub mod location;
pub mod session;
pub mod store;

pub use detail::{DetailLoader, DetailState};
pub use driver::{CatalogDriver, Event};
pub use location::{
    Location, LocationError, MemoryLocation, StateFileLocation, permalink, query_from_link,
};
pub use session::{BrowseSession, Command, ListStatus};
pub use store::QueryStore;
