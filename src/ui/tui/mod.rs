//! Interactive catalog browser
//!
//! A ratatui front end over `BrowseSession`. The session is owned by the UI
//! thread; requests run on the tokio runtime through `CatalogDriver` and their
//! results are pumped into the session once per frame.
//!
//! ```text
//! ┌ Software Catalog ─────────────────────────────┐
//! │ Search: map                                   │
//! └───────────────────────────────────────────────┘
//!  Category: tools · License: MIT
//! ┌ Results: 30 · page 2 of 3 ─────┐┌ Entry ──────┐
//! │> Entry one                     ││ ...         │
//! └────────────────────────────────┘└─────────────┘
//! ┌ Status ───────────────────────────────────────┐
//! │ Link: ?q=map&category=tools&license=MIT&...   │
//! └───────────────────────────────────────────────┘
//!  ←/→:page  /:search  f:filters  ?:help
//! ```

mod browser;
mod events;
mod matcher;
mod state;
pub mod theme;
mod widgets;

pub use browser::run;
pub use events::{Action, handle_key};
pub use state::{App, FilterPicker, Mode, StatusMessage};
pub use theme::Theme;
