//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for catalogr using the `clap`
//! crate.
//!
//! # Commands
//!
//! - **browse**: Interactive terminal browser (default)
//! - **list**: Print one page of results for a query
//! - **show**: Print one catalog entry
//! - **filters**: Print the selectable filter values for a query
//! - **health**: Check the catalog API
//! - **config**: Show or edit the configuration
//!
//! # Examples
//!
//! ```
//! use catalogr::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["catalogr", "list", "-l", "MIT", "--page", "2"]);
//! assert!(matches!(cli.get_command(), Commands::List { .. }));
//! ```

use crate::browse::QueryStore;
use crate::query::{FilterDimension, SortField, SortOrder};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Sort field argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    /// Order by name
    Name,
    /// Order by release date
    #[value(name = "releaseDate", alias = "release-date")]
    ReleaseDate,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => Self::Name,
            SortArg::ReleaseDate => Self::ReleaseDate,
        }
    }
}

/// Sort order argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}

/// Search and filter arguments shared by `list` and `filters`
///
/// Every filter flag can be repeated and accepts comma-joined values.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Free-text search
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Category filter (e.g., -c tools -c games or -c tools,games)
    #[arg(short = 'c', long = "category", value_name = "CATEGORY")]
    pub category: Vec<String>,

    /// Platform filter
    #[arg(short = 'p', long = "platform", value_name = "PLATFORM")]
    pub platform: Vec<String>,

    /// License filter
    #[arg(short = 'l', long = "license", value_name = "LICENSE")]
    pub license: Vec<String>,

    /// Development status filter
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Vec<String>,

    /// Software type filter
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub software_type: Vec<String>,

    /// Language filter
    #[arg(long = "language", value_name = "LANGUAGE")]
    pub language: Vec<String>,
}

impl FilterArgs {
    /// Raw values given per dimension
    #[must_use]
    pub fn selections(&self) -> [(FilterDimension, &[String]); 6] {
        [
            (FilterDimension::Category, self.category.as_slice()),
            (FilterDimension::Platform, self.platform.as_slice()),
            (FilterDimension::License, self.license.as_slice()),
            (FilterDimension::Status, self.status.as_slice()),
            (FilterDimension::Type, self.software_type.as_slice()),
            (FilterDimension::Language, self.language.as_slice()),
        ]
    }

    /// Whether no search or filter was given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.selections().iter().all(|(_, values)| values.is_empty())
    }

    /// Add these arguments on top of the store's current state
    ///
    /// Filter values are added to existing selections; a search replaces the
    /// current search text.
    pub fn apply(&self, store: &mut QueryStore) {
        if let Some(search) = &self.search {
            store.set_search_text(search.trim());
        }

        let mut filters = store.state().filters().clone();
        for (dimension, values) in self.selections() {
            for value in values {
                filters.insert(dimension, value);
            }
        }
        store.replace_filters(filters);
    }
}

/// Paging and sorting arguments for `list`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long = "page", value_name = "N")]
    pub page: Option<u32>,

    /// Entries per page (1-48)
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<u32>,

    /// Sort field
    #[arg(long = "sort", value_enum)]
    pub sort: Option<SortArg>,

    /// Sort order
    #[arg(long = "order", value_enum)]
    pub order: Option<OrderArg>,
}

impl PageArgs {
    /// Apply the given values to the store
    pub fn apply(&self, store: &mut QueryStore) {
        if let Some(sort) = self.sort {
            store.set_sort(sort.into());
        }
        if let Some(order) = self.order {
            store.set_order(order.into());
        }
        if let Some(page_size) = self.page_size {
            store.set_page_size(page_size);
        }
        if let Some(page) = self.page {
            store.set_page(page);
        }
    }
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Run the interactive setup wizard
    Setup,
}

#[derive(Parser, Debug)]
#[command(name = "catalogr")]
#[command(about = "Browse a software catalog from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug output (overridden by CATALOGR_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Catalog API address (overrides config)
    #[arg(long = "api", value_name = "URL", global = true)]
    pub api: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive browser (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Shared link or query string to start from
        #[arg(value_name = "LINK")]
        link: Option<String>,
    },

    /// Print one page of catalog entries
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        paging: PageArgs,

        /// Shared link or query string to start from; flags are applied on top
        #[arg(long = "link", value_name = "LINK")]
        link: Option<String>,

        /// Print the raw page as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Print a single catalog entry
    Show {
        /// Entry identifier
        id: String,

        /// Print the entry as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Print selectable filter values for a search
    Filters {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the vocabulary as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Check that the catalog API is reachable
    Health,

    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse { link: None })
    }
}
