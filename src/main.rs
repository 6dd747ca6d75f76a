//! Catalogr CLI application entry point
//!
//! This is the main executable for browsing a software catalog. It provides an
//! interactive terminal browser plus one-shot commands for scripting.
//!
//! # Features
//!
//! - **Browse Mode**: Interactive browser with search, filters, sorting and paging
//! - **Shareable Links**: Every view is a query string that reopens it exactly
//! - **List**: Print one page of results for a link and/or filter flags
//! - **Show / Filters / Health**: Inspect single entries, filter values, the API
//! - **Quiet Mode**: Print bare identifiers for scripting
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command), resuming the last query
//! catalogr
//!
//! # Open a shared link
//! catalogr browse "https://catalog.example/?category=tools&page=3"
//!
//! # Print page 2 of MIT-licensed tools
//! catalogr list -c tools -l MIT --page 2
//!
//! # One entry as JSON
//! catalogr show geo-viewer --json
//! ```
//!
//! # Configuration
//!
//! On first run, catalogr will prompt for initial setup. Configuration is stored
//! in the user's config directory (`~/.config/catalogr/config.toml` on Linux).

use catalogr::{
    CatalogrError,
    catalog::{CatalogApi, HttpCatalogClient},
    cli::{Cli, Commands},
    commands,
    config::CatalogrConfig,
    logging::{self, LogTarget},
    ui::StdoutWriter,
};
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::runtime::Runtime;

type Result<T> = std::result::Result<T, CatalogrError>;

/// Client and runtime for the commands that talk to the catalog API
fn connect(config: &CatalogrConfig) -> Result<(Arc<dyn CatalogApi>, Runtime)> {
    let api: Arc<dyn CatalogApi> = Arc::new(HttpCatalogClient::new(&config.api_base_url)?);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok((api, runtime))
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let command = cli.get_command();

    let mut config = CatalogrConfig::load_or_setup()?;
    if let Some(api) = &cli.api {
        config.api_base_url.clone_from(api);
    }
    config.quiet |= cli.quiet;

    // The browser owns the terminal, so its logs go to a file.
    let log_target = match &command {
        Commands::Browse { .. } => logging::default_log_path().map_or(LogTarget::Stderr, LogTarget::File),
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, &log_target)?;

    let out = StdoutWriter::new(config.quiet);

    match command {
        Commands::Config { command } => commands::config(&config, command.as_ref(), &out),
        Commands::Browse { link } => {
            let (api, runtime) = connect(&config)?;
            commands::browse(
                runtime.handle().clone(),
                api,
                &config,
                link.as_deref(),
                &out,
            )
        }
        Commands::List {
            filters,
            paging,
            link,
            json,
        } => {
            let (api, runtime) = connect(&config)?;
            runtime.block_on(commands::list(
                api,
                &config,
                link.as_deref(),
                &filters,
                &paging,
                json,
                &out,
            ))
        }
        Commands::Show { id, json } => {
            let (api, runtime) = connect(&config)?;
            runtime.block_on(commands::show(api.as_ref(), &id, json, &out))
        }
        Commands::Filters { filters, json } => {
            let (api, runtime) = connect(&config)?;
            runtime.block_on(commands::filters(
                api.as_ref(),
                &filters,
                json,
                config.quiet,
                &out,
            ))
        }
        Commands::Health => {
            let (api, runtime) = connect(&config)?;
            runtime.block_on(commands::health(api.as_ref(), &out))
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err.user_message());
            ExitCode::FAILURE
        }
    }
}
