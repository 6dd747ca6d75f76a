//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when catalogr is run for the first time.

use super::CatalogrConfig;
use crate::query::{PAGE_SIZE_CHOICES, clamp_page_size};
use config::ConfigError;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the catalog API and display settings
///
/// Guides the user through creating their configuration:
/// 1. Prompts for the catalog API base URL
/// 2. Prompts for the display title and the public web origin for links
/// 3. Asks for the default page size
/// 4. Creates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - The configuration cannot be saved
///
/// # Examples
/// ```ignore
/// use catalogr::config::first_time_setup;
///
/// let config = first_time_setup()?;
/// println!("Browsing {}", config.api_base_url);
/// ```
pub fn first_time_setup() -> Result<CatalogrConfig, ConfigError> {
    println!("Welcome to catalogr! Let's point it at your catalog.\n");

    let theme = ColorfulTheme::default();
    let defaults = CatalogrConfig::default();
    let input_error = |e: dialoguer::Error| ConfigError::Message(format!("Failed to read input: {e}"));

    let api_base_url: String = Input::with_theme(&theme)
        .with_prompt("Catalog API address")
        .default(defaults.api_base_url.clone())
        .interact_text()
        .map_err(input_error)?;

    let title: String = Input::with_theme(&theme)
        .with_prompt("Title")
        .default(defaults.title.clone())
        .interact_text()
        .map_err(input_error)?;

    let web_url: String = Input::with_theme(&theme)
        .with_prompt("Public web address for shared links (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)?;

    let sizes: Vec<String> = PAGE_SIZE_CHOICES.iter().map(ToString::to_string).collect();
    let default_index = PAGE_SIZE_CHOICES
        .iter()
        .position(|size| *size == defaults.default_page_size)
        .unwrap_or(0);
    let size_index = Select::with_theme(&theme)
        .with_prompt("Entries per page")
        .items(&sizes)
        .default(default_index)
        .interact()
        .map_err(input_error)?;

    let resume_last_query = Confirm::with_theme(&theme)
        .with_prompt("Resume the last viewed query on start?")
        .default(true)
        .interact()
        .map_err(input_error)?;

    let web_url = web_url.trim();
    let config = CatalogrConfig {
        api_base_url: api_base_url.trim().to_string(),
        title,
        web_url: (!web_url.is_empty()).then(|| web_url.to_string()),
        default_page_size: clamp_page_size(
            PAGE_SIZE_CHOICES
                .get(size_index)
                .copied()
                .unwrap_or(defaults.default_page_size),
        ),
        quiet: false,
        resume_last_query,
    };

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
