//! Config command - show or edit the configuration

use crate::cli::ConfigCommands;
use crate::config::{CatalogrConfig, first_time_setup};
use crate::ui::OutputWriter;
use crate::CatalogrError;

type Result<T> = std::result::Result<T, CatalogrError>;

/// Execute the config command; `show` is the default
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized, located or saved.
pub fn execute(
    config: &CatalogrConfig,
    command: Option<&ConfigCommands>,
    out: &dyn OutputWriter,
) -> Result<()> {
    match command.unwrap_or(&ConfigCommands::Show) {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(config).map_err(|e| {
                CatalogrError::InvalidInput(format!("Failed to serialize config: {e}"))
            })?;
            out.write(rendered.trim_end());
        }
        ConfigCommands::Path => {
            out.write(&CatalogrConfig::config_path()?.display().to_string());
        }
        ConfigCommands::Setup => {
            let updated = first_time_setup()?;
            out.success(&format!(
                "Configuration saved (catalog at {})",
                updated.api_base_url
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::output::BufferedWriter;

    #[test]
    fn test_show_prints_toml() {
        let out = BufferedWriter::new();
        execute(&CatalogrConfig::default(), None, &out).unwrap();

        let lines = out.lines();
        assert!(lines[0].contains("api_base_url = \"http://localhost:8000\""));
        assert!(lines[0].contains("default_page_size = 24"));
    }
}
