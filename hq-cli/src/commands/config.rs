use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{Settings, settings_path};

/// Show the settings file location and the effective values.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "hq settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let text = toml::to_string_pretty(settings).map_err(|e| CliError::config(e.to_string()))?;
    for line in text.lines() {
        log::info!("{}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
