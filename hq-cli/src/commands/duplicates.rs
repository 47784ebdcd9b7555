use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::CatalogArgs;
use crate::CliError;
use crate::settings::Settings;

/// Load without the uniqueness check and report every shared id.
pub(crate) fn run_duplicates(args: &CatalogArgs, settings: &Settings) -> Result<(), CliError> {
    let catalog = args.load_with(settings, false)?;
    let duplicates = catalog.duplicates();

    if duplicates.is_empty() {
        log::info!(
            "{} All {} ids are unique",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            catalog.len()
        );
        return Ok(());
    }

    log::info!(
        "{} ids shared by more than one game:",
        duplicates.len().if_supports_color(Stdout, |t| t.yellow())
    );
    for (id, names) in &duplicates {
        log::info!("  {}", id.if_supports_color(Stdout, |t| t.cyan()));
        for name in names {
            log::info!("    {}", name);
        }
    }
    Ok(())
}
