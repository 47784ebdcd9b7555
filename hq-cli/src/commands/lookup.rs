use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use hq_dat::RomSetSummary;

use super::CatalogArgs;
use crate::CliError;
use crate::settings::Settings;

/// Entry point for `lookup`.
pub(crate) fn run_lookup(
    args: &CatalogArgs,
    settings: &Settings,
    field: &str,
    values: &[String],
    first: bool,
    json: bool,
) -> Result<(), CliError> {
    let catalog = args.load(settings)?;
    let found = catalog.get_romsets_by_token(field, first, values)?;

    if json {
        let summaries: Vec<RomSetSummary> = found.iter().map(|g| g.summary()).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if found.is_empty() {
        log::warn!("No games with {} in [{}]", field, values.join(", "));
        return Ok(());
    }

    for game in found {
        log::info!(
            "{}  {}",
            game.id().if_supports_color(Stdout, |t| t.cyan()),
            game.description.if_supports_color(Stdout, |t| t.bold()),
        );
        log::info!(
            "    crc32 clean {} dirty {}  ({} files)",
            game.clean_crc32(),
            game.dirty_crc32(),
            game.roms.len()
        );
    }
    Ok(())
}
