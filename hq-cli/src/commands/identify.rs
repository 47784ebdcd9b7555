use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use hq_core::HashKind;
use hq_dat::{Field, Rom, RomSet};

use super::CatalogArgs;
use crate::CliError;
use crate::settings::Settings;

/// Hash `files` as the members of one game and look the composite digest up.
pub(crate) fn run_identify(
    args: &CatalogArgs,
    settings: &Settings,
    files: &[PathBuf],
    kind: HashKind,
    clean: bool,
) -> Result<(), CliError> {
    let catalog = args.load(settings)?;

    let mut game = RomSet::new("", "");
    for path in files {
        let rom = Rom::from_path(path)?;
        log::debug!("{}: {} {}", rom.name, kind, rom.digest(kind));
        game.roms.push(rom);
    }

    let digest = game.hash(kind, clean);
    let field = Field::Hash { kind, clean };
    match catalog.get_game_by_identity_field(field, &digest)? {
        Some(found) => {
            log::info!(
                "{}  {}",
                digest.if_supports_color(Stdout, |t| t.cyan()),
                found.description.if_supports_color(Stdout, |t| t.green()),
            );
        }
        None => {
            log::warn!(
                "{}  no game with {} {}",
                digest,
                if clean { "clean" } else { "dirty" },
                kind
            );
        }
    }
    Ok(())
}
