use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use hq_core::util::format_bytes_approx;

use super::CatalogArgs;
use crate::CliError;
use crate::settings::Settings;

/// Show the dat header and a summary of its games.
pub(crate) fn run_info(args: &CatalogArgs, settings: &Settings) -> Result<(), CliError> {
    let catalog = args.load(settings)?;
    let header = &catalog.header;

    log::info!("{}", header.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!("");
    log::info!("  Description: {}", header.description);
    log::info!("  Version:     {}", header.version);
    log::info!("  Comment:     {}", header.comment);
    log::info!("  Author:      {}", header.author);
    log::info!(
        "  Type:        {}",
        header.dat_type.if_supports_color(Stdout, |t| t.cyan())
    );
    match catalog.provenance() {
        Some(provenance) => log::info!("  Provenance:  {}", provenance),
        None => log::info!(
            "  Provenance:  {}",
            "unknown".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }
    if let Some(mode) = catalog.id_mode() {
        log::info!("  Id mode:     {}", mode);
    }

    let dirty: u64 = catalog.iter().map(|g| g.size(false)).sum();
    let clean: u64 = catalog.iter().map(|g| g.size(true)).sum();
    log::info!(
        "  Games:       {}",
        catalog.len().if_supports_color(Stdout, |t| t.green())
    );
    log::info!(
        "  Size:        {} ({} without metadata files)",
        format_bytes_approx(dirty),
        format_bytes_approx(clean)
    );
    log::info!("  Flags:       {}", catalog.flags.summary());
    Ok(())
}
