//! hq CLI
//!
//! Command-line interface for identifying ROM sets against dat catalogs and
//! moving metadata in and out of them.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::CatalogArgs;
pub(crate) use error::CliError;
use settings::Settings;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);
    let settings = settings::load_settings();

    if let Err(e) = run(cli, &settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Command output goes through `log::info!`, so the default format is the
/// bare message. `--verbose` switches to env_logger's timestamped format.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.target(env_logger::Target::Stdout);
    if !verbose {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(
                buf,
                "{}: {}",
                level.as_str().to_lowercase(),
                record.args()
            ),
        });
    }
    builder.init();
}

fn run(cli: Cli, settings: &Settings) -> Result<(), CliError> {
    let catalog = CatalogArgs {
        dat: cli.dat,
        id_mode: cli.id_mode,
    };

    match cli.command {
        Commands::Info => commands::info::run_info(&catalog, settings),
        Commands::Lookup {
            field,
            values,
            first,
            json,
        } => commands::lookup::run_lookup(&catalog, settings, &field, &values, first, json),
        Commands::Export {
            fields,
            headings,
            mini,
            output,
        } => commands::export::run_export(
            &catalog,
            settings,
            fields.as_deref(),
            headings.as_deref(),
            mini,
            output.as_deref(),
        ),
        Commands::Import {
            table,
            id,
            fields,
            overwrite,
            output,
        } => commands::import::run_import(
            &catalog,
            settings,
            &table,
            id,
            &fields,
            overwrite,
            output.as_deref(),
        ),
        Commands::Identify {
            files,
            kind,
            dirty,
            clean,
        } => {
            let clean = clean || (!dirty && settings.catalog.clean);
            commands::identify::run_identify(&catalog, settings, &files, kind, clean)
        }
        Commands::Duplicates => commands::duplicates::run_duplicates(&catalog, settings),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(settings),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}
