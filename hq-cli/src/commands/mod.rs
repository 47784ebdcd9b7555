pub(crate) mod config;
pub(crate) mod duplicates;
pub(crate) mod export;
pub(crate) mod identify;
pub(crate) mod import;
pub(crate) mod info;
pub(crate) mod lookup;

use std::path::{Path, PathBuf};

use hq_dat::{Catalog, IdMode, LoadOptions, Table, TableFormat};

use crate::CliError;
use crate::settings::{Settings, settings_path};

/// Which dat to open and how to identify its games.
pub(crate) struct CatalogArgs {
    pub dat: Option<PathBuf>,
    pub id_mode: Option<IdMode>,
}

impl CatalogArgs {
    /// `--dat`, falling back to `catalog.default_dat` from the settings.
    fn resolve_path(&self, settings: &Settings) -> Result<PathBuf, CliError> {
        self.dat
            .clone()
            .or_else(|| settings.catalog.default_dat.clone())
            .ok_or_else(|| CliError::NoDat(settings_path()))
    }

    pub(crate) fn load(&self, settings: &Settings) -> Result<Catalog, CliError> {
        self.load_with(settings, true)
    }

    pub(crate) fn load_with(
        &self,
        settings: &Settings,
        check_duplicates: bool,
    ) -> Result<Catalog, CliError> {
        let path = self.resolve_path(settings)?;
        let options = LoadOptions {
            id_mode: self.id_mode,
            check_duplicates,
        };
        log::debug!("Loading {}", path.display());
        Ok(Catalog::load_with(&path, &options)?)
    }
}

/// Write a table to `output`, or to stdout when no file is given.
pub(crate) fn write_table(
    table: &Table,
    output: Option<&Path>,
    format: &TableFormat,
) -> Result<(), CliError> {
    match output {
        Some(path) => {
            table.save(path, format)?;
            log::info!("Wrote {} rows to {}", table.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            table.write(&mut stdout.lock(), format)?;
        }
    }
    Ok(())
}
