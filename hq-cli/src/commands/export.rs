use std::path::Path;

use hq_dat::Field;

use super::{CatalogArgs, write_table};
use crate::CliError;
use crate::settings::Settings;

/// Columns written when none are requested.
pub(crate) const DEFAULT_FIELDS: [Field; 5] = [
    Field::Id,
    Field::Name,
    Field::Description,
    Field::Year,
    Field::Author,
];

pub(crate) fn run_export(
    args: &CatalogArgs,
    settings: &Settings,
    fields: Option<&[Field]>,
    headings: Option<&[String]>,
    mini: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let format = settings.table.format()?;
    let catalog = args.load(settings)?;

    let table = if mini {
        catalog.mini_export()
    } else {
        catalog.csv_export(
            fields.unwrap_or(&DEFAULT_FIELDS),
            headings.unwrap_or_default(),
        )
    };
    write_table(&table, output, &format)
}
