use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use hq_dat::{ColumnField, Table};

use super::export::DEFAULT_FIELDS;
use super::{CatalogArgs, write_table};
use crate::CliError;
use crate::settings::Settings;

/// Entry point for `import`: merge table metadata into the catalog and
/// write the result as a table.
pub(crate) fn run_import(
    args: &CatalogArgs,
    settings: &Settings,
    table_path: &Path,
    id: ColumnField,
    fields: &[ColumnField],
    overwrite: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let format = settings.table.format()?;
    let mut catalog = args.load(settings)?;
    let table = Table::load(table_path, &format)?;

    let report = catalog.csv_import(&table, id, fields, overwrite)?;
    log::info!(
        "Imported {} rows from {}",
        report.matched.if_supports_color(Stdout, |t| t.green()),
        table_path.display()
    );
    if report.skipped > 0 {
        log::warn!(
            "{} rows had no matching {} and were skipped",
            report.skipped,
            id.field
        );
    }

    let exported = catalog.csv_export(&DEFAULT_FIELDS, &[]);
    write_table(&exported, output, &format)
}
