pub mod catalog;
pub mod dat;
pub mod error;
pub mod field;
pub mod game;
pub mod hasher;
pub mod identity;
pub mod table;

pub use catalog::{Catalog, CatalogFlags, ImportReport, LoadOptions, load_catalog};
pub use dat::{DatFile, DatFormat, DatHeader, parse_dat, parse_dat_file, parse_dat_str};
pub use error::DatError;
pub use field::{ColumnField, Field, Filter};
pub use game::{IGNORED_EXTENSIONS, Rom, RomSet, RomSetSummary};
pub use hasher::{FileDigests, hash_file, hash_reader};
pub use identity::{IdMode, Provenance};
pub use table::{Table, TableFormat, parse_table};
