//! The loaded catalog: an ordered, uniquely identified collection of games.
//!
//! Games are kept sorted by description (byte order). Sorting happens when a
//! catalog is loaded and whenever a mutation could break the order, never on
//! iteration.

use std::collections::BTreeMap;
use std::path::Path;

use hq_core::util::ljust;

use crate::dat::{DatFile, DatHeader, parse_dat_file};
use crate::error::DatError;
use crate::field::{ColumnField, Field, Filter};
use crate::game::RomSet;
use crate::identity::{IdMode, Provenance};
use crate::table::Table;

/// Records what has happened to a catalog since it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogFlags {
    pub from_dat: bool,
    pub sets_added: bool,
    pub sets_deleted: bool,
    pub data_imported: bool,
}

impl CatalogFlags {
    /// `key=value` pairs sorted by key, space separated.
    pub fn summary(&self) -> String {
        format!(
            "data_imported={} from_dat={} sets_added={} sets_deleted={}",
            self.data_imported, self.from_dat, self.sets_added, self.sets_deleted
        )
    }
}

/// Options controlling how a catalog file becomes a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Force an id mode instead of detecting the provenance.
    pub id_mode: Option<IdMode>,
    /// Fail the load when two games share an id.
    pub check_duplicates: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            id_mode: None,
            check_duplicates: true,
        }
    }
}

/// Outcome of [`Catalog::csv_import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows whose id matched a game.
    pub matched: usize,
    /// Rows with no id cell or no matching game.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub header: DatHeader,
    pub flags: CatalogFlags,
    games: Vec<RomSet>,
    id_mode: Option<IdMode>,
    provenance: Option<Provenance>,
}

/// Load a catalog file with default options.
pub fn load_catalog(path: &Path) -> Result<Catalog, DatError> {
    Catalog::load(path)
}

impl Catalog {
    /// An empty catalog with no metadata.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: DatHeader) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, DatError> {
        Self::load_with(path, &LoadOptions::default())
    }

    pub fn load_with(path: &Path, options: &LoadOptions) -> Result<Self, DatError> {
        let dat = parse_dat_file(path)?;
        Self::from_dat(dat, options)
    }

    /// Build a catalog from parsed data: pick the id mode, assign ids in
    /// source order, sort, then check uniqueness.
    pub fn from_dat(dat: DatFile, options: &LoadOptions) -> Result<Self, DatError> {
        let (provenance, mode) = match options.id_mode {
            Some(mode) => (Provenance::detect(&dat.header).ok(), mode),
            None => {
                let provenance = Provenance::detect(&dat.header)?;
                (Some(provenance), provenance.id_mode())
            }
        };

        let mut catalog = Self {
            header: dat.header,
            flags: CatalogFlags {
                from_dat: true,
                ..CatalogFlags::default()
            },
            games: dat.games,
            id_mode: None,
            provenance,
        };
        catalog.assign_ids(mode);
        catalog.sort();

        if options.check_duplicates {
            catalog.check_duplicates()?;
        }

        log::debug!(
            "Loaded \"{}\": {} games, id mode {}{}",
            catalog.header.name,
            catalog.games.len(),
            mode,
            provenance
                .map(|p| format!(", provenance {p}"))
                .unwrap_or_default()
        );
        Ok(catalog)
    }

    /// Give every game an id computed with `mode`. [`IdMode::Position`]
    /// numbers games in their current order, starting at 1.
    pub fn assign_ids(&mut self, mode: IdMode) {
        for (index, game) in self.games.iter_mut().enumerate() {
            let id = mode.id_for(game, index + 1);
            game.set_id(id);
        }
        self.id_mode = Some(mode);
    }

    pub fn id_mode(&self) -> Option<IdMode> {
        self.id_mode
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.provenance
    }

    /// Ids shared by more than one game, with the names of the games.
    pub fn duplicates(&self) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for game in &self.games {
            groups
                .entry(game.id().to_string())
                .or_default()
                .push(game.name.clone());
        }
        groups.retain(|_, names| names.len() > 1);
        groups
    }

    pub fn check_duplicates(&self) -> Result<(), DatError> {
        let duplicates = self.duplicates();
        if duplicates.is_empty() {
            return Ok(());
        }
        for (id, names) in &duplicates {
            log::warn!("Duplicated id {id}: {}", names.join(", "));
        }
        Err(DatError::DuplicateIds(duplicates.into_iter().collect()))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RomSet> {
        self.games.iter()
    }

    pub fn games(&self) -> &[RomSet] {
        &self.games
    }

    /// Add a game unless its id is already taken. A game without an id gets
    /// one from the catalog's id mode first.
    pub fn add_romset(&mut self, mut game: RomSet) -> bool {
        if game.id().is_empty() {
            if let Some(mode) = self.id_mode {
                let id = mode.id_for(&game, self.games.len() + 1);
                game.set_id(id);
            }
        }
        if self.id_exists(game.id()) {
            log::debug!("Not adding \"{}\": id {} exists", game.name, game.id());
            return false;
        }
        self.insert_sorted(game);
        self.flags.sets_added = true;
        true
    }

    /// Drop every game, keeping the metadata.
    pub fn empty(&mut self) {
        self.games.clear();
        self.flags.sets_deleted = true;
    }

    /// Copy header and identity scheme (not games or flags) from `other`.
    pub fn copy_metadata_from(&mut self, other: &Catalog) {
        self.header = other.header.clone();
        self.id_mode = other.id_mode;
        self.provenance = other.provenance;
    }

    pub fn id_exists(&self, id: &str) -> bool {
        self.games.iter().any(|game| game.id() == id)
    }

    /// Split the catalog into games that match `filter` and games that
    /// don't. Both halves carry this catalog's metadata.
    pub fn filter(&self, filter: &Filter) -> (Catalog, Catalog) {
        let mut matched = self.derived();
        let mut unmatched = self.derived();
        for game in &self.games {
            if filter.matches(game) {
                matched.games.push(game.clone());
            } else {
                unmatched.games.push(game.clone());
            }
        }
        (matched, unmatched)
    }

    /// The game with this id. More than one match is an error.
    pub fn get_by_id(&self, id: &str) -> Result<Option<&RomSet>, DatError> {
        self.single_match(Field::Id, id)
    }

    /// The game with this exact description. More than one match is an error.
    pub fn get_by_description(&self, description: &str) -> Result<Option<&RomSet>, DatError> {
        self.single_match(Field::Description, description)
    }

    pub fn get_by_ids<I, S>(&self, ids: I) -> Catalog
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(&Filter::new(Field::Id, ids)).0
    }

    /// Sub-catalog with the game of each description. Unknown descriptions
    /// are ignored; an ambiguous one is an error.
    pub fn get_by_descriptions<I, S>(&self, descriptions: I) -> Result<Catalog, DatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut found = self.derived();
        for description in descriptions {
            if let Some(game) = self.get_by_description(description.as_ref())? {
                if !found.id_exists(game.id()) {
                    found.insert_sorted(game.clone());
                }
            }
        }
        Ok(found)
    }

    /// Games whose `field` equals any of `values`, in catalog order.
    ///
    /// Only searchable fields are accepted (see [`Field::is_searchable`]).
    pub fn get_romsets_by_field<S: AsRef<str>>(
        &self,
        field: Field,
        first_only: bool,
        values: &[S],
    ) -> Result<Vec<&RomSet>, DatError> {
        if !field.is_searchable() {
            return Err(DatError::unknown_field(
                field.token(),
                &Field::searchable_tokens(),
            ));
        }
        let matches = self.games.iter().filter(|game| field.matches_any(game, values));
        Ok(if first_only {
            matches.take(1).collect()
        } else {
            matches.collect()
        })
    }

    /// Like [`get_romsets_by_field`](Self::get_romsets_by_field), with the
    /// field given by its token.
    pub fn get_romsets_by_token<S: AsRef<str>>(
        &self,
        token: &str,
        first_only: bool,
        values: &[S],
    ) -> Result<Vec<&RomSet>, DatError> {
        let field: Field = token.parse()?;
        if !field.is_searchable() {
            return Err(DatError::unknown_field(token, &Field::searchable_tokens()));
        }
        self.get_romsets_by_field(field, first_only, values)
    }

    /// First game whose `field` equals `value`.
    pub fn get_game_by_identity_field(
        &self,
        field: Field,
        value: &str,
    ) -> Result<Option<&RomSet>, DatError> {
        Ok(self
            .get_romsets_by_field(field, true, &[value])?
            .into_iter()
            .next())
    }

    /// One row per game with the requested fields. Headings default to the
    /// field tokens.
    pub fn csv_export(&self, fields: &[Field], headings: &[String]) -> Table {
        let mut table = Table::new();
        table.comments = vec![
            format!("   Dat Name: {}", self.header.name),
            format!("    Version: {}", self.header.version),
            format!("Description: {}", self.header.description),
            format!("    Comment: {}", self.header.comment),
            format!("     Author: {}", self.header.author),
            format!("       Type: {}", self.header.dat_type),
            format!("      Games: {}", self.games.len()),
            format!("      Flags: {}", self.flags.summary()),
        ];
        table.headings = if headings.is_empty() {
            fields.iter().map(|f| f.token().to_string()).collect()
        } else {
            headings.to_vec()
        };
        for game in &self.games {
            table.append_row(fields.iter().map(|field| field.value(game)));
        }
        table
    }

    /// Compact listing: id (padded to 8) and description.
    pub fn mini_export(&self) -> Table {
        let mut table = Table::new();
        table.comments = vec![
            format!("       Name: {}", self.header.name),
            format!("Description: {}", self.header.description),
            format!("    Version: {}", self.header.version),
            format!("    Comment: {}", self.header.comment),
            format!("       Type: {}", self.header.dat_type),
            format!("     Author: {}", self.header.author),
            format!("      Games: {}", self.games.len()),
        ];
        table.headings = vec!["Id".to_string(), "Title".to_string()];
        for game in &self.games {
            table.append_row([ljust(game.id(), 8), game.description.clone()]);
        }
        table
    }

    /// Update year, description and author from table rows.
    ///
    /// Each row is matched on `id.field` against its `id.column` cell; only
    /// the first matching game is updated. Without `overwrite`, year is
    /// written only when unknown (0) and author only when empty; description
    /// is written only with `overwrite`. Rows with no id cell or no match are
    /// skipped and counted.
    ///
    /// Rows are matched against the catalog as it was before the import. A
    /// year cell that is not a number fails the whole import and leaves the
    /// catalog untouched.
    pub fn csv_import(
        &mut self,
        table: &Table,
        id: ColumnField,
        fields: &[ColumnField],
        overwrite: bool,
    ) -> Result<ImportReport, DatError> {
        if let Some(bad) = fields.iter().find(|cf| !cf.field.is_importable()) {
            let valid: Vec<&str> = Field::ALL
                .iter()
                .filter(|f| f.is_importable())
                .map(Field::token)
                .collect();
            return Err(DatError::unknown_field(bad.field.token(), &valid));
        }

        let mut report = ImportReport::default();
        if fields.is_empty() {
            return Ok(report);
        }

        // Resolve every row and parse its year before any game changes.
        let mut updates = Vec::new();
        for (index, row) in table.rows.iter().enumerate() {
            let Some(key) = row.get(id.column) else {
                log::debug!("Row {}: no id in column {}", index + 1, id.column);
                report.skipped += 1;
                continue;
            };
            let Some(position) = self.games.iter().position(|g| id.field.matches(g, key)) else {
                log::debug!("Row {}: no game with {} \"{key}\"", index + 1, id.field);
                report.skipped += 1;
                continue;
            };
            let mut year = None;
            for cf in fields.iter().filter(|cf| cf.field == Field::Year) {
                if let Some(value) = row.get(cf.column) {
                    year = Some(value.trim().parse::<u32>().map_err(|_| {
                        DatError::invalid_value(format!(
                            "row {}: year \"{value}\" is not a number",
                            index + 1
                        ))
                    })?);
                }
            }
            updates.push((position, row, year));
        }

        self.flags.data_imported = true;
        let mut resort = false;
        for (position, row, year) in updates {
            let game = &mut self.games[position];
            if let Some(year) = year {
                if overwrite || game.year == 0 {
                    game.year = year;
                }
            }
            for cf in fields {
                let Some(value) = row.get(cf.column) else {
                    continue;
                };
                match cf.field {
                    Field::Description => {
                        if overwrite && game.description != *value {
                            game.description = value.clone();
                            resort = true;
                        }
                    }
                    Field::Author => {
                        if overwrite || game.author.is_empty() {
                            game.author = value.clone();
                        }
                    }
                    _ => {}
                }
            }
            report.matched += 1;
        }

        if resort {
            self.sort();
        }
        log::debug!(
            "Imported metadata: {} rows matched, {} skipped",
            report.matched,
            report.skipped
        );
        Ok(report)
    }

    fn single_match(&self, field: Field, value: &str) -> Result<Option<&RomSet>, DatError> {
        let mut matches = self.games.iter().filter(|game| field.matches(game, value));
        let first = matches.next();
        if matches.next().is_some() {
            return Err(DatError::ambiguous(field.token(), value));
        }
        Ok(first)
    }

    /// Empty catalog sharing this one's metadata and identity scheme.
    fn derived(&self) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.copy_metadata_from(self);
        catalog
    }

    fn insert_sorted(&mut self, game: RomSet) {
        let at = self
            .games
            .partition_point(|g| g.description <= game.description);
        self.games.insert(at, game);
    }

    fn sort(&mut self) {
        self.games.sort_by(|a, b| a.description.cmp(&b.description));
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a RomSet;
    type IntoIter = std::slice::Iter<'a, RomSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
