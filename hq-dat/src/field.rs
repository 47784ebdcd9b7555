//! Closed set of record fields used by filters, lookups, exports and imports.
//!
//! Every field token maps to an accessor here; there is no dynamic attribute
//! lookup, so an unknown token is rejected as soon as it is parsed.

use std::fmt;
use std::str::FromStr;

use hq_core::HashKind;

use crate::error::DatError;
use crate::game::RomSet;

/// A readable field of a [`RomSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Description,
    Year,
    Author,
    Hash { kind: HashKind, clean: bool },
    Size { clean: bool },
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Id,
        Field::Name,
        Field::Description,
        Field::Year,
        Field::Author,
        Field::Hash {
            kind: HashKind::Crc32,
            clean: true,
        },
        Field::Hash {
            kind: HashKind::Crc32,
            clean: false,
        },
        Field::Hash {
            kind: HashKind::Md5,
            clean: true,
        },
        Field::Hash {
            kind: HashKind::Md5,
            clean: false,
        },
        Field::Hash {
            kind: HashKind::Sha1,
            clean: true,
        },
        Field::Hash {
            kind: HashKind::Sha1,
            clean: false,
        },
        Field::Size { clean: true },
        Field::Size { clean: false },
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Year => "year",
            Self::Author => "author",
            Self::Hash { kind, clean } => match (kind, clean) {
                (HashKind::Crc32, true) => "ccrc32",
                (HashKind::Crc32, false) => "dcrc32",
                (HashKind::Md5, true) => "cmd5",
                (HashKind::Md5, false) => "dmd5",
                (HashKind::Sha1, true) => "csha1",
                (HashKind::Sha1, false) => "dsha1",
            },
            Self::Size { clean: true } => "csize",
            Self::Size { clean: false } => "dsize",
        }
    }

    /// Fields accepted by [`Catalog::get_romsets_by_field`](crate::Catalog::get_romsets_by_field).
    pub fn is_searchable(&self) -> bool {
        !matches!(self, Self::Id | Self::Size { .. })
    }

    /// Fields a metadata import may write to.
    pub fn is_importable(&self) -> bool {
        matches!(self, Self::Year | Self::Description | Self::Author)
    }

    pub fn searchable_tokens() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|f| f.is_searchable())
            .map(Field::token)
            .collect()
    }

    pub fn all_tokens() -> Vec<&'static str> {
        Self::ALL.iter().map(Field::token).collect()
    }

    /// Render the field of `game` as text.
    pub fn value(&self, game: &RomSet) -> String {
        match self {
            Self::Id => game.id().to_string(),
            Self::Name => game.name.clone(),
            Self::Description => game.description.clone(),
            Self::Year => game.year.to_string(),
            Self::Author => game.author.clone(),
            Self::Hash { kind, clean } => game.hash(*kind, *clean),
            Self::Size { clean } => game.size(*clean).to_string(),
        }
    }

    /// Compare the field of `game` with `candidate`.
    ///
    /// Hashes compare case-insensitively and numbers numerically. Ids ignore
    /// the padding `mini_export` adds; other text fields compare exactly.
    pub fn matches(&self, game: &RomSet, candidate: &str) -> bool {
        match self {
            Self::Hash { kind, clean } => {
                game.hash(*kind, *clean) == candidate.trim().to_lowercase()
            }
            Self::Year => candidate.trim().parse::<u32>() == Ok(game.year),
            Self::Size { clean } => candidate.trim().parse::<u64>() == Ok(game.size(*clean)),
            Self::Id => game.id() == candidate.trim(),
            Self::Name => game.name == candidate,
            Self::Description => game.description == candidate,
            Self::Author => game.author == candidate,
        }
    }

    /// `true` if the field of `game` equals any of `candidates`.
    pub fn matches_any<S: AsRef<str>>(&self, game: &RomSet, candidates: &[S]) -> bool {
        candidates.iter().any(|c| self.matches(game, c.as_ref()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Field {
    type Err = DatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let alias = match token.as_str() {
            "desc" | "title" => "description",
            "auth" | "manufacturer" | "publisher" => "author",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.token() == alias)
            .ok_or_else(|| DatError::unknown_field(s, &Self::all_tokens()))
    }
}

/// Maps a table column to a record field, for metadata import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnField {
    pub column: usize,
    pub field: Field,
}

impl ColumnField {
    pub fn new(column: usize, field: Field) -> Self {
        Self { column, field }
    }
}

impl FromStr for ColumnField {
    type Err = DatError;

    /// Parse `"<column>:<field>"`, e.g. `"1:year"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, field) = s.split_once(':').ok_or_else(|| {
            DatError::invalid_value(format!("expected <column>:<field>, got \"{s}\""))
        })?;
        let column = column
            .trim()
            .parse()
            .map_err(|_| DatError::invalid_value(format!("invalid column number \"{column}\"")))?;
        Ok(Self {
            column,
            field: field.parse()?,
        })
    }
}

/// A membership filter: records whose field equals any of `values` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: Field,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new<I, S>(field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a filter from a field token. Unknown tokens are an error.
    pub fn parse<I, S>(field: &str, values: I) -> Result<Self, DatError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(field.parse()?, values))
    }

    pub fn matches(&self, game: &RomSet) -> bool {
        self.field.matches_any(game, &self.values)
    }
}

#[cfg(test)]
#[path = "tests/field_tests.rs"]
mod tests;
