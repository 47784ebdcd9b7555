//! Identity assignment: how each record gets the unique `id` used for lookups.

use std::fmt;
use std::str::FromStr;

use hq_core::HashKind;

use crate::dat::DatHeader;
use crate::error::DatError;
use crate::game::RomSet;

/// Strategy used to derive a record's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdMode {
    /// Sum of the crc32 of every file.
    DirtyCrc32Sum,
    /// Sum of the crc32 of every file except ignored metadata files.
    CleanCrc32Sum,
    /// The record's short name, verbatim.
    ShortName,
    /// crc32 of the first non-ignored file. Not stable if a catalog
    /// reorders files between versions.
    FirstCrc32,
    /// 1-based position of the record in the source catalog.
    Position,
}

impl IdMode {
    pub const ALL: [IdMode; 5] = [
        IdMode::DirtyCrc32Sum,
        IdMode::CleanCrc32Sum,
        IdMode::ShortName,
        IdMode::FirstCrc32,
        IdMode::Position,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::DirtyCrc32Sum => "dirty-crc32-sum",
            Self::CleanCrc32Sum => "clean-crc32-sum",
            Self::ShortName => "short-name",
            Self::FirstCrc32 => "first-crc32",
            Self::Position => "position",
        }
    }

    /// Compute the id of `game`. `position` is its 1-based index in parse order.
    pub fn id_for(&self, game: &RomSet, position: usize) -> String {
        match self {
            Self::DirtyCrc32Sum => game.hash(HashKind::Crc32, false),
            Self::CleanCrc32Sum => game.hash(HashKind::Crc32, true),
            Self::ShortName => game.name.clone(),
            Self::FirstCrc32 => game
                .relevant_roms(true)
                .next()
                .map(|rom| rom.crc32.clone())
                .unwrap_or_default(),
            Self::Position => position.to_string(),
        }
    }
}

impl fmt::Display for IdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for IdMode {
    type Err = DatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.token() == token)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(IdMode::token).collect();
                DatError::invalid_value(format!(
                    "unknown id mode \"{s}\" (valid modes: {})",
                    valid.join(", ")
                ))
            })
    }
}

/// Author field of disc catalogs published by redump.org.
pub const REDUMP_AUTHOR: &str = "redump.org";
/// Comment marker of cartridge catalogs published by No-Intro.
pub const NO_INTRO_COMMENT: &str = "no-intro";
/// Name of the MAME arcade catalog.
pub const MAME_NAME: &str = "mame";

/// Known catalog publishers, recognized from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Redump,
    NoIntro,
    Mame,
}

impl Provenance {
    /// Recognize the publisher of a catalog. Checked in order: redump author,
    /// no-intro comment, mame name.
    pub fn detect(header: &DatHeader) -> Result<Self, DatError> {
        if header.author == REDUMP_AUTHOR {
            Ok(Self::Redump)
        } else if header.comment.contains(NO_INTRO_COMMENT) {
            Ok(Self::NoIntro)
        } else if header.name == MAME_NAME {
            Ok(Self::Mame)
        } else {
            Err(DatError::UnknownProvenance {
                name: header.name.clone(),
                author: header.author.clone(),
                comment: header.comment.clone(),
            })
        }
    }

    pub fn id_mode(&self) -> IdMode {
        match self {
            Self::Redump | Self::NoIntro => IdMode::DirtyCrc32Sum,
            Self::Mame => IdMode::ShortName,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Redump => "Redump",
            Self::NoIntro => "No-Intro",
            Self::Mame => "MAME",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
