use std::path::Path;

use serde::Serialize;

use hq_core::{HashKind, fold_digests, normalize_digest};

use crate::error::DatError;
use crate::hasher;

/// Extensions of synthetic metadata files that are left out of "clean"
/// hashes and sizes. Cue sheets only describe the disc layout and change
/// whenever the data files are renamed.
pub const IGNORED_EXTENSIONS: &[&str] = &["cue"];

/// A single physical file belonging to a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rom {
    /// File name, including extension
    pub name: String,
    pub size: u64,
    /// CRC32 checksum (lowercase hex, 8 digits)
    pub crc32: String,
    /// MD5 checksum (lowercase hex, 32 digits)
    pub md5: String,
    /// SHA1 checksum (lowercase hex, 40 digits)
    pub sha1: String,
}

impl Rom {
    /// Build a ROM record, normalizing the digests to their fixed widths.
    /// Malformed digests are kept (lower-cased) and count as zero in sums.
    pub fn new(name: impl Into<String>, size: u64, crc32: &str, md5: &str, sha1: &str) -> Self {
        Self {
            name: name.into(),
            size,
            crc32: normalize_digest(crc32, HashKind::Crc32),
            md5: normalize_digest(md5, HashKind::Md5),
            sha1: normalize_digest(sha1, HashKind::Sha1),
        }
    }

    /// Hash a file on disk and describe it as a ROM record.
    pub fn from_path(path: &Path) -> Result<Self, DatError> {
        let digests = hasher::hash_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(
            name,
            digests.size,
            &digests.crc32,
            &digests.md5,
            &digests.sha1,
        ))
    }

    pub fn digest(&self, kind: HashKind) -> &str {
        match kind {
            HashKind::Crc32 => &self.crc32,
            HashKind::Md5 => &self.md5,
            HashKind::Sha1 => &self.sha1,
        }
    }

    /// Lowercased extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }

    /// `true` for metadata files excluded from clean hashes.
    pub fn is_ignored(&self) -> bool {
        self.extension()
            .is_some_and(|ext| IGNORED_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// One catalog entry: a playable title made of one or more ROM files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomSet {
    /// Short/internal name. MAME uses an 8 character identifier here.
    pub name: String,
    /// Full canonical title, e.g. "Super Mario World (Europe)"
    pub description: String,
    /// Release year, 0 if unknown
    pub year: u32,
    /// Manufacturer / publisher, empty if unknown
    pub author: String,
    /// Files in catalog order
    pub roms: Vec<Rom>,
    id: String,
}

impl RomSet {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            year: 0,
            author: String::new(),
            roms: Vec::new(),
            id: String::new(),
        }
    }

    pub fn with_rom(mut self, rom: Rom) -> Self {
        self.roms.push(rom);
        self
    }

    /// Identity assigned by the owning catalog. Empty until assigned.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// ROMs taking part in a clean (`true`) or dirty (`false`) computation.
    ///
    /// The clean set drops only files with an ignored extension. A file whose
    /// name has no `.` at all counts as clean, so it still contributes to the
    /// clean hash and size.
    pub fn relevant_roms(&self, clean: bool) -> impl Iterator<Item = &Rom> {
        self.roms.iter().filter(move |rom| !clean || !rom.is_ignored())
    }

    /// Composite digest: the modular sum of every relevant ROM's digest.
    ///
    /// The sum does not depend on ROM order.
    pub fn hash(&self, kind: HashKind, clean: bool) -> String {
        fold_digests(
            self.relevant_roms(clean).map(|rom| rom.digest(kind)),
            kind.width(),
        )
    }

    /// Total size of the relevant ROMs in bytes.
    pub fn size(&self, clean: bool) -> u64 {
        self.relevant_roms(clean).map(|rom| rom.size).sum()
    }

    pub fn clean_crc32(&self) -> String {
        self.hash(HashKind::Crc32, true)
    }

    pub fn dirty_crc32(&self) -> String {
        self.hash(HashKind::Crc32, false)
    }

    pub fn clean_md5(&self) -> String {
        self.hash(HashKind::Md5, true)
    }

    pub fn dirty_md5(&self) -> String {
        self.hash(HashKind::Md5, false)
    }

    pub fn clean_sha1(&self) -> String {
        self.hash(HashKind::Sha1, true)
    }

    pub fn dirty_sha1(&self) -> String {
        self.hash(HashKind::Sha1, false)
    }

    /// Snapshot of the record with every computed property resolved.
    pub fn summary(&self) -> RomSetSummary {
        RomSetSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            year: self.year,
            author: self.author.clone(),
            clean_crc32: self.clean_crc32(),
            dirty_crc32: self.dirty_crc32(),
            clean_md5: self.clean_md5(),
            dirty_md5: self.dirty_md5(),
            clean_sha1: self.clean_sha1(),
            dirty_sha1: self.dirty_sha1(),
            clean_size: self.size(true),
            dirty_size: self.size(false),
            roms: self.roms.clone(),
        }
    }
}

/// Serializable view of a [`RomSet`] including its computed hashes.
#[derive(Debug, Clone, Serialize)]
pub struct RomSetSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub year: u32,
    pub author: String,
    pub clean_crc32: String,
    pub dirty_crc32: String,
    pub clean_md5: String,
    pub dirty_md5: String,
    pub clean_sha1: String,
    pub dirty_sha1: String,
    pub clean_size: u64,
    pub dirty_size: u64,
    pub roms: Vec<Rom>,
}

#[cfg(test)]
#[path = "tests/game_tests.rs"]
mod tests;
