//! Fixed-width hexadecimal digest arithmetic.
//!
//! Composite game identities are built by adding the digests of every file in
//! a set. Addition is modulo `16^width`, so the result is independent of the
//! order the files are listed in and always renders to the same width.

use std::fmt;
use std::str::FromStr;

/// Digest algorithms carried by catalog file records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKind {
    Crc32,
    Md5,
    Sha1,
}

impl HashKind {
    pub const ALL: [HashKind; 3] = [HashKind::Crc32, HashKind::Md5, HashKind::Sha1];

    /// Number of hex digits in a rendered digest of this kind.
    pub fn width(&self) -> usize {
        match self {
            Self::Crc32 => 8,
            Self::Md5 => 32,
            Self::Sha1 => 40,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Crc32 => "crc32",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        }
    }

    /// All-zero digest of this kind's width.
    pub fn zero(&self) -> String {
        "0".repeat(self.width())
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown hash kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hash kind \"{0}\" (expected crc32, md5 or sha1)")]
pub struct HashKindParseError(pub String);

impl FromStr for HashKind {
    type Err = HashKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crc32" | "crc" => Ok(Self::Crc32),
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            _ => Err(HashKindParseError(s.to_string())),
        }
    }
}

/// Running modular sum of hex digests.
///
/// Digits are stored least-significant first, one nibble per byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSum {
    nibbles: Vec<u8>,
}

impl DigestSum {
    pub fn new(width: usize) -> Self {
        Self {
            nibbles: vec![0; width],
        }
    }

    pub fn for_kind(kind: HashKind) -> Self {
        Self::new(kind.width())
    }

    pub fn width(&self) -> usize {
        self.nibbles.len()
    }

    /// Add a hex digest. Returns `false` (and adds nothing) if the value is
    /// not a valid hex number.
    pub fn add(&mut self, hex: &str) -> bool {
        let Some(digits) = parse_nibbles(hex) else {
            return false;
        };

        let mut carry = 0u8;
        let mut incoming = digits.iter().rev();
        for slot in self.nibbles.iter_mut() {
            let d = incoming.next().copied().unwrap_or(0);
            let total = *slot + d + carry;
            *slot = total & 0x0f;
            carry = total >> 4;
        }
        // Anything past `width` digits (including the final carry) is overflow.
        true
    }

    /// Render as lowercase hex, zero-padded to the full width.
    pub fn to_hex(&self) -> String {
        self.nibbles
            .iter()
            .rev()
            .map(|&n| char::from_digit(u32::from(n), 16).unwrap_or('0'))
            .collect()
    }
}

/// Parse a hex string into its digit values, most significant first.
fn parse_nibbles(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.trim();
    if hex.is_empty() {
        return None;
    }
    hex.chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect()
}

/// `true` if `s` is a non-empty string of hex digits.
pub fn is_hex(s: &str) -> bool {
    parse_nibbles(s).is_some()
}

/// Add two hex digests modulo `16^width`, returning exactly `width` lowercase digits.
///
/// A malformed operand counts as zero.
pub fn sum_digest(a: &str, b: &str, width: usize) -> String {
    let mut sum = DigestSum::new(width);
    sum.add(a);
    sum.add(b);
    sum.to_hex()
}

/// Fold [`sum_digest`] over any number of digests. An empty input yields the
/// all-zero digest.
pub fn fold_digests<'a, I>(digests: I, width: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sum = DigestSum::new(width);
    for digest in digests {
        if !sum.add(digest) {
            log::debug!("Ignoring malformed digest \"{digest}\" in composite sum");
        }
    }
    sum.to_hex()
}

/// Normalize a digest as it is ingested from a catalog.
///
/// Valid hex is lower-cased and fitted to the kind's width (left-padded with
/// zeros, or truncated to the low-order digits). Anything else is only
/// lower-cased so the malformed value is still visible to callers.
pub fn normalize_digest(raw: &str, kind: HashKind) -> String {
    let lower = raw.trim().to_lowercase();
    if !is_hex(&lower) {
        return lower;
    }
    let width = kind.width();
    if lower.len() >= width {
        lower[lower.len() - width..].to_string()
    } else {
        format!("{lower:0>width$}")
    }
}

#[cfg(test)]
#[path = "tests/digest_tests.rs"]
mod tests;
