use std::fmt;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DatError;
use crate::game::{Rom, RomSet};

/// Source format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatFormat {
    ClrMamePro,
    Xml,
}

impl DatFormat {
    /// Tag stored in the catalog header.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ClrMamePro => "ClrMamePro",
            Self::Xml => "XML",
        }
    }

    /// Recognize the format from the first line of the file.
    pub fn detect(first_line: &str) -> Result<Self, DatError> {
        if first_line.contains("clrmamepro") || first_line.contains("emulator") {
            Ok(Self::ClrMamePro)
        } else if first_line.contains("<?xml") {
            Ok(Self::Xml)
        } else {
            Err(DatError::UnknownFormat(first_line.trim().to_string()))
        }
    }
}

impl fmt::Display for DatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Catalog-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatHeader {
    pub name: String,
    pub description: String,
    pub version: String,
    pub comment: String,
    pub author: String,
    /// Source format tag ("ClrMamePro", "XML"), empty for catalogs built in memory
    pub dat_type: String,
}

/// A parsed catalog, games in source order, ids not yet assigned.
#[derive(Debug, Clone)]
pub struct DatFile {
    pub header: DatHeader,
    pub games: Vec<RomSet>,
}

/// Parse a catalog, detecting the format from its first line.
///
/// The whole input is read into memory; invalid UTF-8 is replaced rather
/// than rejected.
pub fn parse_dat<R: Read>(mut reader: R) -> Result<DatFile, DatError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_dat_str(&String::from_utf8_lossy(&bytes))
}

/// Parse a catalog file from a path.
pub fn parse_dat_file(path: &Path) -> Result<DatFile, DatError> {
    if !path.is_file() {
        return Err(DatError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let dat = parse_dat(std::io::BufReader::new(file))?;
    log::debug!(
        "Parsed {} DAT \"{}\" with {} games from {}",
        dat.header.dat_type,
        dat.header.name,
        dat.games.len(),
        path.display()
    );
    Ok(dat)
}

/// Parse catalog text already held in memory.
pub fn parse_dat_str(content: &str) -> Result<DatFile, DatError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line = content.lines().next().unwrap_or("");

    match DatFormat::detect(first_line)? {
        DatFormat::ClrMamePro => parse_clrmamepro(content),
        DatFormat::Xml => parse_xml(content),
    }
}

fn ensure_not_empty(dat: &DatFile) -> Result<(), DatError> {
    if dat.header.name.is_empty() && dat.games.is_empty() {
        return Err(DatError::invalid_dat(format!(
            "No header or games found in {} DAT file",
            dat.header.dat_type
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Logiqx XML parser
// ---------------------------------------------------------------------------

fn parse_xml(content: &str) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(content.as_bytes());
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile {
        header: DatHeader {
            dat_type: DatFormat::Xml.tag().to_string(),
            ..Default::default()
        },
        games: Vec::new(),
    };

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_game: Option<RomSet> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = true,
                    "game" | "machine" => current_game = Some(parse_xml_game(e)?),
                    "rom" => push_xml_rom(&mut current_game, e)?,
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"rom" {
                    push_xml_rom(&mut current_game, e)?;
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                if in_header {
                    match current_tag.as_str() {
                        "name" => dat.header.name = text,
                        "description" => dat.header.description = text,
                        "version" => dat.header.version = text,
                        "comment" => dat.header.comment = text,
                        "author" => dat.header.author = text,
                        _ => {}
                    }
                } else if let Some(ref mut game) = current_game {
                    match current_tag.as_str() {
                        "year" => game.year = parse_year(&text, &game.name),
                        "manufacturer" => game.author = text,
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"header" => in_header = false,
                b"game" | b"machine" => {
                    if let Some(game) = current_game.take() {
                        dat.games.push(game);
                    }
                }
                _ => current_tag.clear(),
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    ensure_not_empty(&dat)?;
    Ok(dat)
}

/// Start a game from its element. The XML format has no separate
/// description, so the name doubles as the title.
fn parse_xml_game(e: &BytesStart<'_>) -> Result<RomSet, DatError> {
    let mut name = String::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            name = attr.unescape_value()?.into_owned();
        }
    }
    Ok(RomSet::new(name.clone(), name))
}

fn push_xml_rom(game: &mut Option<RomSet>, e: &BytesStart<'_>) -> Result<(), DatError> {
    if let Some(game) = game {
        let rom = parse_xml_rom_attributes(e)?;
        game.roms.push(rom);
    }
    Ok(())
}

fn parse_xml_rom_attributes(e: &BytesStart<'_>) -> Result<Rom, DatError> {
    let mut name = String::new();
    let mut size = 0u64;
    let mut crc = String::new();
    let mut md5 = String::new();
    let mut sha1 = String::new();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"name" => name = value,
            b"size" => {
                size = value
                    .trim()
                    .parse()
                    .map_err(|_| DatError::invalid_value(format!("Invalid ROM size: {value}")))?;
            }
            b"crc" => crc = value,
            b"md5" => md5 = value,
            b"sha1" => sha1 = value,
            _ => {}
        }
    }

    Ok(Rom::new(name, size, &crc, &md5, &sha1))
}

// ---------------------------------------------------------------------------
// ClrMamePro DAT parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Outside,
    Header,
    Game,
}

/// Parse a ClrMamePro format DAT file.
///
/// Format:
/// ```text
/// clrmamepro (
///     name "System Name"
///     version 20240101-000000
/// )
///
/// game (
///     name "Game Name (Region)"
///     description "Game Name (Region)"
///     rom ( name "Game Name (Region).ext" size 12345 crc AABBCCDD md5 ... sha1 ... )
/// )
/// ```
///
/// Blocks open with `clrmamepro (`, `emulator (` or `game (` at the start of
/// a line and close on a line whose first character is `)`. Lines of other
/// blocks are skipped.
fn parse_clrmamepro(content: &str) -> Result<DatFile, DatError> {
    let mut dat = DatFile {
        header: DatHeader {
            dat_type: DatFormat::ClrMamePro.tag().to_string(),
            ..Default::default()
        },
        games: Vec::new(),
    };

    let mut block = Block::Outside;
    let mut block_lines: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.starts_with("clrmamepro (") || line.starts_with("emulator (") {
            block = Block::Header;
            block_lines.clear();
            continue;
        }

        match block {
            Block::Outside => {
                if line.starts_with("game (") {
                    block = Block::Game;
                    block_lines.clear();
                }
            }
            Block::Header if line.starts_with(')') => {
                dat.header.name = vertical_field(&block_lines, "name");
                dat.header.description = vertical_field(&block_lines, "description");
                dat.header.version = vertical_field(&block_lines, "version");
                dat.header.comment = vertical_field(&block_lines, "comment");
                dat.header.author = vertical_field(&block_lines, "author");
                block = Block::Outside;
            }
            Block::Game if line.starts_with(')') => {
                dat.games.push(build_clr_game(&block_lines)?);
                block = Block::Outside;
            }
            Block::Header | Block::Game => block_lines.push(line),
        }
    }

    ensure_not_empty(&dat)?;
    Ok(dat)
}

fn build_clr_game(lines: &[&str]) -> Result<RomSet, DatError> {
    let name = vertical_field(lines, "name");
    let mut description = vertical_field(lines, "description");
    if description.is_empty() {
        description = name.clone();
    }

    let mut game = RomSet::new(name, description);
    game.author = vertical_field(lines, "manufacturer");
    game.year = parse_year(&vertical_field(lines, "year"), &game.name);

    for rom_line in vertical_fields(lines, "rom") {
        let rom = parse_clr_rom_inline(&rom_line).map_err(|e| match e {
            DatError::InvalidValue(msg) => {
                DatError::invalid_value(format!("{msg} in game \"{}\"", game.name))
            }
            other => other,
        })?;
        game.roms.push(rom);
    }

    Ok(game)
}

/// Missing years are 0; so are placeholders like `19??`.
fn parse_year(raw: &str, game: &str) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    raw.parse().unwrap_or_else(|_| {
        log::debug!("Unparseable year \"{raw}\" for \"{game}\", using 0");
        0
    })
}

/// Value of the last `key value` line in a block, unquoted.
fn vertical_field(lines: &[&str], key: &str) -> String {
    vertical_fields(lines, key).pop().unwrap_or_default()
}

/// Values of every `key value` line in a block, unquoted, in order.
fn vertical_fields(lines: &[&str], key: &str) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix(key)?.strip_prefix(' ')?;
            Some(rest.trim().trim_matches('"').to_string())
        })
        .collect()
}

/// Parse an inline ROM entry like:
/// `( name "Game (Region).ext" size 12345 crc AABBCCDD md5 ... sha1 ... )`
///
/// The name may be quoted or bare; a bare name runs up to the `size` keyword.
fn parse_clr_rom_inline(line: &str) -> Result<Rom, DatError> {
    let (name, name_end) = rom_name(line).unwrap_or_default();
    let rest = &line[name_end..];

    let size_raw = rom_token(rest, "size").unwrap_or("");
    let size = size_raw
        .parse()
        .map_err(|_| DatError::invalid_value(format!("Invalid ROM size \"{size_raw}\"")))?;

    Ok(Rom::new(
        name,
        size,
        rom_token(rest, "crc").unwrap_or(""),
        rom_token(rest, "md5").unwrap_or(""),
        rom_token(rest, "sha1").unwrap_or(""),
    ))
}

/// Locate `key` as a standalone keyword: preceded by whitespace, `(` or the
/// start of the line, and followed by whitespace.
fn find_keyword(line: &str, key: &str) -> Option<usize> {
    line.match_indices(key).map(|(pos, _)| pos).find(|&pos| {
        let before_ok = line[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace() || c == '(');
        let after_ok = line[pos + key.len()..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace);
        before_ok && after_ok
    })
}

/// Returns the ROM name and the byte offset just past it.
fn rom_name(line: &str) -> Option<(String, usize)> {
    let key_pos = find_keyword(line, "name")?;
    let value_start = key_pos + "name".len();
    let after_key = &line[value_start..];
    let offset = value_start + (after_key.len() - after_key.trim_start().len());
    let value = &line[offset..];

    if let Some(quoted) = value.strip_prefix('"') {
        let close = quoted.find('"')?;
        return Some((quoted[..close].to_string(), offset + 1 + close + 1));
    }

    let end = find_keyword(value, "size").unwrap_or_else(|| {
        value
            .find(|c: char| c.is_whitespace() || c == ')')
            .unwrap_or(value.len())
    });
    Some((value[..end].trim().to_string(), offset + end))
}

/// Value following `key`, up to the next whitespace or `)`, unquoted.
fn rom_token<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let pos = find_keyword(line, key)?;
    let rest = line[pos + key.len()..].trim_start();
    let end = rest
        .find(|c: char| c.is_whitespace() || c == ')')
        .unwrap_or(rest.len());
    Some(rest[..end].trim_matches('"'))
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
