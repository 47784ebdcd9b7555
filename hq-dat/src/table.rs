//! Plain delimited text tables with a leading comment block.
//!
//! Used to move metadata in and out of a catalog. The layout is:
//!
//! ```text
//! # free text comment
//! # another one
//! id	year	author
//! b19ed489	1991	Nintendo
//! ```
//!
//! Cells are never quoted or trimmed; a separator inside a value can't be
//! represented.

use std::io::Write;
use std::path::Path;

use crate::error::DatError;

/// How a table is laid out on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFormat {
    /// Cell separator byte (tab by default).
    pub separator: u8,
    /// Marker opening a comment line.
    pub comment: String,
    /// Whether the first non-comment line holds column headings.
    pub headings: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            separator: b'\t',
            comment: "#".to_string(),
            headings: true,
        }
    }
}

impl TableFormat {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_headings(mut self, headings: bool) -> Self {
        self.headings = headings;
        self
    }
}

/// An in-memory table: comment lines, optional headings and data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub comments: Vec<String>,
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Every cell of column `index`; short rows yield an empty cell.
    pub fn column(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }

    /// Width of the widest row or of the heading line.
    pub fn num_columns(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headings.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load a table from disk.
    pub fn load(path: &Path, format: &TableFormat) -> Result<Self, DatError> {
        if !path.is_file() {
            return Err(DatError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        parse_table(&content, format)
    }

    /// Write comments, headings (if any) and rows.
    pub fn write<W: Write>(&self, out: &mut W, format: &TableFormat) -> Result<(), DatError> {
        for comment in &self.comments {
            writeln!(out, "{} {}", format.comment, comment)?;
        }

        let separator = char::from(format.separator).to_string();
        if !self.headings.is_empty() {
            writeln!(out, "{}", self.headings.join(&separator))?;
        }
        for row in &self.rows {
            writeln!(out, "{}", row.join(&separator))?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn save(&self, path: &Path, format: &TableFormat) -> Result<(), DatError> {
        let mut file = std::fs::File::create(path)?;
        self.write(&mut file, format)?;
        log::debug!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    pub fn to_text(&self, format: &TableFormat) -> Result<String, DatError> {
        let mut buf = Vec::new();
        self.write(&mut buf, format)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Parse table text.
///
/// Comment lines lose the marker and one following space. Blank lines before
/// the first data line are skipped; later ones are rows with a single empty
/// cell. Cells keep their surrounding whitespace.
pub fn parse_table(content: &str, format: &TableFormat) -> Result<Table, DatError> {
    let mut table = Table::new();
    let mut data = String::new();
    // One entry per data line: `false` for a blank line.
    let mut filled = Vec::new();

    for line in content.lines() {
        if !format.comment.is_empty() {
            if let Some(text) = line.strip_prefix(format.comment.as_str()) {
                let text = text.strip_prefix(' ').unwrap_or(text);
                table.comments.push(text.to_string());
                continue;
            }
        }
        if line.is_empty() {
            if !filled.is_empty() {
                filled.push(false);
            }
            continue;
        }
        data.push_str(line);
        data.push('\n');
        filled.push(true);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.separator)
        .quoting(false)
        .flexible(true)
        .has_headers(false)
        .from_reader(data.as_bytes());
    let mut records = reader.records();

    let mut lines = Vec::with_capacity(filled.len());
    for is_filled in filled {
        if !is_filled {
            lines.push(vec![String::new()]);
            continue;
        }
        match records.next() {
            Some(record) => lines.push(record?.iter().map(str::to_string).collect()),
            None => break,
        }
    }

    let mut lines = lines.into_iter();
    if format.headings {
        if let Some(headings) = lines.next() {
            table.headings = headings;
        }
    }
    table.rows.extend(lines);

    log::debug!(
        "Parsed table: {} comments, {} headings, {} rows",
        table.comments.len(),
        table.headings.len(),
        table.rows.len()
    );
    Ok(table)
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
