use std::path::PathBuf;

/// Errors that can occur while loading or querying a catalog.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Table error: {0}")]
    Table(#[from] csv::Error),

    #[error("Can't find dat file \"{}\"", .0.display())]
    NotFound(PathBuf),

    #[error("Unknown DAT format (first line: \"{0}\")")]
    UnknownFormat(String),

    #[error("Invalid DAT file: {0}")]
    InvalidDat(String),

    #[error(
        "Unknown dat provenance: not \"redump.org\", not \"no-intro\", not \"mame\" \
         (name: \"{name}\", author: \"{author}\", comment: \"{comment}\")"
    )]
    UnknownProvenance {
        name: String,
        author: String,
        comment: String,
    },

    #[error("Duplicated ids found: {}", format_duplicates(.0))]
    DuplicateIds(Vec<(String, Vec<String>)>),

    #[error("Unknown field \"{field}\" (valid fields: {valid})")]
    UnknownField { field: String, valid: String },

    #[error("More than one game matches {field} \"{value}\"")]
    AmbiguousLookup { field: String, value: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl DatError {
    pub fn invalid_dat(msg: impl Into<String>) -> Self {
        Self::InvalidDat(msg.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    pub fn unknown_field(field: impl Into<String>, valid: &[&str]) -> Self {
        Self::UnknownField {
            field: field.into(),
            valid: valid.join(", "),
        }
    }

    pub fn ambiguous(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AmbiguousLookup {
            field: field.into(),
            value: value.into(),
        }
    }
}

fn format_duplicates(groups: &[(String, Vec<String>)]) -> String {
    groups
        .iter()
        .map(|(id, names)| format!("{id} [{}]", names.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
