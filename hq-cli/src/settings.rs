//! User settings, read from `~/.config/hq-tools/settings.toml`.
//!
//! Every key is optional; command-line flags take precedence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use hq_dat::TableFormat;

use crate::CliError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub table: TableSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CatalogSettings {
    /// Dat loaded when `--dat` is not given
    pub default_dat: Option<PathBuf>,
    /// Compare clean (cue-less) hashes when identifying files
    #[serde(default = "default_true")]
    pub clean: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TableSettings {
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_comment")]
    pub comment: String,
}

fn default_true() -> bool {
    true
}

fn default_separator() -> String {
    "\t".to_string()
}

fn default_comment() -> String {
    "#".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_dat: None,
            clean: true,
        }
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            comment: default_comment(),
        }
    }
}

impl TableSettings {
    /// Table layout for import/export. The separator must be one ASCII character.
    pub(crate) fn format(&self) -> Result<TableFormat, CliError> {
        let separator = match self.separator.as_bytes() {
            [byte] if byte.is_ascii() => *byte,
            _ => {
                return Err(CliError::config(format!(
                    "table.separator must be a single ASCII character, got {:?}",
                    self.separator
                )));
            }
        };
        Ok(TableFormat::default()
            .with_separator(separator)
            .with_comment(self.comment.clone()))
    }
}

/// Returns `~/.config/hq-tools/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("hq-tools").join("settings.toml")
}

/// Load settings from the default location.
pub(crate) fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from disk, returning defaults if missing or corrupt.
pub(crate) fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
