//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hq_core::HashKind;
use hq_dat::{ColumnField, Field, IdMode};

#[derive(Parser)]
#[command(name = "hq")]
#[command(about = "Identify ROM sets and maintain metadata with dat catalogs", long_about = None)]
pub(crate) struct Cli {
    /// Dat file to load (defaults to catalog.default_dat in the settings)
    #[arg(short, long, global = true)]
    pub dat: Option<PathBuf>,

    /// Id mode to use instead of detecting it from the dat header
    /// (dirty-crc32-sum, clean-crc32-sum, short-name, first-crc32, position)
    #[arg(long, global = true)]
    pub id_mode: Option<IdMode>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the dat header, provenance and game count
    Info,

    /// Find games by field value
    Lookup {
        /// Field to search (name, description, year, author, ccrc32, dcrc32, cmd5, dmd5, csha1, dsha1)
        field: String,

        /// Values to look for
        #[arg(required = true)]
        values: Vec<String>,

        /// Stop at the first match
        #[arg(long)]
        first: bool,

        /// Print full records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the catalog as a table
    Export {
        /// Fields to export, comma separated
        #[arg(short, long, value_delimiter = ',')]
        fields: Option<Vec<Field>>,

        /// Column headings, comma separated (defaults to the field names)
        #[arg(long, value_delimiter = ',')]
        headings: Option<Vec<String>>,

        /// Write the compact id/title listing instead
        #[arg(long, conflicts_with_all = ["fields", "headings"])]
        mini: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import year, description and author from a table
    Import {
        /// Table file to read
        table: PathBuf,

        /// Column holding the game key and the field it matches, e.g. 0:id
        #[arg(long)]
        id: ColumnField,

        /// Column to import and its destination field, e.g. 1:year (repeatable)
        #[arg(long = "field", required = true)]
        fields: Vec<ColumnField>,

        /// Replace values that are already set
        #[arg(long)]
        overwrite: bool,

        /// Where to write the updated catalog table (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Hash files as one game and find it in the catalog
    Identify {
        /// Files making up the game
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Digest to compare
        #[arg(long, default_value = "crc32")]
        kind: HashKind,

        /// Include metadata files such as cue sheets
        #[arg(long)]
        dirty: bool,

        /// Exclude metadata files such as cue sheets
        #[arg(long, conflicts_with = "dirty")]
        clean: bool,
    },

    /// List games sharing an id
    Duplicates,

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}
