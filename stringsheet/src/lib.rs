#![forbid(unsafe_code)]
//! Round-trip Apple `.strings` localization files through one CSV sheet.
//!
//! Every `.strings` file of a project holds one language. Exporting decodes all
//! of them, merges the entries by key into one row per string, and writes a CSV
//! sheet with a column per language that translators can edit in a spreadsheet.
//! Importing reads the sheet back and writes each language's `.strings` files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::{fs::File, io::BufReader, path::Path};
//! use stringsheet::{Languages, Workspace, import_csv};
//!
//! let languages: Languages = "en,ja,fr".parse()?;
//!
//! // Export every .strings file under the current directory
//! let workspace = Workspace::new(".", languages.clone());
//! workspace.export_csv(File::create("sheet.csv")?)?;
//!
//! // ... and write the edited sheet back
//! let sheet = BufReader::new(File::open("sheet.csv")?);
//! import_csv(sheet, &languages, Path::new("."))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The pieces are usable on their own: [`formats::StringsCodec`] and
//! [`formats::CsvCodec`] through the [`traits::EntryCodec`] trait, and
//! [`merge::MergeTable`] for folding entries by key.

pub mod converter;
pub mod discover;
pub mod error;
pub mod formats;
pub mod layout;
pub mod merge;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{ExportSummary, ImportSummary, Workspace, import_csv},
    error::Error,
    formats::{CsvCodec, StringsCodec},
    merge::{CommentConflict, MergeReport, MergeTable},
    traits::EntryCodec,
    types::{DEFAULT_LANGUAGES, Entry, Languages},
};
