//! The export (strings → CSV) and import (CSV → strings) pipelines, plus the
//! read-only inspection helpers the CLI offers.

use std::{
    collections::BTreeMap,
    fs,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    discover::{SourceFile, discover_strings_files},
    error::Error,
    formats::{CsvCodec, StringsCodec},
    layout::{language_of_path, localized_path},
    merge::{MergeReport, MergeTable},
    traits::EntryCodec,
    types::{Entry, Languages},
};

/// Counts from an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files decoded and merged.
    pub files: usize,
    /// Files skipped because their location names no configured language.
    pub skipped: Vec<String>,
    /// Rows written to the sheet.
    pub rows: usize,
    pub merge: MergeReport,
}

/// Counts from an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows read from the sheet.
    pub rows: usize,
    /// Every `.strings` file written, in write order.
    pub written: Vec<PathBuf>,
}

/// A directory tree of `.strings` files and the languages it is read with.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    languages: Languages,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, languages: Languages) -> Self {
        Workspace {
            root: root.into(),
            languages,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    /// Every `.strings` file under the root, supported language or not.
    pub fn discover(&self) -> Result<Vec<SourceFile>, Error> {
        discover_strings_files(&self.root, &self.languages)
    }

    /// Decodes one discovered file. Returns `None` for files without a configured language.
    pub fn load(&self, file: &SourceFile) -> Result<Option<Vec<Entry>>, Error> {
        let Some(language) = &file.language else {
            return Ok(None);
        };
        debug!(path = %file.path.display(), language = %language, "decoding");
        StringsCodec::new(language.as_str())
            .with_source_path(file.source_path.as_str())
            .read_from(&file.path)
            .map(Some)
    }

    /// Decodes every supported file and folds them into one table, in discovery order.
    pub fn merge(&self) -> Result<(MergeTable, ExportSummary), Error> {
        let mut table = MergeTable::new();
        let mut summary = ExportSummary::default();
        for file in self.discover()? {
            match self.load(&file)? {
                Some(entries) => {
                    summary.merge.absorb(table.merge(entries));
                    summary.files += 1;
                }
                None => {
                    warn!(
                        path = %file.source_path,
                        "skipping file: its location names none of the configured languages ({})",
                        self.languages
                    );
                    summary.skipped.push(file.source_path);
                }
            }
        }
        Ok((table, summary))
    }

    /// Writes the merged table of every supported file as one CSV sheet.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<ExportSummary, Error> {
        let (table, mut summary) = self.merge()?;
        let entries = table.into_sorted_entries();
        CsvCodec::new(self.languages.clone()).encode(&entries, writer)?;
        summary.rows = entries.len();
        Ok(summary)
    }

    /// Writes the discovered paths, one per line.
    pub fn list_files<W: Write>(&self, mut writer: W) -> Result<usize, Error> {
        let files = self.discover()?;
        for file in &files {
            writeln!(writer, "{}", file.path.display())?;
        }
        writer.flush()?;
        Ok(files.len())
    }

    /// Writes every decoded entry in human-readable form, a blank line after each file.
    pub fn print_entries<W: Write>(&self, mut writer: W) -> Result<usize, Error> {
        let mut printed = 0;
        for file in self.discover()? {
            let Some(entries) = self.load(&file)? else {
                warn!(path = %file.source_path, "skipping file without a configured language");
                continue;
            };
            for entry in &entries {
                writeln!(writer, "{}", entry.display(&self.languages))?;
            }
            writeln!(writer)?;
            printed += entries.len();
        }
        writer.flush()?;
        Ok(printed)
    }
}

/// Reads a CSV sheet and writes one `.strings` file per configured language for
/// every source file named in the sheet, below `output_root`.
///
/// An entry with an empty value for a language is left out of that language's
/// file, except in the file its `source_path` names, so a deliberate `"k" = "";`
/// survives an export and import. Existing files are overwritten.
pub fn import_csv<R: BufRead>(
    reader: R,
    languages: &Languages,
    output_root: &Path,
) -> Result<ImportSummary, Error> {
    let entries = CsvCodec::new(languages.clone()).decode(reader)?;
    let mut summary = ImportSummary {
        rows: entries.len(),
        ..Default::default()
    };

    for language in languages.iter() {
        let mut tables: BTreeMap<PathBuf, Vec<Entry>> = BTreeMap::new();
        for entry in &entries {
            let path = output_root.join(localized_path(&entry.source_path, language, languages)?);
            let table = tables.entry(path).or_default();
            let from_this_language =
                language_of_path(&entry.source_path, languages).as_deref() == Some(language);
            if from_this_language || !entry.translation(language).is_empty() {
                table.push(entry.clone());
            }
        }

        let codec = StringsCodec::new(language);
        for (path, table) in tables {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::Io(e).in_file(parent))?;
            }
            debug!(path = %path.display(), entries = table.len(), "writing");
            codec.write_to(&table, &path)?;
            summary.written.push(path);
        }
    }

    Ok(summary)
}
