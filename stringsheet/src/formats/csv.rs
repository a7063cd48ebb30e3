//! Support for the translator-facing CSV sheet.
//!
//! The sheet has a `file,key,comment` prefix followed by one column per
//! configured language, in configuration order. Every row is one entry.
use std::io::{BufRead, Write};

use crate::{
    error::Error,
    traits::EntryCodec,
    types::{Entry, Languages},
};

/// Metadata columns that precede the language columns.
pub const METADATA_COLUMNS: [&str; 3] = ["file", "key", "comment"];

/// Codec for a CSV sheet laid out for a fixed language list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvCodec {
    languages: Languages,
}

impl CsvCodec {
    pub fn new(languages: Languages) -> Self {
        CsvCodec { languages }
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    /// The header row this codec reads and writes.
    pub fn header(&self) -> Vec<&str> {
        METADATA_COLUMNS
            .iter()
            .copied()
            .chain(self.languages.iter())
            .collect()
    }
}

impl EntryCodec for CsvCodec {
    fn decode<R: BufRead>(&self, reader: R) -> Result<Vec<Entry>, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let expected = self.header();
        let found = rdr.headers()?;
        if found.iter().ne(expected.iter().copied()) {
            return Err(Error::CsvHeader {
                expected: expected.join(","),
                found: found.iter().collect::<Vec<_>>().join(","),
            });
        }

        let mut entries = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let key = record.get(1).unwrap_or_default();
            if key.is_empty() {
                return Err(Error::InvalidRow {
                    line,
                    message: "the `key` column is empty".to_string(),
                });
            }

            let mut entry = Entry::new(record.get(0).unwrap_or_default(), key)
                .with_comment(record.get(2).unwrap_or_default());
            for (offset, language) in self.languages.iter().enumerate() {
                let value = record.get(METADATA_COLUMNS.len() + offset).unwrap_or_default();
                entry.translations.insert(language.to_string(), value.to_string());
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    fn encode<W: Write>(&self, entries: &[Entry], writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        wtr.write_record(self.header())?;
        for entry in entries {
            let row = [
                entry.source_path.as_str(),
                entry.key.as_str(),
                entry.comment.as_str(),
            ]
            .into_iter()
            .chain(self.languages.iter().map(|l| entry.translation(l)));
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
