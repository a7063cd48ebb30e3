//! All error types for the stringsheet crate.
//!
//! Every variant is fatal: parsing, encoding and I/O failures abort the run.
//! Comment conflicts found while merging are not errors, see [`crate::merge`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("strings parse error at line {line}: {message}")]
    StringsParse { line: usize, message: String },

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("unexpected CSV header: expected `{expected}`, found `{found}`")]
    CsvHeader { expected: String, found: String },

    #[error("invalid CSV row at line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    #[error("invalid language list: {0}")]
    InvalidLanguages(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a `.strings` parse error at the given 1-based line.
    pub fn strings_parse(line: usize, message: impl Into<String>) -> Self {
        Error::StringsParse {
            line,
            message: message.into(),
        }
    }

    /// Attaches the path of the file this error occurred in.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Returns true for malformed `.strings` or CSV content.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::StringsParse { .. }
            | Error::CsvParse(_)
            | Error::CsvHeader { .. }
            | Error::InvalidRow { .. } => true,
            Error::File { source, .. } => source.is_parse_error(),
            _ => false,
        }
    }
}
