//! Core types for stringsheet.
//! Codecs decode into these; the merger folds them; encoders serialize them.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Languages supported when no configuration says otherwise.
pub const DEFAULT_LANGUAGES: &[&str] = &["ja", "en", "th", "es", "fr", "vi", "zh-Hant"];

/// A single localization record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// The `.strings` file that defined this entry, relative to the discovery root.
    pub source_path: String,

    /// The string identifier. Unique within one source file, and the merge key across files.
    pub key: String,

    /// Context for translators. Empty when the source had none.
    pub comment: String,

    /// Translated text by language code.
    pub translations: BTreeMap<String, String>,
}

impl Entry {
    pub fn new(source_path: impl Into<String>, key: impl Into<String>) -> Self {
        Entry {
            source_path: source_path.into(),
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_translation(mut self, language: impl Into<String>, value: impl Into<String>) -> Self {
        self.translations.insert(language.into(), value.into());
        self
    }

    /// Value for `language`, or the empty string when there is none.
    pub fn translation(&self, language: &str) -> &str {
        self.translations
            .get(language)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Formats this entry for display, one configured language per line.
    pub fn display<'a>(&'a self, languages: &'a Languages) -> EntryDisplay<'a> {
        EntryDisplay {
            entry: self,
            languages,
        }
    }
}

/// Human-readable rendering of an [`Entry`]: file, key and comment, then
/// `<lang> = <value>` for every configured language.
pub struct EntryDisplay<'a> {
    entry: &'a Entry,
    languages: &'a Languages,
}

impl Display for EntryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.entry.source_path)?;
        writeln!(f, "{}", self.entry.key)?;
        write!(f, "{}", self.entry.comment)?;
        for language in self.languages.iter() {
            write!(f, "\n{} = {}", language, self.entry.translation(language))?;
        }
        Ok(())
    }
}

/// The ordered, fixed set of language codes a run works with.
///
/// The order decides the CSV column layout and the line order of printed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages(Vec<String>);

impl Languages {
    /// Validates and wraps a list of language codes.
    ///
    /// The list must be non-empty and free of duplicates, and every code must be a
    /// well-formed language identifier. Codes are kept exactly as written.
    pub fn new<I, S>(codes: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut languages: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into().trim().to_string();
            code.parse::<LanguageIdentifier>().map_err(|e| {
                Error::InvalidLanguages(format!("`{}` is not a valid language code: {}", code, e))
            })?;
            if languages.contains(&code) {
                return Err(Error::InvalidLanguages(format!(
                    "`{}` is listed more than once",
                    code
                )));
            }
            languages.push(code);
        }
        if languages.is_empty() {
            return Err(Error::InvalidLanguages(
                "at least one language is required".to_string(),
            ));
        }
        Ok(Languages(languages))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|l| l == code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for Languages {
    fn default() -> Self {
        Languages(DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect())
    }
}

impl FromStr for Languages {
    type Err = Error;

    /// Parses a comma-separated list such as `en,ja,zh-Hant`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Languages::new(s.split(',').filter(|part| !part.trim().is_empty()))
    }
}

impl Display for Languages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}
