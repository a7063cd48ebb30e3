//! Traits shared by the `.strings` and CSV codecs.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, types::Entry};

/// Decoding and encoding a sequence of entries from/to one file.
///
/// Implementors carry whatever context the format needs (the target language,
/// the configured language list) so decode and encode share one signature.
///
/// # Example
///
/// ```rust,no_run
/// use stringsheet::{formats::StringsCodec, traits::EntryCodec};
/// let codec = StringsCodec::new("en").with_source_path("en.lproj/Localizable.strings");
/// let entries = codec.read_from("en.lproj/Localizable.strings")?;
/// codec.write_to(&entries, "copy.strings")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait EntryCodec {
    /// Decode entries from any reader.
    fn decode<R: BufRead>(&self, reader: R) -> Result<Vec<Entry>, Error>;

    /// Encode entries to any writer (file, memory, etc.).
    fn encode<W: Write>(&self, entries: &[Entry], writer: W) -> Result<(), Error>;

    /// Decode entries from a file path. Errors name the file.
    fn read_from<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Entry>, Error> {
        let path = path.as_ref();
        File::open(path)
            .map_err(Error::Io)
            .and_then(|file| self.decode(BufReader::new(file)))
            .map_err(|e| e.in_file(path))
    }

    /// Encode entries to a file path, replacing its content. Errors name the file.
    fn write_to<P: AsRef<Path>>(&self, entries: &[Entry], path: P) -> Result<(), Error> {
        let path = path.as_ref();
        File::create(path)
            .map_err(Error::Io)
            .and_then(|file| self.encode(entries, BufWriter::new(file)))
            .map_err(|e| e.in_file(path))
    }

    /// Decode entries from a string.
    fn decode_str(&self, s: &str) -> Result<Vec<Entry>, Error> {
        self.decode(Cursor::new(s))
    }

    /// Encode entries into a string.
    fn encode_to_string(&self, entries: &[Entry]) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.encode(entries, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::InvalidEntry(format!("encoded output is not UTF-8: {}", e)))
    }
}
