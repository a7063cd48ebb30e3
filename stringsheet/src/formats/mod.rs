//! The two file formats a sheet round-trips through.

pub mod csv;
pub mod strings;

// Reexporting the codecs for easier access
pub use self::csv::CsvCodec;
pub use self::strings::StringsCodec;
