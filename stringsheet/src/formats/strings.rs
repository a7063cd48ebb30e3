//! Support for Apple `.strings` localization format.
//!
//! A file is a sequence of `"key" = "value";` definitions, each optionally
//! preceded by a `/* comment */` (or `// comment`) that documents it. One file
//! holds one language; which language is decided by the caller, not the content.

use std::io::{BufRead, Read, Write};

use crate::{error::Error, traits::EntryCodec, types::Entry};

/// Codec for one `.strings` file in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringsCodec {
    language: String,
    source_path: String,
}

impl StringsCodec {
    /// Creates a codec reading and writing values of `language`.
    pub fn new(language: impl Into<String>) -> Self {
        StringsCodec {
            language: language.into(),
            source_path: String::new(),
        }
    }

    /// Sets the `source_path` recorded on decoded entries.
    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = source_path.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    fn parse(&self, content: &str) -> Result<Vec<Entry>, Error> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut scanner = Scanner::new(content);
        let mut entries = Vec::new();
        let mut pending_comment: Option<String> = None;

        loop {
            // A blank line between a comment and a definition detaches the comment.
            if scanner.skip_whitespace() >= 2 {
                pending_comment = None;
            }

            match (scanner.peek(), scanner.peek_next()) {
                (None, _) => break,
                (Some('/'), Some('*')) => pending_comment = Some(scanner.block_comment()?),
                (Some('/'), Some('/')) => pending_comment = Some(scanner.line_comment()),
                (Some('"'), _) => {
                    let line = scanner.line;
                    let (key, value) = scanner.definition()?;
                    if key.is_empty() {
                        return Err(Error::strings_parse(line, "empty key"));
                    }
                    let entry = Entry::new(self.source_path.clone(), key)
                        .with_comment(pending_comment.take().unwrap_or_default())
                        .with_translation(self.language.clone(), value);
                    entries.push(entry);
                    scanner.skip_trailing_comment()?;
                }
                (Some(c), _) => {
                    return Err(Error::strings_parse(
                        scanner.line,
                        format!("unexpected character `{}`, expected a quoted key", c),
                    ));
                }
            }
        }

        Ok(entries)
    }
}

impl EntryCodec for StringsCodec {
    fn decode<R: BufRead>(&self, mut reader: R) -> Result<Vec<Entry>, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse(&content)
    }

    fn encode<W: Write>(&self, entries: &[Entry], mut writer: W) -> Result<(), Error> {
        for entry in entries {
            if entry.key.is_empty() {
                return Err(Error::InvalidEntry(format!(
                    "entry from `{}` has an empty key",
                    entry.source_path
                )));
            }
            write_comment(&mut writer, entry)?;
            writeln!(
                writer,
                "\"{}\" = \"{}\";\n",
                escape(&entry.key),
                escape(entry.translation(&self.language))
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Writes the comment preceding `entry`, if any.
///
/// Block form is used unless the text contains `*/`; such a comment still fits
/// on a `//` line as long as it has no line break.
fn write_comment<W: Write>(writer: &mut W, entry: &Entry) -> Result<(), Error> {
    let comment = entry.comment.as_str();
    if comment.is_empty() {
        return Ok(());
    }
    if !comment.contains("*/") {
        writeln!(writer, "/* {} */", comment)?;
    } else if !comment.contains(['\n', '\r']) {
        writeln!(writer, "// {}", comment)?;
    } else {
        return Err(Error::InvalidEntry(format!(
            "comment of `{}` contains both `*/` and a line break and cannot be written",
            entry.key
        )));
    }
    Ok(())
}

/// Escapes text for use inside a quoted `.strings` literal.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Character cursor over `.strings` content that tracks the current line.
struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Scanner {
    fn new(content: &str) -> Self {
        Scanner {
            chars: content.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Skips whitespace and returns how many line breaks were crossed.
    fn skip_whitespace(&mut self) -> usize {
        let mut newlines = 0;
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            if c == '\n' {
                newlines += 1;
            }
            self.bump();
        }
        newlines
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace() && c != '\n') {
            self.bump();
        }
    }

    /// Reads a `/* ... */` comment. One space of padding is dropped on each side.
    fn block_comment(&mut self) -> Result<String, Error> {
        let start_line = self.line;
        self.pos += 2;
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(Error::strings_parse(start_line, "unterminated comment")),
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    let text = text.strip_prefix(' ').unwrap_or(text.as_str());
                    return Ok(text.strip_suffix(' ').unwrap_or(text).to_string());
                }
                Some(c) => text.push(c),
            }
        }
    }

    /// Reads a `// ...` comment up to the end of the line, dropping one leading
    /// space and a CRLF carriage return.
    fn line_comment(&mut self) -> String {
        self.pos += 2;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        let text = text.strip_suffix('\r').unwrap_or(text.as_str());
        text.strip_prefix(' ').unwrap_or(text).to_string()
    }

    /// Drops a comment that follows a definition on the same line.
    fn skip_trailing_comment(&mut self) -> Result<(), Error> {
        self.skip_inline_whitespace();
        match (self.peek(), self.peek_next()) {
            (Some('/'), Some('*')) => self.block_comment().map(|_| ()),
            (Some('/'), Some('/')) => {
                self.line_comment();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Reads `"key" = "value";`.
    fn definition(&mut self) -> Result<(String, String), Error> {
        let key = self.quoted("key")?;
        self.skip_whitespace();
        self.expect('=', "expected `=` after key")?;
        self.skip_whitespace();
        if self.peek() != Some('"') {
            return Err(Error::strings_parse(self.line, "expected a quoted value after `=`"));
        }
        let value = self.quoted("value")?;
        self.skip_whitespace();
        self.expect(';', "expected `;` after value")?;
        Ok((key, value))
    }

    fn expect(&mut self, expected: char, message: &str) -> Result<(), Error> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(Error::strings_parse(self.line, message))
        }
    }

    /// Reads a quoted literal starting at the opening quote and decodes its escapes.
    fn quoted(&mut self, what: &str) -> Result<String, Error> {
        let start_line = self.line;
        let unterminated =
            || Error::strings_parse(start_line, format!("unterminated quoted {}", what));
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump().ok_or_else(unterminated)? {
                '"' => return Ok(text),
                '\\' => match self.bump().ok_or_else(unterminated)? {
                    '"' => text.push('"'),
                    '\\' => text.push('\\'),
                    'n' => text.push('\n'),
                    'r' => text.push('\r'),
                    't' => text.push('\t'),
                    '0' => text.push('\0'),
                    'U' => text.push(self.unicode_escape()?),
                    other => {
                        text.push('\\');
                        text.push(other);
                    }
                },
                c => text.push(c),
            }
        }
    }

    /// Decodes the digits of a `\Uxxxx` escape, joining UTF-16 surrogate pairs.
    fn unicode_escape(&mut self) -> Result<char, Error> {
        let high = self.hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| {
                Error::strings_parse(self.line, format!("invalid \\U{:04X} escape", high))
            });
        }
        if self.bump() != Some('\\') || self.bump() != Some('U') {
            return Err(Error::strings_parse(
                self.line,
                format!("unpaired surrogate \\U{:04X}", high),
            ));
        }
        let low = self.hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(Error::strings_parse(
                self.line,
                format!("unpaired surrogate \\U{:04X}", high),
            ));
        }
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(combined)
            .ok_or_else(|| Error::strings_parse(self.line, "invalid surrogate pair"))
    }

    fn hex4(&mut self) -> Result<u32, Error> {
        let mut value = 0;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| Error::strings_parse(self.line, "expected four hex digits after \\U"))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }
}
