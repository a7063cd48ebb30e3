//! Which language a `.strings` file holds, and where a language's copy of a file goes.
//!
//! Apple projects keep one copy of each table per language, either in a
//! `<lang>.lproj` directory (`en.lproj/Localizable.strings`) or, in flatter
//! layouts, named after the language (`en.strings`). Both conventions are
//! recognised; content is never inspected.

use std::path::{Component, Path, PathBuf};

use crate::{error::Error, types::Languages};

const LPROJ_SUFFIX: &str = ".lproj";

/// File name used for entries whose source path is empty.
pub const DEFAULT_TABLE: &str = "Localizable.strings";

/// Returns the configured language a `.strings` path represents.
///
/// The nearest `<lang>.lproj` directory naming a configured language wins;
/// otherwise the file stem is used.
/// Returns `None` when neither names a configured language.
///
/// ```rust
/// use stringsheet::{Languages, layout::language_of_path};
/// let languages = Languages::default();
/// assert_eq!(language_of_path("App/ja.lproj/Main.strings", &languages), Some("ja".to_string()));
/// assert_eq!(language_of_path("fr.strings", &languages), Some("fr".to_string()));
/// assert_eq!(language_of_path("Base.lproj/Main.strings", &languages), None);
/// ```
pub fn language_of_path<P: AsRef<Path>>(path: P, languages: &Languages) -> Option<String> {
    let path = path.as_ref();
    let from_lproj = path
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .rev()
        .find_map(|c| {
            c.as_os_str()
                .to_str()?
                .strip_suffix(LPROJ_SUFFIX)
                .filter(|code| languages.contains(code))
        });

    from_lproj
        .or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .filter(|stem| languages.contains(stem))
        })
        .map(str::to_string)
}

/// Renders `path` relative to `root` with `/` separators, as recorded in `source_path`.
pub fn relative_source_path<P: AsRef<Path>, R: AsRef<Path>>(path: P, root: R) -> String {
    let path = path.as_ref();
    let relative = path.strip_prefix(root.as_ref()).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Maps a recorded `source_path` to the path of its copy in `language`,
/// relative to the output root.
///
/// The component that carried the source language (the `.lproj` directory or the
/// file stem) is swapped for `language`. A path with neither gets a
/// `<language>.lproj` directory in front of its file name.
///
/// ```rust
/// use std::path::PathBuf;
/// use stringsheet::{Languages, layout::localized_path};
/// let languages = Languages::default();
/// assert_eq!(
///     localized_path("App/en.lproj/Main.strings", "ja", &languages)?,
///     PathBuf::from("App/ja.lproj/Main.strings")
/// );
/// assert_eq!(localized_path("en.strings", "fr", &languages)?, PathBuf::from("fr.strings"));
/// assert_eq!(
///     localized_path("Main.strings", "vi", &languages)?,
///     PathBuf::from("vi.lproj/Main.strings")
/// );
/// # Ok::<(), stringsheet::Error>(())
/// ```
pub fn localized_path(
    source_path: &str,
    language: &str,
    languages: &Languages,
) -> Result<PathBuf, Error> {
    let source_path = if source_path.is_empty() {
        DEFAULT_TABLE
    } else {
        source_path
    };

    let mut parts: Vec<String> = Vec::new();
    for part in source_path.split(['/', '\\']) {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(Error::InvalidEntry(format!(
                    "source path `{}` leaves the output directory",
                    source_path
                )));
            }
            _ => parts.push(part.to_string()),
        }
    }
    if source_path.starts_with('/') || Path::new(source_path).has_root() {
        return Err(Error::InvalidEntry(format!(
            "source path `{}` must be relative",
            source_path
        )));
    }
    let Some(file_name) = parts.pop() else {
        return Err(Error::InvalidEntry(format!(
            "source path `{}` has no file name",
            source_path
        )));
    };

    let lproj = parts.iter().rposition(|part| {
        part.strip_suffix(LPROJ_SUFFIX)
            .is_some_and(|code| languages.contains(code))
    });

    let file_name = match lproj {
        Some(index) => {
            parts[index] = format!("{}{}", language, LPROJ_SUFFIX);
            file_name
        }
        None => {
            let renamed = match file_name.rsplit_once('.') {
                Some((stem, extension)) if languages.contains(stem) => {
                    Some(format!("{}.{}", language, extension))
                }
                None if languages.contains(&file_name) => Some(language.to_string()),
                _ => None,
            };
            renamed.unwrap_or_else(|| {
                parts.push(format!("{}{}", language, LPROJ_SUFFIX));
                file_name
            })
        }
    };

    parts.push(file_name);
    Ok(parts.iter().collect())
}
