//! Finding the `.strings` files of a project.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::{
    error::Error,
    layout::{language_of_path, relative_source_path},
    types::Languages,
};

const STRINGS_EXTENSION: &str = "strings";

/// A discovered `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path usable for opening the file.
    pub path: PathBuf,
    /// Path relative to the discovery root, `/`-separated; recorded on entries.
    pub source_path: String,
    /// The configured language the file holds, if its location names one.
    pub language: Option<String>,
}

/// Walks `root` and returns every `.strings` file below it.
///
/// Siblings are visited in file-name order, so the result is stable between
/// runs. `.gitignore` and `.ignore` rules are honoured; hidden files are not
/// skipped.
pub fn discover_strings_files<P: AsRef<Path>>(
    root: P,
    languages: &Languages,
) -> Result<Vec<SourceFile>, Error> {
    let root = root.as_ref();
    let walker = WalkBuilder::new(root)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .hidden(false)
        .ignore(true)
        .parents(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for dent in walker {
        let dent = dent?;
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = dent.path();
        if path.extension().and_then(|e| e.to_str()) != Some(STRINGS_EXTENSION) {
            continue;
        }
        files.push(SourceFile {
            path: path.to_path_buf(),
            source_path: relative_source_path(path, root),
            language: language_of_path(path.strip_prefix(root).unwrap_or(path), languages),
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discovers_strings_files_in_stable_order() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for dir in ["ja.lproj", "en.lproj", "Base.lproj"] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("Main.strings"), "").unwrap();
        }
        fs::write(root.join("en.lproj").join("notes.txt"), "").unwrap();
        fs::write(root.join("fr.strings"), "").unwrap();

        let languages = Languages::new(["en", "ja", "fr"]).unwrap();
        let files = discover_strings_files(root, &languages).unwrap();
        let found: Vec<_> = files
            .iter()
            .map(|f| (f.source_path.as_str(), f.language.as_deref()))
            .collect();
        assert_eq!(
            found,
            [
                ("Base.lproj/Main.strings", None),
                ("en.lproj/Main.strings", Some("en")),
                ("fr.strings", Some("fr")),
                ("ja.lproj/Main.strings", Some("ja")),
            ]
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(discover_strings_files(&missing, &Languages::default()).is_err());
    }
}
