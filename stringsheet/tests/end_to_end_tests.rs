use std::fs;
use std::io::Cursor;

use indoc::indoc;
use stringsheet::{CsvCodec, EntryCodec, Languages, Workspace, import_csv};
use tempfile::TempDir;

fn languages() -> Languages {
    Languages::new(["en", "ja", "fr"]).unwrap()
}

fn write_single_language_files(dir: &TempDir) {
    fs::write(
        dir.path().join("en.strings"),
        indoc! {r#"
            /* Shown on the home screen */
            "greeting" = "Hello";
        "#},
    )
    .unwrap();
    fs::write(dir.path().join("ja.strings"), "\"greeting\" = \"こんにちは\";\n").unwrap();
    fs::write(dir.path().join("fr.strings"), "\"greeting\" = \"Bonjour\";\n").unwrap();
}

#[test]
fn test_export_then_import_three_languages() {
    let project = TempDir::new().unwrap();
    write_single_language_files(&project);

    let mut sheet = Vec::new();
    let summary = Workspace::new(project.path(), languages())
        .export_csv(&mut sheet)
        .unwrap();
    assert_eq!(summary.files, 3);
    assert_eq!(summary.rows, 1);
    assert!(summary.merge.conflicts.is_empty());

    let sheet = String::from_utf8(sheet).unwrap();
    assert_eq!(
        sheet,
        "file,key,comment,en,ja,fr\nen.strings,greeting,Shown on the home screen,Hello,こんにちは,Bonjour\n"
    );

    let rows = CsvCodec::new(languages()).decode_str(&sheet).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "greeting");
    assert_eq!(rows[0].comment, "Shown on the home screen");

    let output = TempDir::new().unwrap();
    let imported = import_csv(Cursor::new(sheet), &languages(), output.path()).unwrap();
    assert_eq!(imported.written.len(), 3);

    for (file, value) in [
        ("en.strings", "Hello"),
        ("ja.strings", "こんにちは"),
        ("fr.strings", "Bonjour"),
    ] {
        let content = fs::read_to_string(output.path().join(file)).unwrap();
        assert_eq!(
            content,
            format!("/* Shown on the home screen */\n\"greeting\" = \"{}\";\n\n", value)
        );
    }
}

#[test]
fn test_lproj_project_round_trips_into_fresh_directory() {
    let project = TempDir::new().unwrap();
    let languages = Languages::new(["en", "ja"]).unwrap();
    for (dir, content) in [
        (
            "App/en.lproj",
            "/* Title of the main window */\n\"title\" = \"Editor\";\n\n\"quit\" = \"Quit \\\"now\\\"\";\n",
        ),
        ("App/ja.lproj", "\"title\" = \"エディタ\";\n\"quit\" = \"終了\";\n"),
    ] {
        let dir = project.path().join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Main.strings"), content).unwrap();
    }

    let mut sheet = Vec::new();
    Workspace::new(project.path(), languages.clone())
        .export_csv(&mut sheet)
        .unwrap();

    let output = TempDir::new().unwrap();
    import_csv(Cursor::new(sheet), &languages, output.path()).unwrap();

    let reimported = Workspace::new(output.path(), languages.clone());
    let (table, _) = reimported.merge().unwrap();
    let title = table.get("title").unwrap();
    assert_eq!(title.source_path, "App/en.lproj/Main.strings");
    assert_eq!(title.comment, "Title of the main window");
    assert_eq!(title.translation("ja"), "エディタ");
    assert_eq!(table.get("quit").unwrap().translation("en"), "Quit \"now\"");
}

#[test]
fn test_conflicting_comments_keep_first_file() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("en.strings"), "/* c1 */\n\"k\" = \"a\";\n").unwrap();
    fs::write(project.path().join("fr.strings"), "/* c2 */\n\"k\" = \"b\";\n").unwrap();

    let (table, summary) = Workspace::new(project.path(), languages()).merge().unwrap();
    assert_eq!(summary.merge.conflicts.len(), 1);
    assert_eq!(summary.merge.conflicts[0].key, "k");
    // Discovery is in file-name order, so en.strings is merged first.
    assert_eq!(table.get("k").unwrap().comment, "c1");
}

#[test]
fn test_import_rejects_malformed_sheet() {
    let output = TempDir::new().unwrap();
    let sheet = "file,key,comment,en,ja,fr\nen.strings,k,c,only\n";
    let err = import_csv(Cursor::new(sheet), &languages(), output.path()).unwrap_err();
    assert!(err.is_parse_error());
    assert!(fs::read_dir(output.path()).unwrap().next().is_none());
}

#[test]
fn test_line_comment_and_empty_value_survive_round_trip() {
    let project = TempDir::new().unwrap();
    let original = "\"empty\" = \"\";\n\n// see a*/b\n\"k\" = \"v\";\n\n";
    fs::write(project.path().join("en.strings"), original).unwrap();

    let mut sheet = Vec::new();
    Workspace::new(project.path(), languages())
        .export_csv(&mut sheet)
        .unwrap();
    assert_eq!(
        String::from_utf8(sheet.clone()).unwrap(),
        "file,key,comment,en,ja,fr\nen.strings,empty,,,,\nen.strings,k,see a*/b,v,,\n"
    );

    let output = TempDir::new().unwrap();
    import_csv(Cursor::new(sheet), &languages(), output.path()).unwrap();
    assert_eq!(
        fs::read_to_string(output.path().join("en.strings")).unwrap(),
        original
    );
    assert_eq!(fs::read_to_string(output.path().join("ja.strings")).unwrap(), "");
}
