use proptest::prelude::*;
use stringsheet::{CsvCodec, Entry, EntryCodec, Languages, MergeTable, StringsCodec};

const SOURCE: &str = "en.lproj/Localizable.strings";

fn languages() -> Languages {
    Languages::new(["en", "ja", "zh-Hant"]).expect("valid languages")
}

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_.]([A-Za-z0-9_. =;\"\\\\\n]|\\PC){0,15}")
        .expect("valid key regex")
}

fn comment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        // Padding, tabs and line breaks; no `*` so never `*/`.
        proptest::string::string_regex("[ \t\nA-Za-z0-9,.\"'=;/]{1,20}")
            .expect("valid comment regex"),
        // Single-line text containing `*/`.
        proptest::string::string_regex("[ A-Za-z0-9*/]{0,8}\\*/[ A-Za-z0-9*/]{0,8}")
            .expect("valid comment regex"),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("([\n\r\t\",;\\\\]|\\PC){0,30}").expect("valid text regex")
}

fn strings_entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(
        (key_strategy(), comment_strategy(), text_strategy()),
        0..8,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(key, comment, value)| {
                Entry::new(SOURCE, key)
                    .with_comment(comment)
                    .with_translation("en", value)
            })
            .collect()
    })
}

fn csv_entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(
        (
            text_strategy(),
            key_strategy(),
            text_strategy(),
            prop::collection::vec(text_strategy(), 3),
        ),
        0..8,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(source, key, comment, values)| {
                let mut entry = Entry::new(source, key).with_comment(comment);
                for (language, value) in ["en", "ja", "zh-Hant"].into_iter().zip(values) {
                    entry = entry.with_translation(language, value);
                }
                entry
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn strings_roundtrip_preserves_key_comment_and_value(entries in strings_entries_strategy()) {
        let codec = StringsCodec::new("en").with_source_path(SOURCE);
        let encoded = codec
            .encode_to_string(&entries)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = codec
            .decode_str(&encoded)
            .map_err(|e| TestCaseError::fail(format!("{e}\n{encoded}")))?;
        prop_assert_eq!(decoded, entries);
    }

    #[test]
    fn csv_roundtrip_preserves_every_field(entries in csv_entries_strategy()) {
        let codec = CsvCodec::new(languages());
        let encoded = codec
            .encode_to_string(&entries)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = codec
            .decode_str(&encoded)
            .map_err(|e| TestCaseError::fail(format!("{e}\n{encoded}")))?;
        prop_assert_eq!(decoded, entries);
    }

    #[test]
    fn merging_twice_equals_merging_once(entries in csv_entries_strategy()) {
        let mut once = MergeTable::new();
        once.merge(entries.clone());

        let mut twice = MergeTable::new();
        twice.merge(entries.clone());
        twice.merge(entries);

        prop_assert_eq!(once, twice);
    }
}
