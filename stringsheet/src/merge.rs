//! Folding entries from many `.strings` files into one table keyed by string key.
//!
//! Translations are unioned per language with the last writer winning. The
//! first non-empty comment for a key is kept; a later, different comment is
//! reported as a conflict and otherwise ignored. Because of both rules, the
//! order files are merged in can change the result.

use std::collections::{HashMap, hash_map};

use tracing::warn;

use crate::types::Entry;

/// Two files documenting the same key with different comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentConflict {
    pub key: String,
    /// The comment that stays in the table.
    pub kept: String,
    pub kept_source: String,
    /// The comment that was dropped.
    pub rejected: String,
    pub rejected_source: String,
}

/// What a merge pass noticed along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Entries whose key was not yet in the table.
    pub inserted: usize,
    /// Entries folded into an existing record.
    pub merged: usize,
    pub conflicts: Vec<CommentConflict>,
}

impl MergeReport {
    /// Adds the counts and conflicts of another pass to this one.
    pub fn absorb(&mut self, other: MergeReport) {
        self.inserted += other.inserted;
        self.merged += other.merged;
        self.conflicts.extend(other.conflicts);
    }
}

/// The merged table: one canonical entry per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeTable {
    entries: HashMap<String, Entry>,
}

impl MergeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `entries` into the table in order. Never fails; conflicts are
    /// logged as warnings and returned in the report.
    pub fn merge<I>(&mut self, entries: I) -> MergeReport
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut report = MergeReport::default();
        for incoming in entries {
            match self.entries.entry(incoming.key.clone()) {
                hash_map::Entry::Vacant(slot) => {
                    slot.insert(incoming);
                    report.inserted += 1;
                }
                hash_map::Entry::Occupied(mut slot) => {
                    if let Some(conflict) = merge_into(slot.get_mut(), incoming) {
                        warn!(
                            key = %conflict.key,
                            "conflicting comments for key `{}`: kept \"{}\" ({}), ignored \"{}\" ({})",
                            conflict.key,
                            conflict.kept,
                            conflict.kept_source,
                            conflict.rejected,
                            conflict.rejected_source,
                        );
                        report.conflicts.push(conflict);
                    }
                    report.merged += 1;
                }
            }
        }
        report
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the records in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Consumes the table, returning its records sorted by source path and key.
    pub fn into_sorted_entries(self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.entries.into_values().collect();
        entries.sort_by(|a, b| {
            a.source_path
                .cmp(&b.source_path)
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }
}

/// Folds `incoming` into `existing` (same key). Returns the comment conflict, if any.
fn merge_into(existing: &mut Entry, incoming: Entry) -> Option<CommentConflict> {
    let Entry {
        source_path,
        key,
        comment,
        translations,
    } = incoming;

    let mut conflict = None;
    if !comment.is_empty() {
        if existing.comment.is_empty() {
            existing.comment = comment;
        } else if existing.comment != comment {
            conflict = Some(CommentConflict {
                key,
                kept: existing.comment.clone(),
                kept_source: existing.source_path.clone(),
                rejected: comment,
                rejected_source: source_path,
            });
        }
    }

    existing.translations.extend(translations);
    conflict
}
