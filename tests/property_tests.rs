//! Property-based tests for branch storage.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Appended notes load back complete and in order
//! - Context text round-trips byte for byte
//! - Category grouping preserves first-seen order and every note

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use branchctx::rendering::group_by_category;
use branchctx::{BranchStore, ContextLookup, Note};
use proptest::prelude::*;
use tempfile::TempDir;

fn category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("general".to_string()),
        Just("todo".to_string()),
        Just("decision".to_string()),
        "[a-z]{1,8}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: N appends load back as exactly N notes in append order.
    #[test]
    fn prop_append_preserves_order(entries in prop::collection::vec((category(), ".{0,40}"), 0..12)) {
        let dir = TempDir::new().unwrap();
        let store = BranchStore::new(dir.path());

        for (category, text) in &entries {
            store.append_note("main", category, text).unwrap();
        }

        let notes = store.load_notes("main").unwrap();
        prop_assert_eq!(notes.len(), entries.len());
        for (note, (category, text)) in notes.iter().zip(&entries) {
            prop_assert_eq!(&note.note, text);
            prop_assert_eq!(&note.category, category);
        }
    }

    /// Property: saved context loads back unchanged.
    #[test]
    fn prop_context_round_trip(text in "(?s).{0,200}") {
        let dir = TempDir::new().unwrap();
        let store = BranchStore::new(dir.path());

        store.save_context("feature/x", &text).unwrap();
        prop_assert_eq!(store.load_context("feature/x").unwrap(), ContextLookup::Saved(text));
    }

    /// Property: grouping keeps every note and orders groups by first appearance.
    #[test]
    fn prop_grouping_is_stable(categories in prop::collection::vec("[abc]", 0..20)) {
        let notes: Vec<Note> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| Note {
                category: c.clone(),
                note: i.to_string(),
                timestamp: "2024-01-01T00:00:00.000000".to_string(),
            })
            .collect();

        let groups = group_by_category(&notes);

        let mut first_seen: Vec<&str> = Vec::new();
        for c in &categories {
            if !first_seen.contains(&c.as_str()) {
                first_seen.push(c);
            }
        }
        let group_names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
        prop_assert_eq!(group_names, first_seen);

        let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
        prop_assert_eq!(total, notes.len());
        for (name, members) in &groups {
            let indices: Vec<usize> = members.iter().map(|n| n.note.parse().unwrap()).collect();
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(members.iter().all(|n| n.category == *name));
        }
    }
}
