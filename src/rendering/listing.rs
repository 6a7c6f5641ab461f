//! Grouped note listings and branch reports.

use crate::models::{BranchDataSummary, Note};

/// Width of the rule drawn around category headers.
const RULE_WIDTH: usize = 60;

/// Groups notes by category, keeping categories in first-seen order and
/// notes in their original order within each category.
#[must_use]
pub fn group_by_category(notes: &[Note]) -> Vec<(&str, Vec<&Note>)> {
    let mut groups: Vec<(&str, Vec<&Note>)> = Vec::new();
    for note in notes {
        match groups.iter_mut().find(|(cat, _)| *cat == note.category) {
            Some((_, members)) => members.push(note),
            None => groups.push((note.category.as_str(), vec![note])),
        }
    }
    groups
}

/// Renders the grouped listing for a branch's notes.
///
/// ```text
/// 📋 Notes for branch 'main':
///
/// ============================================================
///   TODO
/// ============================================================
///
/// 1. [2025-03-01T09:15:42]
///    fix login bug
/// ```
#[must_use]
pub fn render_note_listing(branch: &str, notes: &[Note]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![format!("📋 Notes for branch '{branch}':\n")];

    for (category, members) in group_by_category(notes) {
        lines.push(format!("\n{rule}"));
        lines.push(format!("  {}", category.to_uppercase()));
        lines.push(rule.clone());
        for (i, note) in members.iter().enumerate() {
            lines.push(format!("\n{}. [{}]", i + 1, note.timestamp_seconds()));
            lines.push(format!("   {}", note.note));
        }
    }

    lines.join("\n")
}

/// Renders the bulleted report of branches holding saved data.
#[must_use]
pub fn render_branch_report(branches: &[BranchDataSummary]) -> String {
    let mut lines = vec!["📊 Branches with saved data:\n".to_string()];
    for item in branches {
        lines.push(format!("  • {}", item.branch));
        if item.has_notes {
            lines.push("    - Has notes".to_string());
        }
        if item.has_context {
            lines.push("    - Has context".to_string());
        }
    }
    lines.join("\n")
}
