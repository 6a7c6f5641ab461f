//! Argument types and helper functions for MCP tools.
//!
//! # Security
//!
//! All argument types use `#[serde(deny_unknown_fields)]` so misspelled or
//! injected parameters fail loudly instead of being ignored.

use crate::models::DEFAULT_CATEGORY;
use crate::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maximum accepted length for note and context text (1 MiB).
pub const MAX_TEXT_LENGTH: usize = 1_048_576;

/// Maximum accepted length for branch name arguments.
pub const MAX_BRANCH_LENGTH: usize = 1024;

/// Maximum accepted length for note categories.
pub const MAX_CATEGORY_LENGTH: usize = 256;

/// Arguments for `save_branch_note`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveNoteArgs {
    /// Note content.
    pub note: String,
    /// Category: general, todo, decision, issue, or any other label.
    #[serde(default = "default_category")]
    pub category: String,
}

/// Arguments for `list_branch_notes`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListNotesArgs {
    /// Branch to list; empty means the current branch.
    #[serde(default)]
    pub branch_name: String,
}

/// Arguments for `save_branch_context`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveContextArgs {
    /// Context description (purpose, status, blockers).
    pub context: String,
}

/// Arguments for `compare_branches`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareBranchesArgs {
    /// Base branch.
    pub branch1: String,
    /// Branch compared against the base.
    pub branch2: String,
}

/// Arguments for tools that take none.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Deserializes tool arguments, treating `null` as an empty object.
pub fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidInput(e.to_string()))
}

/// Validates that a string input does not exceed the maximum allowed length.
pub fn validate_input_length(input: &str, field_name: &str, max_length: usize) -> Result<()> {
    if input.len() > max_length {
        return Err(Error::InvalidInput(format!(
            "{field_name} exceeds maximum length ({} > {max_length} bytes)",
            input.len()
        )));
    }
    Ok(())
}
