//! Note records.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Category assigned when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Timestamp layout used for notes: local time, microsecond precision, no
/// offset. The first 19 characters are the second-precision prefix.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A timestamped, categorized free-text record attached to a branch.
///
/// Notes have no identity beyond their position in the branch's note log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Free-form category such as `general`, `todo`, `decision` or `issue`.
    #[serde(default = "default_category")]
    pub category: String,
    /// The note text.
    pub note: String,
    /// ISO-8601 creation time.
    pub timestamp: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Note {
    /// Creates a note stamped with the current local time.
    ///
    /// The category is stored as given; only a missing category (on disk or
    /// in tool arguments) falls back to [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn new(category: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            note: note.into(),
            timestamp: current_iso_timestamp(),
        }
    }

    /// Returns the timestamp truncated to second precision.
    #[must_use]
    pub fn timestamp_seconds(&self) -> &str {
        self.timestamp
            .char_indices()
            .nth(19)
            .map_or(self.timestamp.as_str(), |(idx, _)| &self.timestamp[..idx])
    }
}

/// Returns the current local time in the note timestamp format.
#[must_use]
pub fn current_iso_timestamp() -> String {
    Local::now()
        .naive_local()
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_keeps_empty_category() {
        let note = Note::new("", "remember this");
        assert_eq!(note.category, "");
        assert_eq!(note.note, "remember this");
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = current_iso_timestamp();
        assert_eq!(ts.len(), 26);
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
    }

    #[test]
    fn test_timestamp_seconds_truncates() {
        let note = Note {
            category: "todo".to_string(),
            note: "x".to_string(),
            timestamp: "2025-03-01T09:15:42.123456".to_string(),
        };
        assert_eq!(note.timestamp_seconds(), "2025-03-01T09:15:42");
    }

    #[test]
    fn test_timestamp_seconds_short_input_unchanged() {
        let note = Note {
            category: "todo".to_string(),
            note: "x".to_string(),
            timestamp: "2025-03-01".to_string(),
        };
        assert_eq!(note.timestamp_seconds(), "2025-03-01");
    }

    #[test]
    fn test_deserialize_without_category() {
        let note: Note =
            serde_json::from_str(r#"{"note":"n","timestamp":"2025-01-01T00:00:00"}"#).unwrap();
        assert_eq!(note.category, "general");
    }

    #[test]
    fn test_serialized_field_order() {
        let note = Note {
            category: "todo".to_string(),
            note: "n".to_string(),
            timestamp: "t".to_string(),
        };
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"category":"todo","note":"n","timestamp":"t"}"#);
    }
}
