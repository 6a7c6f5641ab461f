//! Filesystem store for branch notes and context.
//!
//! # Security
//!
//! Branch names become directory paths. Names with empty, `.` or `..`
//! components, absolute names and names containing NUL or `\` are rejected
//! so a branch can never resolve outside the store root.
//!
//! # Concurrency
//!
//! There is no locking. Appends read the whole log and rewrite it, so two
//! writers on the same branch can lose updates.

use crate::models::{BranchDataSummary, ContextLookup, Note};
use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// File holding a branch's note log.
pub const NOTES_FILE: &str = "notes.json";

/// File holding a branch's context text.
pub const CONTEXT_FILE: &str = "context.txt";

/// Per-branch note and context storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct BranchStore {
    root: PathBuf,
}

impl BranchStore {
    /// Creates a store rooted at `root`.
    ///
    /// Nothing is created on disk until a branch directory is first resolved.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the directory for `branch`, creating it if absent.
    ///
    /// Every call creates the directory, reads included.
    pub fn branch_dir(&self, branch: &str) -> Result<PathBuf> {
        let dir = self.root.join(branch_relative_path(branch)?);
        fs::create_dir_all(&dir).map_err(|e| Error::OperationFailed {
            operation: "create_branch_dir".to_string(),
            cause: format!("{}: {e}", dir.display()),
        })?;
        Ok(dir)
    }

    /// Appends a note to the branch's log and returns the stored record.
    #[instrument(skip(self, note_text), fields(root = %self.root.display()))]
    pub fn append_note(&self, branch: &str, category: &str, note_text: &str) -> Result<Note> {
        let path = self.branch_dir(branch)?.join(NOTES_FILE);
        let mut notes = read_notes(&path)?.unwrap_or_default();

        let note = Note::new(category, note_text);
        notes.push(note.clone());
        write_notes(&path, &notes)?;

        debug!(count = notes.len(), "note appended");
        metrics::counter!("branch_notes_appended_total").increment(1);
        Ok(note)
    }

    /// Loads the branch's notes in insertion order.
    ///
    /// Returns an empty list when no notes file exists. A corrupt file is an
    /// [`Error::Decode`].
    pub fn load_notes(&self, branch: &str) -> Result<Vec<Note>> {
        let path = self.branch_dir(branch)?.join(NOTES_FILE);
        Ok(read_notes(&path)?.unwrap_or_default())
    }

    /// Deletes the branch's notes file. Returns whether anything was deleted.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn clear_notes(&self, branch: &str) -> Result<bool> {
        let path = self.branch_dir(branch)?.join(NOTES_FILE);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("delete_notes", &path, &e)),
        }
    }

    /// Overwrites the branch's context with `text`.
    #[instrument(skip(self, text), fields(root = %self.root.display(), len = text.len()))]
    pub fn save_context(&self, branch: &str, text: &str) -> Result<()> {
        let path = self.branch_dir(branch)?.join(CONTEXT_FILE);
        fs::write(&path, text).map_err(|e| io_error("write_context", &path, &e))
    }

    /// Loads the branch's context.
    pub fn load_context(&self, branch: &str) -> Result<ContextLookup> {
        let path = self.branch_dir(branch)?.join(CONTEXT_FILE);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(ContextLookup::Saved(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ContextLookup::Absent),
            Err(e) => Err(io_error("read_context", &path, &e)),
        }
    }

    /// Lists every branch directory holding at least one artifact.
    ///
    /// Nested directories are walked so `feature/login` is reported under its
    /// full name. Results are sorted by branch name; a missing root yields an
    /// empty list.
    pub fn list_branches_with_data(&self) -> Result<Vec<BranchDataSummary>> {
        let mut found = Vec::new();
        if self.root.is_dir() {
            collect_branches(&self.root, None, &mut found)?;
        }
        found.sort_by(|a, b| a.branch.cmp(&b.branch));
        Ok(found)
    }
}

/// Maps a branch name onto a path relative to the store root.
fn branch_relative_path(branch: &str) -> Result<PathBuf> {
    if branch.is_empty() {
        return Err(Error::InvalidInput("branch name must not be empty".to_string()));
    }
    if branch.contains('\0') || branch.contains('\\') {
        return Err(Error::InvalidInput(format!(
            "branch name contains invalid characters: {branch:?}"
        )));
    }

    let mut path = PathBuf::new();
    for component in branch.split('/') {
        if component.is_empty() || component == "." || component == ".." {
            return Err(Error::InvalidInput(format!(
                "branch name cannot be used as a storage path: {branch:?}"
            )));
        }
        path.push(component);
    }

    if path.is_absolute() {
        return Err(Error::InvalidInput(format!(
            "branch name cannot be used as a storage path: {branch:?}"
        )));
    }
    Ok(path)
}

fn collect_branches(
    dir: &Path,
    prefix: Option<&str>,
    found: &mut Vec<BranchDataSummary>,
) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| io_error("scan_branches", dir, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| io_error("scan_branches", dir, &e))?;
        let path = entry.path();
        // Symlinks are not followed, so a link cycle cannot recurse.
        let file_type = entry
            .file_type()
            .map_err(|e| io_error("scan_branches", &path, &e))?;
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let branch = prefix.map_or_else(|| name.clone(), |p| format!("{p}/{name}"));
        let has_notes = path.join(NOTES_FILE).is_file();
        let has_context = path.join(CONTEXT_FILE).is_file();

        if has_notes || has_context {
            found.push(BranchDataSummary {
                branch: branch.clone(),
                has_notes,
                has_context,
            });
        }

        collect_branches(&path, Some(&branch), found)?;
    }

    Ok(())
}

fn read_notes(path: &Path) -> Result<Option<Vec<Note>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error("read_notes", path, &e)),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| Error::Decode {
            path: path.display().to_string(),
            cause: e.to_string(),
        })
}

fn write_notes(path: &Path, notes: &[Note]) -> Result<()> {
    let json = serde_json::to_string_pretty(notes).map_err(|e| Error::OperationFailed {
        operation: "serialize_notes".to_string(),
        cause: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| io_error("write_notes", path, &e))
}

fn io_error(operation: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("{}: {e}", path.display()),
    }
}
