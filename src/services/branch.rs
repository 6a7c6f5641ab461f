//! Branch note/context operations.

use crate::config::BranchCtxConfig;
use crate::git::{GitCli, VcsClient};
use crate::models::{BranchDataSummary, ContextLookup, Note};
use crate::rendering::{render_branch_report, render_note_listing};
use crate::storage::BranchStore;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{info, instrument};

/// Operation layer over a [`BranchStore`] and a [`VcsClient`].
///
/// Mutating operations always target the current branch; `list_notes`
/// accepts an explicit branch.
#[derive(Clone)]
pub struct BranchService {
    store: BranchStore,
    vcs: Arc<dyn VcsClient>,
}

impl BranchService {
    /// Creates a service from its parts.
    #[must_use]
    pub fn new(store: BranchStore, vcs: Arc<dyn VcsClient>) -> Self {
        Self { store, vcs }
    }

    /// Builds the service described by `config`: a store at `data_dir` and a
    /// `git` subprocess client running in `repo_path`.
    #[must_use]
    pub fn from_config(config: &BranchCtxConfig) -> Self {
        let git = GitCli::new(&config.repo_path).with_binary(config.git_binary.clone());
        Self::new(BranchStore::new(&config.data_dir), Arc::new(git))
    }

    /// Current branch name, or `unknown`.
    #[must_use]
    pub fn current_branch(&self) -> String {
        self.vcs.current_branch().into_name_or_unknown()
    }

    /// Appends a note to the current branch.
    #[instrument(skip(self, note))]
    pub fn save_note(&self, note: &str, category: &str) -> Result<String> {
        let branch = self.current_branch();
        let saved = self.store.append_note(&branch, category, note)?;
        info!(branch = %branch, category = %saved.category, "saved branch note");
        Ok(format!(
            "✓ Saved {} note to branch '{branch}'\n{}",
            saved.category, saved.note
        ))
    }

    /// Renders the notes of `branch`, or of the current branch when `branch`
    /// is `None` or empty.
    #[instrument(skip(self))]
    pub fn list_notes(&self, branch: Option<&str>) -> Result<String> {
        let branch = match branch {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.current_branch(),
        };
        let notes = self.store.load_notes(&branch)?;
        if notes.is_empty() {
            return Ok(format!("No notes found for branch '{branch}'"));
        }
        Ok(render_note_listing(&branch, &notes))
    }

    /// Deletes every note on the current branch.
    #[instrument(skip(self))]
    pub fn clear_notes(&self) -> Result<String> {
        let branch = self.current_branch();
        if self.store.clear_notes(&branch)? {
            info!(branch = %branch, "cleared branch notes");
            Ok(format!("✓ Cleared all notes for branch '{branch}'"))
        } else {
            Ok(format!("No notes to clear for branch '{branch}'"))
        }
    }

    /// Replaces the current branch's context.
    #[instrument(skip(self, context))]
    pub fn save_context(&self, context: &str) -> Result<String> {
        let branch = self.current_branch();
        self.store.save_context(&branch, context)?;
        info!(branch = %branch, "saved branch context");
        Ok(format!("✓ Saved context for branch '{branch}'"))
    }

    /// Summarizes `git diff --stat branch1..branch2`.
    ///
    /// git failures are reported in the returned text, not as errors.
    #[instrument(skip(self))]
    pub fn compare_branches(&self, branch1: &str, branch2: &str) -> String {
        match self.vcs.diff_stat(branch1, branch2) {
            Ok(stat) if stat.trim().is_empty() => {
                format!("No differences between {branch1} and {branch2}")
            },
            Ok(stat) => format!("Changes from {branch1} to {branch2}:\n\n{stat}"),
            Err(e) => format!("Error comparing branches: {}", vcs_message(&e)),
        }
    }

    /// Lists branches that hold notes or context.
    pub fn branches_with_data(&self) -> Result<Vec<BranchDataSummary>> {
        self.store.list_branches_with_data()
    }

    /// Renders the report of branches holding notes or context.
    pub fn list_branches_with_data(&self) -> Result<String> {
        let branches = self.branches_with_data()?;
        if branches.is_empty() {
            return Ok("No branches with saved data".to_string());
        }
        Ok(render_branch_report(&branches))
    }

    /// Current branch's context, or a placeholder when none is saved.
    pub fn branch_context(&self) -> Result<String> {
        let branch = self.current_branch();
        Ok(match self.store.load_context(&branch)? {
            ContextLookup::Saved(text) => text,
            ContextLookup::Absent => format!("No context saved for branch '{branch}'"),
        })
    }

    /// Current branch's notes as `{"branch": ..., "notes": [...]}`.
    pub fn branch_notes_json(&self) -> Result<String> {
        let branch = self.current_branch();
        let notes: Vec<Note> = self.store.load_notes(&branch)?;
        serde_json::to_string_pretty(&serde_json::json!({
            "branch": branch,
            "notes": notes,
        }))
        .map_err(|e| Error::OperationFailed {
            operation: "serialize_branch_notes".to_string(),
            cause: e.to_string(),
        })
    }

    /// Raw `git branch -a` output, or the git error text.
    pub fn list_git_branches(&self) -> String {
        match self.vcs.list_branches() {
            Ok(listing) => listing,
            Err(e) => format!("Error listing branches: {}", vcs_message(&e)),
        }
    }
}

impl std::fmt::Debug for BranchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// git's own stderr for VCS failures, the display text otherwise.
fn vcs_message(e: &Error) -> String {
    match e {
        Error::Vcs { stderr, .. } => stderr.clone(),
        other => other.to_string(),
    }
}
