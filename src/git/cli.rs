//! `git` subprocess client.

use super::VcsClient;
use crate::models::BranchResolution;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, instrument};

/// Runs git commands as child processes in a fixed working directory.
///
/// Commands are awaited synchronously with no timeout.
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Directory the commands run in.
    repo_path: PathBuf,
    /// git executable name or path.
    binary: String,
}

impl GitCli {
    /// Default executable name.
    pub const DEFAULT_BINARY: &'static str = "git";

    /// Creates a client for the repository at `repo_path`.
    #[must_use]
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            binary: Self::DEFAULT_BINARY.to_string(),
        }
    }

    /// Uses a different git executable.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Runs `git <args>` and returns stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.first().copied().unwrap_or_default().to_string();
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| Error::Vcs {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!(command = %command, status = ?output.status.code(), "git command failed");
            metrics::counter!("git_command_failures_total", "command" => command.clone())
                .increment(1);
            return Err(Error::Vcs { command, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsClient for GitCli {
    #[instrument(skip(self), fields(repo = %self.repo_path.display()))]
    fn current_branch(&self) -> BranchResolution {
        match self.run(&["rev-parse", "--abbrev-ref", "HEAD"]) {
            Ok(stdout) => {
                let name = stdout.trim();
                if name.is_empty() {
                    BranchResolution::Unavailable
                } else {
                    BranchResolution::Resolved(name.to_string())
                }
            },
            Err(e) => {
                debug!(error = %e, "branch resolution unavailable");
                BranchResolution::Unavailable
            },
        }
    }

    #[instrument(skip(self))]
    fn diff_stat(&self, from: &str, to: &str) -> Result<String> {
        check_ref(from)?;
        check_ref(to)?;
        let range = format!("{from}..{to}");
        self.run(&["diff", "--stat", &range])
    }

    #[instrument(skip(self))]
    fn list_branches(&self) -> Result<String> {
        self.run(&["branch", "-a"])
    }
}

/// Rejects refs git would parse as an option.
fn check_ref(reference: &str) -> Result<()> {
    if reference.starts_with('-') {
        return Err(Error::InvalidInput(format!(
            "ref '{reference}' cannot start with '-'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test]
    fn test_missing_binary_is_unavailable() {
        let git = GitCli::new(".").with_binary("branchctx-no-such-git-binary");
        assert_eq!(git.current_branch(), BranchResolution::Unavailable);
    }

    #[test]
    fn test_missing_binary_diff_is_vcs_error() {
        let git = GitCli::new(".").with_binary("branchctx-no-such-git-binary");
        let err = git.diff_stat("main", "main").unwrap_err();
        assert!(matches!(err, Error::Vcs { ref command, .. } if command == "diff"));
    }

    #[test]
    fn test_builder() {
        let git = GitCli::new("/tmp/repo").with_binary("/usr/local/bin/git");
        assert_eq!(git.repo_path, Path::new("/tmp/repo"));
        assert_eq!(git.binary, "/usr/local/bin/git");
    }

    #[test_case("--output=out.txt", "main" ; "option as base")]
    #[test_case("main", "-p" ; "option as target")]
    fn test_option_like_ref_rejected(from: &str, to: &str) {
        let git = GitCli::new(".").with_binary("branchctx-no-such-git-binary");
        let err = git.diff_stat(from, to).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref msg) if msg.contains("cannot start with '-'")));
    }

    /// Creates a repository on `main` with one empty commit.
    ///
    /// Returns `None` when git is not installed.
    fn init_repo() -> Option<TempDir> {
        let available = Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success());
        if !available {
            return None;
        }

        let dir = TempDir::new().unwrap();
        let git = |args: &[&str]| {
            let status = Command::new("git")
                .args(["-c", "user.name=branchctx", "-c", "user.email=branchctx@example.com"])
                .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
                .args(args)
                .current_dir(dir.path())
                .output()
                .unwrap()
                .status;
            assert!(status.success(), "git {args:?} failed");
        };
        git(&["init", "-q"]);
        git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(&["commit", "-q", "--allow-empty", "-m", "init"]);
        Some(dir)
    }

    #[test]
    fn test_repository_branch_resolves() {
        let Some(dir) = init_repo() else { return };
        let git = GitCli::new(dir.path());
        assert_eq!(
            git.current_branch(),
            BranchResolution::Resolved("main".to_string())
        );
    }

    #[test]
    fn test_repository_identical_refs_have_empty_diff() {
        let Some(dir) = init_repo() else { return };
        let git = GitCli::new(dir.path());
        assert_eq!(git.diff_stat("main", "main").unwrap(), "");
    }

    #[test]
    fn test_repository_branch_listing() {
        let Some(dir) = init_repo() else { return };
        let git = GitCli::new(dir.path());
        let listing = git.list_branches().unwrap();
        assert!(listing.lines().any(|l| l.trim_start_matches('*').trim() == "main"));
    }

    #[test]
    fn test_repository_bad_ref_keeps_stderr() {
        let Some(dir) = init_repo() else { return };
        let git = GitCli::new(dir.path());
        let err = git.diff_stat("main", "no-such-branch").unwrap_err();
        assert!(matches!(
            err,
            Error::Vcs { ref command, ref stderr } if command == "diff" && stderr.contains("no-such-branch")
        ));
    }

    #[test]
    fn test_repository_output_option_writes_nothing() {
        let Some(dir) = init_repo() else { return };
        let git = GitCli::new(dir.path());
        let target = dir.path().join("written.txt");
        let injected = format!("--output={}", target.display());

        let err = git.diff_stat(&injected, "main").unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(".git")]);
    }
}
