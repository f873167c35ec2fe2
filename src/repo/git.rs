//! Native checkout management using the `git2` crate.
//!
//! This module wraps `libgit2` for project source management, replacing
//! external git command invocations. A checkout is either cloned fresh
//! (recursively, submodules included) or updated in place; it is never
//! re-cloned and local work is never discarded — updates are fast-forward
//! only and abort if any tracked file has been modified.

use std::path::{Path, PathBuf};

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{Repository, StatusOptions};
use thiserror::Error;

/// Errors that can occur during checkout operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Clone error: {0}")]
    Clone(String),

    #[error("Checkout has local modifications: {0}")]
    DirtyTree(String),

    #[error("Cannot fast-forward: {0}")]
    Merge(String),

    #[error("Checkout conflict: {0}")]
    Conflict(String),

    #[error("Submodule error: {0}")]
    Submodule(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Git2 error: {0}")]
    Git2(#[from] git2::Error),
}

/// Result type for checkout operations
pub type GitResult<T> = Result<T, GitError>;

/// Manages the on-disk project checkout, including nested submodules.
pub struct SourceFetcher {
    checkout: PathBuf,
}

impl SourceFetcher {
    /// Clone the project or update an existing checkout in place.
    ///
    /// If `checkout` already contains a repository, the remote is fetched and
    /// the current branch fast-forwarded; otherwise a fresh clone is made.
    /// Either way all submodules are (re)initialized and updated recursively
    /// before returning.
    ///
    /// # Errors
    /// Returns `GitError::DirtyTree` if tracked files have local
    /// modifications, `GitError::Merge` if the histories have diverged, and
    /// `GitError::Clone` if the initial clone fails.
    pub fn ensure(url: &str, checkout: impl AsRef<Path>) -> GitResult<Self> {
        let checkout = checkout.as_ref().to_path_buf();

        let repo = if checkout.join(".git").exists() {
            log::info!("Checkout exists at {}, updating in place", checkout.display());
            let repo = Repository::open(&checkout).map_err(|e| {
                GitError::Repository(format!(
                    "Failed to open repository at {}: {}",
                    checkout.display(),
                    e
                ))
            })?;
            Self::ensure_clean(&repo)?;
            Self::fast_forward(&repo)?;
            repo
        } else {
            log::info!("Cloning {} into {}", url, checkout.display());
            RepoBuilder::new().clone(url, &checkout).map_err(|e| {
                GitError::Clone(format!(
                    "Failed to clone {} to {}: {}",
                    url,
                    checkout.display(),
                    e
                ))
            })?
        };

        Self::update_submodules(&repo)?;

        Ok(SourceFetcher { checkout })
    }

    /// Refuse to touch a checkout whose tracked files carry local changes.
    ///
    /// Untracked files are tolerated here — working checkouts routinely
    /// contain output directories. If an incoming file collides with one,
    /// the safe checkout in `fast_forward` reports it as a conflict.
    fn ensure_clean(repo: &Repository) -> GitResult<()> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = repo.statuses(Some(&mut options))?;
        let dirty: Vec<String> = statuses
            .iter()
            .filter_map(|entry| entry.path().map(|p| p.to_string()))
            .collect();

        if dirty.is_empty() {
            Ok(())
        } else {
            Err(GitError::DirtyTree(format!(
                "{} tracked file(s) modified, refusing to update ({})",
                dirty.len(),
                dirty.join(", ")
            )))
        }
    }

    /// Fetch origin and fast-forward the current branch.
    fn fast_forward(repo: &Repository) -> GitResult<()> {
        let mut remote = repo.find_remote("origin").map_err(|e| {
            GitError::Repository(format!("Failed to find origin remote: {}", e))
        })?;

        remote
            .fetch(&[] as &[&str], None, None)
            .map_err(|e| GitError::Repository(format!("Fetch failed: {}", e)))?;

        let fetch_head = repo.find_reference("FETCH_HEAD")?;
        let fetch_commit = repo.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = repo.merge_analysis(&[&fetch_commit])?;

        if analysis.is_up_to_date() {
            log::info!("Checkout already up to date");
            return Ok(());
        }

        if !analysis.is_fast_forward() {
            return Err(GitError::Merge(
                "local history has diverged from origin; resolve manually".to_string(),
            ));
        }

        let head = repo.head()?;
        let refname = head
            .name()
            .ok_or_else(|| GitError::Repository("HEAD has a non-UTF-8 name".to_string()))?
            .to_string();

        // Update the worktree first, and safely: an incoming file that
        // collides with an untracked local one must fail the update, not
        // overwrite it. The branch ref only moves once the checkout landed.
        let target = repo.find_object(fetch_commit.id(), None)?;
        repo.checkout_tree(&target, Some(CheckoutBuilder::default().safe()))
            .map_err(|e| {
                if e.code() == git2::ErrorCode::Conflict {
                    GitError::Conflict(
                        "incoming files collide with untracked local files; \
                         move them aside and retry"
                            .to_string(),
                    )
                } else {
                    GitError::Git2(e)
                }
            })?;

        let mut reference = repo.find_reference(&refname)?;
        reference.set_target(fetch_commit.id(), "splatenv: fast-forward")?;
        repo.set_head(&refname)?;

        log::info!("Fast-forwarded to {}", fetch_commit.id());
        Ok(())
    }

    /// Initialize and update all submodules, recursing into nested ones.
    fn update_submodules(repo: &Repository) -> GitResult<()> {
        for mut submodule in repo.submodules()? {
            let name = submodule
                .name()
                .unwrap_or("<unnamed submodule>")
                .to_string();
            log::info!("Updating submodule {}", name);
            submodule
                .update(true, None)
                .map_err(|e| GitError::Submodule(format!("{}: {}", name, e)))?;
            if let Ok(nested) = submodule.open() {
                Self::update_submodules(&nested)?;
            }
        }
        Ok(())
    }

    /// Gets the current HEAD commit hash
    ///
    /// # Errors
    /// Returns `GitError::Repository` if the operation fails
    pub fn head_commit(&self) -> GitResult<String> {
        let repo = Repository::open(&self.checkout)
            .map_err(|e| GitError::Repository(format!("Failed to open repository: {}", e)))?;

        let head = repo
            .head()
            .map_err(|e| GitError::Repository(format!("Failed to read HEAD: {}", e)))?;

        let commit_id = head
            .target()
            .ok_or_else(|| GitError::Repository("HEAD is not a direct reference".to_string()))?;

        Ok(commit_id.to_string())
    }

    /// Returns the path to the checkout
    pub fn path(&self) -> &Path {
        &self.checkout
    }
}
