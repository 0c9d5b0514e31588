//! Change-set collection using git2.
//!
//! Diffs are rendered as unified-diff text (`diff --git` headers, `---`/`+++`
//! markers, hunk headers and prefixed lines), which is the only input the
//! size-management code understands.

use std::path::Path;

use git2::{Diff, DiffFormat, DiffOptions, ErrorCode, IndexAddOption, Repository, Tree};
use tracing::debug;

use crate::error::ChangesError;

/// Open the repository containing `path`, searching parent directories.
pub fn open_repository(path: impl AsRef<Path>) -> Result<Repository, ChangesError> {
    Repository::discover(path).map_err(ChangesError::NotARepository)
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found)
/// so the diff is taken against the empty tree.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, ChangesError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(ChangesError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(ChangesError::DiffFailed)?;
    Ok(Some(tree))
}

/// Unified diff of staged changes (index against HEAD).
///
/// Returns `Ok(None)` when nothing is staged.
pub fn staged_diff(repo: &Repository) -> Result<Option<String>, ChangesError> {
    let head_tree = resolve_head_tree(repo)?;
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(ChangesError::DiffFailed)?;

    render_patch(&diff)
}

/// Unified diff of unstaged changes, including untracked files.
///
/// Returns `Ok(None)` when the working tree matches the index.
pub fn working_diff(repo: &Repository) -> Result<Option<String>, ChangesError> {
    let mut opts = DiffOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .show_untracked_content(true);
    let diff = repo
        .diff_index_to_workdir(None, Some(&mut opts))
        .map_err(ChangesError::DiffFailed)?;

    render_patch(&diff)
}

/// Stage everything, including deletions (like `git add -A`).
pub fn stage_all(repo: &Repository) -> Result<(), ChangesError> {
    let mut index = repo.index().map_err(ChangesError::StagingFailed)?;
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .map_err(ChangesError::StagingFailed)?;
    index
        .update_all(["*"].iter(), None)
        .map_err(ChangesError::StagingFailed)?;
    index.write().map_err(ChangesError::StagingFailed)
}

/// Short name of the checked-out branch, if any.
pub fn current_branch(repo: &Repository) -> Option<String> {
    let head = repo.head().ok()?;
    if !head.is_branch() {
        return None;
    }
    head.shorthand().map(str::to_string)
}

fn render_patch(diff: &Diff<'_>) -> Result<Option<String>, ChangesError> {
    let mut text = String::new();

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(ChangesError::DiffFailed)?;

    let trimmed = text.trim();
    debug!("Collected diff: {} bytes", trimmed.len());

    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
