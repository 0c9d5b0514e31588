//! Git integration: reading pending changes and applying generated text.

pub mod changes;
pub mod executor;

pub use changes::{current_branch, open_repository, stage_all, staged_diff, working_diff};
pub use executor::{GitExecutor, check_git_installed};
