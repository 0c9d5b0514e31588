//! AI-generated branch names.

pub mod name;
pub mod prompt;

pub use name::{BranchName, BranchType, MAX_SLUG_LEN, generate_branch_name};
pub use prompt::build_branch_request;
