//! AI-generated commit messages.

pub mod message;
pub mod prompt;

pub use message::{
    CommitMessage, CommitType, clean_message, generate_commit_message, parse_conventional,
};
pub use prompt::build_commit_request;
