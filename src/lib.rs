//! quill - AI-generated commit messages and branch names from git diffs.
//!
//! # Overview
//!
//! quill reads the staged (or working) diff, bounds it to a size the
//! language model accepts, and asks an OpenAI-compatible API for a
//! Conventional Commits message or a `<type>/<slug>` branch name.
//!
//! Diffs are sized with a cheap estimate and handled by one of three
//! representations: verbatim, selectively truncated, or a structural
//! summary. See [`diff`].

pub mod branch;
pub mod commit;
pub mod config;
pub mod diff;
pub mod error;
pub mod generate;
pub mod git;
pub mod llm;
pub mod ui;

// Re-export commonly used types
pub use branch::{BranchName, BranchType};
pub use commit::{CommitMessage, CommitType};
pub use config::GeneratorConfig;
pub use diff::{Representation, estimate_units, select_representation, summarize, truncate};
pub use error::{ApplyError, ChangesError, ConfigError, GeneratorError};
pub use llm::{GenerationRequest, OpenAiGenerator, TextGenerator};
