//! Commit message generation and conventional-commit parsing.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::diff::Representation;
use crate::error::GeneratorError;
use crate::generate::{clean_output, generate_for_diff};
use crate::llm::TextGenerator;

use super::prompt::build_commit_request;

// Pattern: type(scope)!: description
static CONVENTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]+)\))?(!)?\s*:\s*(.*)$").expect("conventional pattern is valid")
});

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "revert" => Ok(Self::Revert),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// A generated single-line commit message.
///
/// Messages that do not follow the conventional format are still accepted;
/// their parsed fields are simply empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub text: String,
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    pub breaking: bool,
}

impl CommitMessage {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let (commit_type, scope, breaking) = parse_conventional(&text);
        Self {
            text,
            commit_type,
            scope,
            breaking,
        }
    }

    pub fn is_conventional(&self) -> bool {
        self.commit_type.is_some()
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parse a conventional commit subject.
/// Returns (commit_type, scope, breaking).
pub fn parse_conventional(subject: &str) -> (Option<CommitType>, Option<String>, bool) {
    let first_line = subject.lines().next().unwrap_or("");

    let Some(caps) = CONVENTIONAL.captures(first_line) else {
        return (None, None, false);
    };

    let commit_type = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<CommitType>().ok());
    if commit_type.is_none() {
        return (None, None, false);
    }

    let scope = caps.get(2).map(|m| m.as_str().to_string());
    let breaking = caps.get(3).is_some();

    (commit_type, scope, breaking)
}

/// Reduce raw generator output to the commit subject line.
pub fn clean_message(raw: &str) -> String {
    clean_output(raw)
}

/// Generate a commit message for `diff`.
///
/// Returns the message and the diff representation the generator saw.
pub async fn generate_commit_message<G: TextGenerator + ?Sized>(
    generator: &G,
    diff: &str,
) -> Result<(CommitMessage, Representation), GeneratorError> {
    let generated = generate_for_diff(generator, diff, build_commit_request).await?;

    let text = clean_message(&generated.text);
    if text.is_empty() {
        return Err(GeneratorError::EmptyResponse);
    }

    Ok((CommitMessage::new(text), generated.representation))
}
