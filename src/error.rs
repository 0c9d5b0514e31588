//! Error types for quill modules using thiserror.

use thiserror::Error;

/// Errors from reading the pending change-set.
#[derive(Error, Debug)]
pub enum ChangesError {
    #[error("Not a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] git2::Error),
}

/// Errors from the text generation backend, classified by cause.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("OpenAI API key not found. Please set the OPENAI_API_KEY environment variable.")]
    MissingApiKey,

    #[error("No diff provided. There are no changes to summarize.")]
    EmptyDiff,

    #[error("Invalid API key ({status}). Please check your OPENAI_API_KEY environment variable.")]
    InvalidApiKey { status: u16 },

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("The changes are too large to analyze: {0}")]
    InputTooLarge(String),

    #[error("API server error ({status}). Please try again later.")]
    ServerError { status: u16 },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request to the API timed out after {0} seconds")]
    Timeout(u64),

    #[error("Unable to connect to the API: {0}")]
    Connection(String),

    #[error("The API returned an empty response")]
    EmptyResponse,

    #[error("The API returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<GeneratorError>),
}

impl GeneratorError {
    /// Whether another attempt with the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeneratorError::RateLimited
                | GeneratorError::ServerError { .. }
                | GeneratorError::Timeout(_)
                | GeneratorError::Connection(_)
        )
    }

    /// The innermost error, looking through `RetriesExhausted`.
    pub fn root(&self) -> &GeneratorError {
        match self {
            GeneratorError::RetriesExhausted(inner) => inner.root(),
            other => other,
        }
    }

    /// A suggestion for the user, if there is a useful one.
    pub fn hint(&self) -> Option<&'static str> {
        match self.root() {
            GeneratorError::MissingApiKey | GeneratorError::InvalidApiKey { .. } => Some(
                "Please set your OpenAI API key:\n   export OPENAI_API_KEY=\"your-api-key-here\"",
            ),
            GeneratorError::RateLimited => {
                Some("API rate limit reached. Please try again later.")
            }
            GeneratorError::Timeout(_) | GeneratorError::Connection(_) => {
                Some("Check your internet connection and try again.")
            }
            GeneratorError::InputTooLarge(_) => Some(
                "Try committing smaller changes or stage fewer files with a more specific git add.",
            ),
            GeneratorError::EmptyDiff => Some("Use \"git add <files>\" to stage your changes first."),
            _ => None,
        }
    }
}

/// Errors from applying the generated text to the repository.
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("git is required but was not found in PATH")]
    GitNotInstalled,

    #[error("{0}")]
    GitFailed(String),

    #[error("Invalid branch name '{0}'")]
    InvalidBranchName(String),
}

/// Errors from resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Model name must not be empty")]
    EmptyModel,
}
