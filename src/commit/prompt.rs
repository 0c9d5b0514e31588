//! Prompt construction for AI-generated commit messages.

use crate::diff::Representation;
use crate::llm::GenerationRequest;

pub const COMMIT_SYSTEM_PROMPT: &str = "You are an expert software developer and an expert in writing Git commit messages. \
Your task is to analyze the given code changes (git diff) and generate a concise, single-line commit message \
that follows the Conventional Commits specification. The message should be in the format `<type>(<scope>): <subject>`. \
Do not add any extra explanations, comments, or markdown formatting. Only return the raw commit message string.";

/// Build the request for a commit message from the chosen representation.
pub fn build_commit_request(representation: &Representation) -> GenerationRequest {
    let user = format!(
        "Please analyze the following git diff and generate a commit message:{}\n\n{}",
        representation_note(representation),
        representation.text()
    );
    GenerationRequest::new(COMMIT_SYSTEM_PROMPT, user)
}

/// A short explanation when the generator is not seeing the full diff.
pub(crate) fn representation_note(representation: &Representation) -> &'static str {
    match representation {
        Representation::Verbatim(_) => "",
        Representation::Truncated(_) => {
            "\n(The diff was truncated due to size. Focus on the visible changes.)"
        }
        Representation::Summary(_) => {
            "\n(The diff was too large to include. A summary of the changed files follows.)"
        }
    }
}
