//! Prompt construction for AI-generated branch names.

use crate::commit::prompt::representation_note;
use crate::diff::Representation;
use crate::llm::GenerationRequest;

pub const BRANCH_SYSTEM_PROMPT: &str = "You are an expert software developer who names Git branches. \
Analyze the given code changes (git diff) and generate a single branch name in the format `<type>/<short-description>`. \
The type must be one of: feature, fix, chore, docs, refactor, test, hotfix. \
The description must be lowercase kebab-case, at most 50 characters. \
Do not add any extra explanations, comments, or markdown formatting. Only return the raw branch name.";

/// Build the request for a branch name from the chosen representation.
pub fn build_branch_request(representation: &Representation) -> GenerationRequest {
    let user = format!(
        "Please analyze the following git diff and generate a branch name:{}\n\n{}",
        representation_note(representation),
        representation.text()
    );
    GenerationRequest::new(BRANCH_SYSTEM_PROMPT, user)
}
