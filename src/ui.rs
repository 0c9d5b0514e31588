//! Terminal presentation and confirmation prompts.

use dialoguer::Confirm;

use crate::branch::BranchName;
use crate::commit::CommitMessage;
use crate::diff::Representation;

/// Text shown before asking to commit.
pub fn format_commit_preview(message: &CommitMessage) -> String {
    format!("\nGenerated commit message:\n\"{}\"\n", message)
}

/// Text shown before asking to create a branch.
pub fn format_branch_preview(name: &BranchName) -> String {
    format!("\nGenerated branch name:\n{}\nType: {}\n", name, name.kind)
}

/// Line noting that the generator did not see the full diff, if that applies.
pub fn representation_notice(representation: &Representation) -> Option<&'static str> {
    match representation {
        Representation::Verbatim(_) => None,
        Representation::Truncated(_) => {
            Some("Note: the diff was large, so only the key changes were analyzed.")
        }
        Representation::Summary(_) => {
            Some("Note: the diff was very large, so only a file summary was analyzed.")
        }
    }
}

/// Ask whether to proceed with the generated commit message.
pub fn confirm_commit() -> Result<bool, dialoguer::Error> {
    Confirm::new()
        .with_prompt("Do you want to proceed with this commit message?")
        .default(true)
        .interact()
}

/// Ask whether to create and switch to the generated branch.
pub fn confirm_branch() -> Result<bool, dialoguer::Error> {
    Confirm::new()
        .with_prompt("Do you want to create this branch and switch to it?")
        .default(true)
        .interact()
}

/// Setup instructions printed by `quill init`.
pub fn init_instructions() -> String {
    [
        "quill setup",
        "",
        "1. Get an API key from https://platform.openai.com/api-keys",
        "2. Add it to your shell profile:",
        "   export OPENAI_API_KEY=\"your-api-key-here\"",
        "",
        "Optional settings:",
        "   QUILL_MODEL     model name (default: gpt-3.5-turbo)",
        "   QUILL_BASE_URL  OpenAI-compatible endpoint (default: https://api.openai.com/v1)",
        "   QUILL_TIMEOUT   request timeout in seconds (default: 30)",
        "",
        "Usage:",
        "   git add <files>",
        "   quill commit      generate a commit message for staged changes",
        "   quill branch      generate a branch name for pending changes",
    ]
    .join("\n")
}
