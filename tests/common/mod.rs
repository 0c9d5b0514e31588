//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use git2::{Oid, Repository, Signature};
use quill::config::GeneratorConfig;
use serde_json::{Value, json};

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_MODEL: &str = "gpt-test";

/// Generator config pointing at a mock server.
pub fn generator_config(base_url: &str) -> GeneratorConfig {
    GeneratorConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        base_url: base_url.to_string(),
        model: TEST_MODEL.to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

/// A chat-completions response body with a single choice.
pub fn chat_response(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// An OpenAI-style error body.
pub fn error_response(message: &str) -> Value {
    json!({ "error": { "message": message, "type": "invalid_request_error" } })
}

/// Build a unified diff touching `files` files with `lines` added lines each.
pub fn synthetic_diff(files: usize, lines: usize, line_len: usize) -> String {
    let mut diff = String::new();
    for i in 0..files {
        diff.push_str(&format!(
            "diff --git a/src/file{i}.js b/src/file{i}.js\n--- a/src/file{i}.js\n+++ b/src/file{i}.js\n@@ -0,0 +1,{lines} @@\n"
        ));
        for _ in 0..lines {
            diff.push('+');
            diff.push_str(&"x".repeat(line_len.saturating_sub(1)));
            diff.push('\n');
        }
    }
    diff
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new git repository with an initial commit and a local identity.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }
        let test_repo = Self { dir, repo };
        test_repo.commit_index("init");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Stage a single file.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or_default().trim_end().to_string())
            .expect("Failed to read HEAD commit")
    }

    /// Short name of the checked-out branch.
    pub fn head_branch(&self) -> String {
        self.repo
            .head()
            .expect("Failed to read HEAD")
            .shorthand()
            .unwrap_or_default()
            .to_string()
    }
}
