//! The seam between prompt assembly and the text generation service.

use async_trait::async_trait;

use crate::error::GeneratorError;

/// A system + user prompt pair sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for producing short text from a prompt.
///
/// This abstraction allows mocking the HTTP backend in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `request` and return its trimmed text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}
