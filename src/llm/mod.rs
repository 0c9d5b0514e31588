//! Text generation backend and retry policy.

pub mod generator;
pub mod openai;
pub mod retry;

pub use generator::{GenerationRequest, TextGenerator};
pub use openai::OpenAiGenerator;
pub use retry::generate_with_retry;
