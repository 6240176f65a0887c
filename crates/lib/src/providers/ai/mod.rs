pub mod gemini;
pub mod local;

use crate::errors::GenerationError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for producing free-text completions
/// from different Large Language Models (e.g., Gemini, local models).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response for the given prompt.
    ///
    /// When `grounded` is true the provider should let the model consult
    /// live web-search results before answering, for providers that
    /// support it; providers without a grounding facility ignore the flag.
    async fn generate(&self, prompt: &str, grounded: bool) -> Result<String, GenerationError>;
}

dyn_clone::clone_trait_object!(AiProvider);
