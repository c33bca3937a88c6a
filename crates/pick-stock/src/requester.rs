//! Recommendation requester
//!
//! Turns the candidate list into one user message, sends it to the model and
//! hands back the reply text untouched.

use crate::collector::Candidate;
use crate::error::{PickError, Result};
use crate::prompts::{Language, render_recommendation_prompt};
use pick_llm::{CompletionRequest, LLMProvider, Message, StopReason};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Asks the model for a single pick
pub struct Requester {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: usize,
    language: Language,
}

impl Requester {
    /// Create a new requester
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        model: impl Into<String>,
        max_tokens: usize,
        language: Language,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
            language,
        }
    }

    /// Build the completion request for a candidate list
    pub fn build_request(&self, candidates: &[Candidate]) -> Result<CompletionRequest> {
        let prompt = render_recommendation_prompt(self.language, candidates)?;

        Ok(CompletionRequest::builder(&self.model)
            .add_message(Message::user(prompt))
            .max_tokens(self.max_tokens)
            .build())
    }

    /// Request the pick and return the raw reply text
    ///
    /// An empty candidate list is still sent. Errors are never retried.
    #[instrument(skip(self, candidates), fields(provider = self.provider.name(), model = %self.model, candidates = candidates.len()))]
    pub async fn recommend(&self, candidates: &[Candidate]) -> Result<String> {
        if candidates.is_empty() {
            warn!("Requesting a pick with an empty candidate list");
        }

        let request = self.build_request(candidates)?;
        let response = self.provider.complete(request).await?;

        info!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Received recommendation"
        );
        if response.stop_reason == StopReason::MaxTokens {
            warn!(max_tokens = self.max_tokens, "Recommendation hit the token limit");
        }

        response
            .message
            .text()
            .map(ToString::to_string)
            .ok_or(PickError::EmptyResponse)
    }
}
