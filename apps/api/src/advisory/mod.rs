//! Resume advisory — free-text critique of a resume from the hosted model.
//!
//! `AppState` holds an `Arc<dyn ResumeAdvisor>` so handlers never depend on a
//! concrete provider. Default: `QwenAdvisor`.

pub mod prompts;

use async_trait::async_trait;
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};
use prompts::build_review_prompt;

#[async_trait]
pub trait ResumeAdvisor: Send + Sync {
    /// Returns the model's critique of `resume_text`.
    async fn critique(&self, resume_text: &str) -> Result<String, LlmError>;
}

/// Advisor backed by the DashScope `qwen-turbo` model.
pub struct QwenAdvisor(pub LlmClient);

#[async_trait]
impl ResumeAdvisor for QwenAdvisor {
    async fn critique(&self, resume_text: &str) -> Result<String, LlmError> {
        let prompt = build_review_prompt(resume_text);
        debug!("Requesting resume critique ({} chars)", resume_text.chars().count());
        self.0.generate(&prompt).await
    }
}
