//! AI assistant ports and application service.
//!
//! The assistant proxies one generation call per question to an external
//! model provider. The caller's claim decides the tier: executives get an
//! unrestricted prompt with a generous token budget, everyone else gets a
//! closed-domain prompt grounded in the site knowledge snippet. Questions
//! and answers are never persisted.

use std::sync::Arc;

use async_trait::async_trait;
use campusforge_core::{AppError, AppResult, IdentityClaim};
use campusforge_domain::{Capability, authorize};

/// Reference notes the standard tier is allowed to answer from.
const KNOWLEDGE_SNIPPET: &str = "\
Campusforge Labs is the student-run software studio at Northfield College.
We build custom websites, brand and interface designs, data dashboards, and
workflow automation for campus groups and local businesses. New work starts
with the service inquiry form on the site; the team replies within two
business days and tracks every request from 'new' to 'completed'.
We recruit student developers, designers, and analysts each term. Open
positions are listed on the careers page; applications go through the
application form and are reviewed by the leadership team. The studio meets
in Harmon Hall room 2B, with open office hours Tuesday and Thursday
afternoons.";

/// Fallback used when a claim carries neither a name nor an email.
const GUEST_NAME: &str = "Guest";

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Parameters for one upstream generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Fully assembled prompt text.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
    /// Nucleus sampling cutoff.
    pub top_p: f64,
    /// Top-k sampling cutoff, when the tier constrains it.
    pub top_k: Option<u32>,
}

/// What the model provider produced for a generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The provider returned answer text.
    Answer(String),
    /// The provider refused the prompt on safety grounds.
    Blocked {
        /// Provider-reported block reason.
        reason: String,
    },
}

/// Port for the external model provider.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Runs one generation call.
    async fn generate(&self, request: GenerationRequest) -> AppResult<GenerationOutcome>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for the two-tier AI assistant.
#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn AnswerGenerator>,
}

impl ChatService {
    /// Creates a new chat service.
    #[must_use]
    pub fn new(generator: Arc<dyn AnswerGenerator>) -> Self {
        Self { generator }
    }

    /// Answers one visitor question.
    ///
    /// Anonymous callers are served on the standard tier; the elevated
    /// tier requires the executive role on the claim. A safety block from
    /// the provider is returned as a polite answer rather than an error.
    pub async fn ask(&self, claim: Option<&IdentityClaim>, query: &str) -> AppResult<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation(
                "missing required field 'userQuery'".to_owned(),
            ));
        }

        let caller_name = claim
            .and_then(|value| value.full_name().or(value.email()))
            .unwrap_or(GUEST_NAME);
        let elevated = authorize(claim, Capability::ElevatedChatTier).is_ok();

        let request = if elevated {
            GenerationRequest {
                prompt: elevated_prompt(caller_name, query),
                temperature: 0.7,
                max_output_tokens: 1500,
                top_p: 0.95,
                top_k: None,
            }
        } else {
            GenerationRequest {
                prompt: standard_prompt(caller_name, query),
                temperature: 0.4,
                max_output_tokens: 512,
                top_p: 0.9,
                top_k: Some(40),
            }
        };

        match self.generator.generate(request).await? {
            GenerationOutcome::Answer(text) => Ok(text.trim().to_owned()),
            GenerationOutcome::Blocked { reason } => Ok(format!(
                "My response was blocked. Reason: {reason}. Please try rephrasing your question."
            )),
        }
    }
}

fn standard_prompt(caller_name: &str, query: &str) -> String {
    format!(
        "You are the front-desk assistant for Campusforge Labs. Answer using ONLY \
         the reference notes below. If the notes do not cover the question, say you \
         do not have that information and point the visitor to the service inquiry \
         form; never invent details.\n\nReference notes:\n{KNOWLEDGE_SNIPPET}\n\n\
         {caller_name}'s question is: \"{query}\""
    )
}

fn elevated_prompt(caller_name: &str, query: &str) -> String {
    format!(
        "You are the private assistant of Campusforge Labs' chief executive. Answer \
         directly and concisely on any topic; no subject restrictions apply.\n\n\
         {caller_name}'s question is: \"{query}\""
    )
}
