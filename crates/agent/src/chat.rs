//! Chat turn orchestration
//!
//! One turn runs: classify, route, window history, complete, format, then
//! the bounded speech attempt. Only the completion call can fail the turn.

use std::sync::Arc;
use std::time::Instant;

use eco_assistant_core::{CompletionService, ContentType, Mode};
use eco_assistant_llm::{build_messages, ModelRouter};
use eco_assistant_pipeline::{AudioPayload, SpeechScheduler};
use eco_assistant_text_processing::{classify, format_response, image_prompt_for};
use serde_json::Value;

use crate::history::recent_turns;
use crate::AgentError;

/// Everything the client receives for one chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Formatted markup
    pub reply_text: String,
    pub reply_audio: Option<AudioPayload>,
    /// Illustration prompt, present only for image requests
    pub image_prompt: Option<String>,
    pub mode_used: Mode,
    pub model_used: String,
    pub content_type: ContentType,
    pub auto_generate_image: bool,
}

pub struct ChatAssistant {
    completion: Arc<dyn CompletionService>,
    router: ModelRouter,
    speech: Arc<SpeechScheduler>,
}

impl ChatAssistant {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        router: ModelRouter,
        speech: Arc<SpeechScheduler>,
    ) -> Self {
        Self {
            completion,
            router,
            speech,
        }
    }

    pub async fn handle_turn(
        &self,
        message: &str,
        history: &[Value],
        mode: Mode,
    ) -> Result<ChatReply, AgentError> {
        if message.is_empty() {
            return Err(AgentError::InvalidInput("No message provided".to_string()));
        }

        let classification = classify(message);
        let content_type = classification.label();
        let decision = self.router.route(mode, &classification);

        tracing::info!(
            mode = %mode,
            content_type = %content_type,
            model = %decision.profile.identifier,
            template = decision.template.as_str(),
            "Routing chat turn"
        );
        metrics::counter!(
            "eco_assistant_requests_total",
            "endpoint" => "chat",
            "mode" => mode.as_str()
        )
        .increment(1);

        let turns = recent_turns(history, mode);
        let messages = build_messages(decision.template, &turns, message);

        let started = Instant::now();
        let response = self.completion.complete(&messages, &decision.profile).await?;
        metrics::histogram!(
            "eco_assistant_completion_latency_seconds",
            "profile" => decision.profile.label.as_str()
        )
        .record(started.elapsed().as_secs_f64());

        let raw = response.text;
        let reply_text = format_response(&raw);
        let reply_audio = self.speech.try_synthesize(mode, &raw).await;

        let is_image = content_type == ContentType::Image;
        let image_prompt = is_image.then(|| image_prompt_for(message));

        tracing::debug!(
            raw_chars = raw.chars().count(),
            has_audio = reply_audio.is_some(),
            history_turns = turns.len(),
            "Chat turn complete"
        );

        Ok(ChatReply {
            reply_text,
            reply_audio,
            image_prompt,
            mode_used: mode,
            model_used: decision.profile.identifier,
            content_type,
            auto_generate_image: is_image,
        })
    }
}
