//! Speech synthesis scheduling
//!
//! Synthesis is opportunistic: it only runs for short basic-mode replies,
//! and the reply never waits longer than the configured budget for it.
//! Every failure path yields `None` rather than an error.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use eco_assistant_config::SpeechConfig;
use eco_assistant_core::{Mode, SpeechSynthesizer};
use eco_assistant_text_processing::{strip_tags, truncate_chars};

/// Encoded audio attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload(Vec<u8>);

impl AudioPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Standard base64, as sent on the wire
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.0)
    }
}

/// Scheduler thresholds
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub language: String,
    /// Maximum time to wait for the synthesis task
    pub budget: Duration,
    /// Raw replies at or above this length are not spoken
    pub max_raw_chars: usize,
    /// Tag-stripped text above this length is not spoken
    pub max_clean_chars: usize,
    /// Text is cut to this length before synthesis
    pub truncate_chars: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from_settings(&SpeechConfig::default())
    }
}

impl SchedulerConfig {
    pub fn from_settings(settings: &SpeechConfig) -> Self {
        Self {
            enabled: settings.enabled,
            language: settings.language.clone(),
            budget: Duration::from_millis(settings.budget_ms),
            max_raw_chars: settings.max_raw_chars,
            max_clean_chars: settings.max_clean_chars,
            truncate_chars: settings.truncate_chars,
        }
    }
}

pub struct SpeechScheduler {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    config: SchedulerConfig,
}

impl SpeechScheduler {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, config: SchedulerConfig) -> Self {
        Self {
            synthesizer,
            config,
        }
    }

    /// Text that would be sent to the synthesizer, or `None` when the reply
    /// does not qualify for speech
    fn prepare(&self, mode: Mode, raw_text: &str) -> Option<String> {
        if !self.config.enabled || mode != Mode::Basic {
            return None;
        }
        if raw_text.chars().count() >= self.config.max_raw_chars {
            return None;
        }

        let clean = strip_tags(raw_text);
        if clean.trim().is_empty() || clean.chars().count() > self.config.max_clean_chars {
            return None;
        }

        Some(truncate_chars(&clean, self.config.truncate_chars).to_string())
    }

    /// Synthesize speech for a reply within the time budget
    pub async fn try_synthesize(&self, mode: Mode, raw_text: &str) -> Option<AudioPayload> {
        let Some(text) = self.prepare(mode, raw_text) else {
            record_outcome("skipped");
            return None;
        };

        let synthesizer = Arc::clone(&self.synthesizer);
        let language = self.config.language.clone();
        let mut handle =
            tokio::spawn(async move { synthesizer.synthesize(&text, &language).await });

        match tokio::time::timeout(self.config.budget, &mut handle).await {
            Ok(Ok(Ok(bytes))) if !bytes.is_empty() => {
                record_outcome("synthesized");
                Some(AudioPayload::new(bytes))
            }
            Ok(Ok(Ok(_))) => {
                tracing::debug!("Speech synthesis returned no audio");
                record_outcome("empty");
                None
            }
            Ok(Ok(Err(e))) => {
                tracing::warn!(error = %e, "Speech synthesis failed");
                record_outcome("failed");
                None
            }
            Ok(Err(join_error)) => {
                tracing::warn!(error = %join_error, "Speech synthesis task panicked");
                record_outcome("failed");
                None
            }
            Err(_) => {
                handle.abort();
                tracing::debug!(
                    budget_ms = self.config.budget.as_millis() as u64,
                    "Speech synthesis exceeded budget"
                );
                record_outcome("timeout");
                None
            }
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("eco_assistant_tts_outcomes_total", "outcome" => outcome).increment(1);
}
