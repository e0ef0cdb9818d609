//! Integration tests for the request pipeline (classify -> route -> complete -> format -> speak)
//!
//! The completion and synthesis services are in-process mocks, so these
//! tests exercise everything except the network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use eco_assistant_agent::{AgentError, ChatAssistant, DocumentAnalyzer, DocumentLimits};
use eco_assistant_config::ModelCatalog;
use eco_assistant_core::{
    CompletionService, ContentType, Error, GenerateResponse, Message, Mode, ModelProfile,
    ProfileName, Result, Role, SpeechSynthesizer,
};
use eco_assistant_llm::ModelRouter;
use eco_assistant_pipeline::{DocumentExtractor, SchedulerConfig, SpeechScheduler};

/// Completion mock that records every request
struct ScriptedLlm {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<(Vec<Message>, ModelProfile)>>,
}

impl ScriptedLlm {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn last_call(&self) -> (Vec<Message>, ModelProfile) {
        self.calls.lock().last().cloned().expect("no completion call")
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedLlm {
    async fn complete(&self, messages: &[Message], profile: &ModelProfile) -> Result<GenerateResponse> {
        self.calls.lock().push((messages.to_vec(), profile.clone()));
        match &self.reply {
            Ok(text) => Ok(GenerateResponse::text(text.clone())),
            Err(reason) => Err(Error::Completion(reason.clone())),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

struct FixedSynth {
    delay: Duration,
    calls: Mutex<usize>,
}

impl FixedSynth {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: Mutex::new(0),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for FixedSynth {
    async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>> {
        *self.calls.lock() += 1;
        tokio::time::sleep(self.delay).await;
        Ok(b"ID3audio".to_vec())
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

fn assistant(llm: Arc<ScriptedLlm>, synth: Arc<FixedSynth>, budget: Duration) -> ChatAssistant {
    let router = ModelRouter::new(Arc::new(ModelCatalog::default()));
    let scheduler = SpeechScheduler::new(
        synth,
        SchedulerConfig {
            budget,
            ..SchedulerConfig::default()
        },
    );
    ChatAssistant::new(llm, router, Arc::new(scheduler))
}

#[tokio::test]
async fn test_basic_turn_formats_and_speaks() {
    let llm = ScriptedLlm::replying("## Tips\n- Use **LED** bulbs\n- Unplug chargers\nDone");
    let synth = FixedSynth::new(Duration::ZERO);
    let chat = assistant(llm.clone(), synth.clone(), Duration::from_secs(5));

    let reply = chat
        .handle_turn("how do I save energy at home", &[], Mode::Basic)
        .await
        .unwrap();

    assert_eq!(
        reply.reply_text,
        "<h3>Tips</h3>\n<ul>\n<li>Use LED bulbs</li>\n<li>Unplug chargers</li>\n</ul>\n<p>Done</p>"
    );
    assert_eq!(reply.mode_used, Mode::Basic);
    assert_eq!(reply.model_used, "llama-3.1-8b-instant");
    assert_eq!(reply.content_type, ContentType::General);
    assert!(!reply.auto_generate_image);
    assert!(reply.image_prompt.is_none());
    assert_eq!(reply.reply_audio.unwrap().as_bytes(), b"ID3audio");
    assert_eq!(*synth.calls.lock(), 1);
}

#[tokio::test]
async fn test_history_window_and_message_order() {
    let llm = ScriptedLlm::replying("ok");
    let chat = assistant(llm.clone(), FixedSynth::new(Duration::ZERO), Duration::from_secs(5));

    let history: Vec<_> = (0..5)
        .map(|i| json!({"user": format!("u{}", i), "ai": format!("a{}", i)}))
        .collect();
    chat.handle_turn("latest", &history, Mode::Basic).await.unwrap();

    let (messages, profile) = llm.last_call();
    assert_eq!(profile.label, ProfileName::Basic);

    let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::System,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User
        ]
    );
    assert!(messages[0].content.contains("latest"));
    assert_eq!(messages[1].content, "u2");
    assert_eq!(messages[6].content, "a4");
    assert_eq!(messages[7].content, "latest");
}

#[tokio::test]
async fn test_auto_research_turn_skips_speech() {
    let llm = ScriptedLlm::replying("Lithium mining affects water tables.");
    let synth = FixedSynth::new(Duration::ZERO);
    let chat = assistant(llm.clone(), synth.clone(), Duration::from_secs(5));

    let reply = chat
        .handle_turn(
            "explain in detail the lifecycle impact of lithium mining",
            &[],
            Mode::Auto,
        )
        .await
        .unwrap();

    assert_eq!(reply.content_type, ContentType::Research);
    assert_eq!(reply.model_used, "llama-3.3-70b-versatile");
    assert_eq!(reply.mode_used, Mode::Auto);
    assert!(reply.reply_audio.is_none());
    assert_eq!(*synth.calls.lock(), 0);
    assert_eq!(llm.last_call().1.max_output_tokens, 800);
}

#[tokio::test]
async fn test_image_turn_sets_prompt() {
    let chat = assistant(
        ScriptedLlm::replying("Here is an idea."),
        FixedSynth::new(Duration::ZERO),
        Duration::from_secs(5),
    );

    let reply = chat
        .handle_turn("Generate image of solar farms at dawn", &[], Mode::Auto)
        .await
        .unwrap();

    assert_eq!(reply.content_type, ContentType::Image);
    assert!(reply.auto_generate_image);
    assert_eq!(
        reply.image_prompt.as_deref(),
        Some("Professional high-quality illustration: solar farms at dawn")
    );
}

#[tokio::test]
async fn test_slow_speech_does_not_block_reply() {
    let chat = assistant(
        ScriptedLlm::replying("Short answer."),
        FixedSynth::new(Duration::from_secs(30)),
        Duration::from_millis(50),
    );

    let started = std::time::Instant::now();
    let reply = chat.handle_turn("hi", &[], Mode::Basic).await.unwrap();

    assert_eq!(reply.reply_text, "<p>Short answer.</p>");
    assert!(reply.reply_audio.is_none());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_empty_message_rejected_without_call() {
    let llm = ScriptedLlm::replying("unused");
    let chat = assistant(llm.clone(), FixedSynth::new(Duration::ZERO), Duration::from_secs(5));

    let err = chat.handle_turn("", &[], Mode::Auto).await.unwrap_err();
    assert_eq!(err, AgentError::InvalidInput("No message provided".to_string()));
    assert_eq!(llm.call_count(), 0);

    // Only the empty string is missing; whitespace is forwarded as typed
    chat.handle_turn("   ", &[], Mode::Auto).await.unwrap();
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_completion_failure_propagates() {
    let chat = assistant(
        ScriptedLlm::failing("HTTP 503"),
        FixedSynth::new(Duration::ZERO),
        Duration::from_secs(5),
    );

    let err = chat.handle_turn("hello", &[], Mode::Basic).await.unwrap_err();
    assert_eq!(err, AgentError::Llm("HTTP 503".to_string()));
}

fn analyzer(llm: Arc<ScriptedLlm>, limits: DocumentLimits) -> DocumentAnalyzer {
    DocumentAnalyzer::new(
        llm,
        Arc::new(ModelCatalog::default()),
        DocumentExtractor::default(),
        limits,
    )
}

#[tokio::test]
async fn test_document_analysis() {
    let llm = ScriptedLlm::replying("## Summary\nA composting guide.");
    let docs = analyzer(
        llm.clone(),
        DocumentLimits {
            analysis_chars: 10,
            preview_chars: 5,
        },
    );

    let body = "Compost kitchen scraps weekly.".as_bytes().to_vec();
    let analysis = docs.analyze("guide.txt", body).await.unwrap();

    assert_eq!(analysis.filename, "guide.txt");
    assert_eq!(analysis.file_type, "TXT");
    assert_eq!(analysis.content_length, 30);
    assert_eq!(analysis.file_content, "Compo...");
    assert_eq!(analysis.analysis, "<h3>Summary</h3>\n<p>A composting guide.</p>");

    let (messages, profile) = llm.last_call();
    assert_eq!(profile.label, ProfileName::Research);
    assert_eq!(messages[0].role, Role::System);
    assert!(messages[1].content.ends_with("Document Content:\nCompost ki"));
}

#[tokio::test]
async fn test_document_rejections() {
    let llm = ScriptedLlm::replying("unused");
    let docs = analyzer(llm.clone(), DocumentLimits::default());

    let err = docs.analyze("", b"x".to_vec()).await.unwrap_err();
    assert_eq!(err, AgentError::InvalidInput("No file selected".to_string()));

    let err = docs.analyze("deck.pptx", b"x".to_vec()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "File type not supported. Supported: txt, pdf, docx, doc, rtf"
    );

    let err = docs.analyze("scan.pdf", b"garbage".to_vec()).await.unwrap_err();
    assert!(matches!(err, AgentError::Extraction(ref msg) if msg.starts_with("Error reading PDF file")));

    let err = docs.analyze("empty.txt", Vec::new()).await.unwrap_err();
    assert_eq!(
        err,
        AgentError::Extraction("Could not extract text from file".to_string())
    );

    assert_eq!(llm.call_count(), 0);
}
