//! Language model traits

use crate::{GenerateResponse, Message, ModelProfile, Result};
use async_trait::async_trait;

/// Chat-completion interface
///
/// Implementations:
/// - `OpenAIBackend` - OpenAI-compatible chat completions (Groq by default)
///
/// # Example
///
/// ```ignore
/// let llm: Arc<dyn CompletionService> = Arc::new(OpenAIBackend::new(config)?);
/// let messages = vec![Message::system("Be brief."), Message::user("Hello")];
/// let response = llm.complete(&messages, &profile).await?;
/// println!("{}", response.text);
/// ```
#[async_trait]
pub trait CompletionService: Send + Sync + 'static {
    /// Complete a conversation using the profile's model, token budget
    /// and temperature
    async fn complete(&self, messages: &[Message], profile: &ModelProfile)
        -> Result<GenerateResponse>;

    /// Check if the service is reachable
    async fn is_available(&self) -> bool;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProfileName;

    struct EchoLlm;

    #[async_trait]
    impl CompletionService for EchoLlm {
        async fn complete(
            &self,
            messages: &[Message],
            profile: &ModelProfile,
        ) -> Result<GenerateResponse> {
            let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
            Ok(GenerateResponse::text(format!("{}: {}", profile.identifier, last)))
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn provider_name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_trait_object_completion() {
        let llm: Box<dyn CompletionService> = Box::new(EchoLlm);
        let profile = ModelProfile {
            label: ProfileName::Basic,
            identifier: "tiny".into(),
            max_output_tokens: 10,
            temperature: 0.5,
            description: String::new(),
        };
        let response = llm.complete(&[Message::user("hi")], &profile).await.unwrap();
        assert_eq!(response.text, "tiny: hi");
        assert!(llm.is_available().await);
        assert_eq!(llm.provider_name(), "echo");
    }
}
