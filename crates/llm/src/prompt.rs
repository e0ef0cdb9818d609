//! Prompt Building
//!
//! Templates are plain string substitution over the raw query. The rendered
//! template becomes the single system message of a completion request.

use eco_assistant_core::{ConversationTurn, Message};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named chat prompt template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTemplate {
    /// Short, practical answer
    Basic,
    /// Long-form structured research answer
    Research,
    /// Textual process flow diagram
    Diagram,
}

impl PromptTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptTemplate::Basic => "basic",
            PromptTemplate::Research => "research",
            PromptTemplate::Diagram => "diagram",
        }
    }

    /// Render the template around the user's query
    pub fn render(&self, query: &str) -> String {
        match self {
            PromptTemplate::Basic => format!(
                "You are a helpful sustainability assistant. Provide a clear, concise answer to this question about environmental science, metals, mining, or sustainability.

Keep your response:
- Under 100 words
- Easy to understand
- Practical and actionable
- Well-structured with bullet points if needed

Question: {query}"
            ),
            PromptTemplate::Research => format!(
                "You are an expert sustainability researcher with deep knowledge in environmental science, metals, mining, and sustainable practices.

Provide a comprehensive, well-researched response that includes:
- Detailed explanation of the topic
- Current industry standards and best practices
- Environmental impact considerations
- Latest developments and innovations
- Practical recommendations
- Supporting data or statistics where relevant

Structure your response with clear headings and subpoints. Aim for 400-600 words.

Research Query: {query}"
            ),
            PromptTemplate::Diagram => format!(
                "You are a process flow expert. Create a detailed textual representation of the requested flow diagram or process.

Format your response as:
1. Brief overview of the process
2. Step-by-step flow with clear connections
3. Key decision points and branches
4. Important notes or considerations

Use ASCII characters, arrows (→, ↓, ↑), and clear formatting to create a visual flow.

Flow Diagram Request: {query}"
            ),
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assemble a chat request: the rendered template, prior turns as
/// user/assistant pairs, then the new message.
pub fn build_messages(
    template: PromptTemplate,
    history: &[ConversationTurn],
    message: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(Message::system(template.render(message)));

    for turn in history {
        messages.push(Message::user(turn.user.clone()));
        messages.push(Message::assistant(turn.ai.clone()));
    }

    messages.push(Message::user(message));
    messages
}

const DOCUMENT_ANALYST: &str = "You are an expert document analyzer specializing in sustainability and environmental science. Provide structured analysis with clear headings.";

/// Analysis request for extracted document text (already truncated)
pub fn document_analysis_messages(content: &str) -> Vec<Message> {
    let prompt = format!(
        "Analyze this document comprehensively and provide:

1. **Document Summary** (2-3 sentences)
2. **Key Topics** (bullet points)
3. **Sustainability & Environmental Aspects** (if any)
4. **Important Data/Metrics** (if any)
5. **Actionable Insights** (recommendations)

Document Content:
{content}"
    );

    vec![Message::system(DOCUMENT_ANALYST), Message::user(prompt)]
}
