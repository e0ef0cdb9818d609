//! Content classification
//!
//! One keyword scan over the lowercased query yields three independent
//! signals. The label is derived from the signals by fixed priority; the
//! router reads the signals directly, so no other component keeps its own
//! keyword list.

use eco_assistant_core::ContentType;
use serde::{Deserialize, Serialize};

const IMAGE_KEYWORDS: &[&str] = &[
    "image", "picture", "photo", "visual", "generate", "create", "draw",
];

const DIAGRAM_KEYWORDS: &[&str] = &["flow", "diagram", "flowchart", "process map", "workflow"];

const RESEARCH_KEYWORDS: &[&str] = &[
    "research",
    "analyze",
    "detailed",
    "comprehensive",
    "in-depth",
    "explain in detail",
    "analyze thoroughly",
];

/// Keyword signals detected in a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub image: bool,
    pub diagram: bool,
    pub research: bool,
}

impl Classification {
    /// Image wins over diagram, diagram over research
    pub fn label(&self) -> ContentType {
        if self.image {
            ContentType::Image
        } else if self.diagram {
            ContentType::Diagram
        } else if self.research {
            ContentType::Research
        } else {
            ContentType::General
        }
    }
}

/// Classify a raw query. Matching is case-insensitive substring search.
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    Classification {
        image: contains_any(IMAGE_KEYWORDS),
        diagram: contains_any(DIAGRAM_KEYWORDS),
        research: contains_any(RESEARCH_KEYWORDS),
    }
}
