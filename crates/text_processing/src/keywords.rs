//! Image keyword extraction

use once_cell::sync::Lazy;
use regex::Regex;

static FILLER_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:professional|high-quality|illustration|image|picture|photo|of|showing|depicting)\b",
    )
    .unwrap()
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

static IMAGE_LEAD_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:generate|create|make|show)\s+(?:image|picture|photo)\s+(?:of|showing|depicting)\s*")
        .unwrap()
});

/// Terms preferred as search keywords, at most two of them per request
const PRIORITY_TERMS: &[&str] = &[
    "sustainability",
    "environment",
    "renewable",
    "solar",
    "wind",
    "mining",
    "technology",
    "green",
    "eco",
];

const MAX_KEYWORDS: usize = 3;
const MAX_PRIORITY: usize = 2;

const DEFAULT_KEYWORDS: [&str; 3] = ["sustainability", "technology", "environment"];

/// Derive 1-3 search keywords from an image prompt
pub fn extract_keywords(prompt: &str) -> Vec<String> {
    let lower = prompt.to_lowercase();
    let cleaned = FILLER_WORDS.replace_all(&lower, " ");

    let mut candidates: Vec<&str> = Vec::new();
    for word in WORD.find_iter(&cleaned).map(|m| m.as_str()) {
        if word.chars().count() > 3 && !candidates.contains(&word) {
            candidates.push(word);
        }
    }

    let mut keywords: Vec<String> = candidates
        .iter()
        .filter(|w| PRIORITY_TERMS.contains(w))
        .take(MAX_PRIORITY)
        .map(|w| w.to_string())
        .collect();

    for word in &candidates {
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }

    if keywords.is_empty() {
        DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
    } else {
        keywords
    }
}

/// Image prompt suggested for a chat message classified as an image request
pub fn image_prompt_for(message: &str) -> String {
    let lower = message.to_lowercase();
    let subject = IMAGE_LEAD_IN.replace_all(&lower, "");
    format!("Professional high-quality illustration: {}", subject)
}
