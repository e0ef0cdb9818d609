//! Named model profiles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the fixed profile set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    Basic,
    Research,
    Creative,
    Technical,
}

impl ProfileName {
    pub const ALL: [ProfileName; 4] = [
        ProfileName::Basic,
        ProfileName::Research,
        ProfileName::Creative,
        ProfileName::Technical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileName::Basic => "basic",
            ProfileName::Research => "research",
            ProfileName::Creative => "creative",
            ProfileName::Technical => "technical",
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model identifier, token budget and temperature under a profile name.
///
/// Built once at startup and shared read-only; the budget and temperature
/// are never overridden per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub label: ProfileName,
    pub identifier: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub description: String,
}
