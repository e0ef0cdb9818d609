//! Model profile catalog
//!
//! Four fixed profiles keyed by [`ProfileName`]. Each one binds a model
//! identifier to its output budget and sampling temperature.

use eco_assistant_core::{ModelProfile, ProfileName};
use serde::{Deserialize, Serialize};

use crate::constants::models;
use crate::ConfigError;

/// One profile as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub identifier: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    #[serde(default)]
    pub description: String,
}

impl ProfileEntry {
    fn new(identifier: &str, max_output_tokens: u32, temperature: f32, description: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            max_output_tokens,
            temperature,
            description: description.to_string(),
        }
    }
}

/// `llm.profiles` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilesConfig {
    #[serde(default = "default_basic")]
    pub basic: ProfileEntry,
    #[serde(default = "default_research")]
    pub research: ProfileEntry,
    #[serde(default = "default_creative")]
    pub creative: ProfileEntry,
    #[serde(default = "default_technical")]
    pub technical: ProfileEntry,
}

fn default_basic() -> ProfileEntry {
    ProfileEntry::new(models::BASIC, 150, 0.5, "Quick and simple responses")
}

fn default_research() -> ProfileEntry {
    ProfileEntry::new(
        models::RESEARCH,
        800,
        0.3,
        "Deep research and comprehensive analysis",
    )
}

fn default_creative() -> ProfileEntry {
    ProfileEntry::new(models::CREATIVE, 400, 0.8, "Creative content and diagrams")
}

fn default_technical() -> ProfileEntry {
    ProfileEntry::new(
        models::TECHNICAL,
        600,
        0.2,
        "Technical explanations and code",
    )
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            basic: default_basic(),
            research: default_research(),
            creative: default_creative(),
            technical: default_technical(),
        }
    }
}

impl ProfilesConfig {
    pub fn entry(&self, name: ProfileName) -> &ProfileEntry {
        match name {
            ProfileName::Basic => &self.basic,
            ProfileName::Research => &self.research,
            ProfileName::Creative => &self.creative,
            ProfileName::Technical => &self.technical,
        }
    }

    /// Every profile needs a model, a positive budget and a temperature in [0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in ProfileName::ALL {
            let entry = self.entry(name);
            let field = |key: &str| format!("llm.profiles.{}.{}", name, key);

            if entry.identifier.trim().is_empty() {
                return Err(ConfigError::MissingField(field("identifier")));
            }
            if entry.max_output_tokens == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field("max_output_tokens"),
                    message: "Must be at least 1".to_string(),
                });
            }
            if !(0.0..=1.0).contains(&entry.temperature) {
                return Err(ConfigError::InvalidValue {
                    field: field("temperature"),
                    message: format!("Must be between 0.0 and 1.0, got {}", entry.temperature),
                });
            }
        }
        Ok(())
    }
}

/// Immutable set of the four model profiles
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    basic: ModelProfile,
    research: ModelProfile,
    creative: ModelProfile,
    technical: ModelProfile,
}

impl ModelCatalog {
    pub fn from_config(config: &ProfilesConfig) -> Self {
        let build = |name: ProfileName| {
            let entry = config.entry(name);
            ModelProfile {
                label: name,
                identifier: entry.identifier.clone(),
                max_output_tokens: entry.max_output_tokens,
                temperature: entry.temperature,
                description: entry.description.clone(),
            }
        };

        Self {
            basic: build(ProfileName::Basic),
            research: build(ProfileName::Research),
            creative: build(ProfileName::Creative),
            technical: build(ProfileName::Technical),
        }
    }

    pub fn get(&self, name: ProfileName) -> &ModelProfile {
        match name {
            ProfileName::Basic => &self.basic,
            ProfileName::Research => &self.research,
            ProfileName::Creative => &self.creative,
            ProfileName::Technical => &self.technical,
        }
    }

    /// Profiles in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ModelProfile> {
        ProfileName::ALL.into_iter().map(move |name| self.get(name))
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::from_config(&ProfilesConfig::default())
    }
}
