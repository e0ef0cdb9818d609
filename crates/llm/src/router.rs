//! Model routing
//!
//! Maps the caller's mode and the query's classification signals to a model
//! profile and a prompt template. The router never inspects the query text.

use std::sync::Arc;

use eco_assistant_config::ModelCatalog;
use eco_assistant_core::{Mode, ModelProfile, ProfileName};
use eco_assistant_text_processing::Classification;

use crate::PromptTemplate;

/// Profile and template chosen for one chat turn
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDecision {
    pub profile: ModelProfile,
    pub template: PromptTemplate,
}

/// Pure routing table
pub fn select(mode: Mode, classification: &Classification) -> (ProfileName, PromptTemplate) {
    match mode {
        Mode::Research if classification.diagram => (ProfileName::Creative, PromptTemplate::Diagram),
        Mode::Research => (ProfileName::Research, PromptTemplate::Research),
        Mode::Basic => (ProfileName::Basic, PromptTemplate::Basic),
        Mode::Auto if classification.research => (ProfileName::Research, PromptTemplate::Research),
        Mode::Auto if classification.diagram => (ProfileName::Creative, PromptTemplate::Diagram),
        Mode::Auto => (ProfileName::Basic, PromptTemplate::Basic),
    }
}

/// Resolves routing decisions against the shared profile catalog
#[derive(Debug, Clone)]
pub struct ModelRouter {
    catalog: Arc<ModelCatalog>,
}

impl ModelRouter {
    pub fn new(catalog: Arc<ModelCatalog>) -> Self {
        Self { catalog }
    }

    pub fn route(&self, mode: Mode, classification: &Classification) -> RouteDecision {
        let (name, template) = select(mode, classification);
        RouteDecision {
            profile: self.catalog.get(name).clone(),
            template,
        }
    }
}
