//! Image lookup trait

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A reachable image URL and the source that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub url: String,
    /// `unsplash` or `fallback`
    pub source: String,
}

/// Keyword-driven image lookup
#[async_trait]
pub trait ImageSource: Send + Sync + 'static {
    /// Find an image for the keywords. Fails only when no candidate is reachable.
    async fn find_image(&self, keywords: &[String]) -> Result<ImageReference>;
}
