//! Image lookup
//!
//! There is no generation backend: an image is "found" by probing an ordered
//! list of stock-photo URLs and returning the first one that answers 2xx.

use std::time::Duration;

use async_trait::async_trait;
use eco_assistant_config::ImagesConfig;
use eco_assistant_core::{ImageReference, ImageSource};
use reqwest::Client;

use crate::PipelineError;

/// Candidate URL bases and probe timeout
#[derive(Debug, Clone)]
pub struct ImageSourceConfig {
    /// Keyword search base; keywords are appended as `?k1,k2`
    pub unsplash_url: String,
    /// Random photo base; a `?random=<unix seconds>` cache-buster is appended
    pub picsum_url: String,
    /// Static last resort
    pub placeholder_url: String,
    pub probe_timeout: Duration,
}

impl Default for ImageSourceConfig {
    fn default() -> Self {
        Self::from_settings(&ImagesConfig::default())
    }
}

impl ImageSourceConfig {
    pub fn from_settings(settings: &ImagesConfig) -> Self {
        Self {
            unsplash_url: settings.unsplash_url.clone(),
            picsum_url: settings.picsum_url.clone(),
            placeholder_url: settings.placeholder_url.clone(),
            probe_timeout: Duration::from_millis(settings.probe_timeout_ms),
        }
    }

    /// Candidate URLs in probe order
    pub fn candidate_urls(&self, keywords: &[String], unix_seconds: i64) -> Vec<String> {
        vec![
            format!("{}?{}", self.unsplash_url, keywords.join(",")),
            format!("{}?random={}", self.picsum_url, unix_seconds),
            self.placeholder_url.clone(),
        ]
    }
}

/// `ImageSource` that probes candidate URLs in order
pub struct ProbingImageSource {
    config: ImageSourceConfig,
    client: Client,
}

impl ProbingImageSource {
    pub fn new(config: ImageSourceConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(config.probe_timeout)
            .build()
            .map_err(|e| PipelineError::Image(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::debug!(url, status = %response.status(), "Image candidate rejected");
                false
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "Image candidate unreachable");
                false
            }
        }
    }
}

#[async_trait]
impl ImageSource for ProbingImageSource {
    async fn find_image(&self, keywords: &[String]) -> eco_assistant_core::Result<ImageReference> {
        let now = chrono::Utc::now().timestamp();

        for (index, url) in self.config.candidate_urls(keywords, now).into_iter().enumerate() {
            if self.probe(&url).await {
                let source = if index == 0 { "unsplash" } else { "fallback" };
                tracing::info!(source, url = %url, "Image found");
                return Ok(ImageReference {
                    url,
                    source: source.to_string(),
                });
            }
        }

        Err(PipelineError::Image("Image generation temporarily unavailable".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config_for(base: &str) -> ImageSourceConfig {
        ImageSourceConfig {
            unsplash_url: format!("{}/unsplash/", base),
            picsum_url: format!("{}/picsum", base),
            placeholder_url: format!("{}/placeholder", base),
            probe_timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_candidate_urls() {
        let config = ImageSourceConfig::default();
        let urls = config.candidate_urls(&["solar".to_string(), "wind".to_string()], 1_700_000_000);
        assert_eq!(urls[0], "https://source.unsplash.com/1024x768/?solar,wind");
        assert_eq!(urls[1], "https://picsum.photos/1024/768?random=1700000000");
        assert_eq!(urls.len(), 3);
    }

    #[tokio::test]
    async fn test_first_success_is_unsplash() {
        let base = serve(Router::new().route("/unsplash/", get(|| async { "img" }))).await;
        let source = ProbingImageSource::new(config_for(&base)).unwrap();

        let image = source.find_image(&["green".to_string()]).await.unwrap();
        assert_eq!(image.source, "unsplash");
        assert!(image.url.ends_with("/unsplash/?green"));
    }

    #[tokio::test]
    async fn test_falls_back_in_order() {
        let router = Router::new()
            .route("/unsplash/", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route("/picsum", get(|| async { StatusCode::NOT_FOUND }))
            .route("/placeholder", get(|| async { "ok" }));
        let base = serve(router).await;
        let source = ProbingImageSource::new(config_for(&base)).unwrap();

        let image = source.find_image(&["eco".to_string()]).await.unwrap();
        assert_eq!(image.source, "fallback");
        assert_eq!(image.url, format!("{}/placeholder", base));
    }

    #[tokio::test]
    async fn test_all_candidates_failing() {
        let base = serve(Router::new()).await;
        let source = ProbingImageSource::new(config_for(&base)).unwrap();

        let err = source.find_image(&["eco".to_string()]).await.unwrap_err();
        assert!(matches!(err, eco_assistant_core::Error::Image(_)));
    }
}
