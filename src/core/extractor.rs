use crate::core::{MediaInfo, Playlist};
use anyhow::Result;
use async_trait::async_trait;
use url::Url;

/// Either a fully resolved media record or a playlist of deferred entries.
#[derive(Debug, Clone)]
pub enum ExtractResult {
    Media(MediaInfo),
    Playlist(Playlist),
}

/// Auxiliary metadata handed from one resolution step to the next.
///
/// An earlier step (e.g. the course resolver) may already know the playlist
/// title or description; passing it here avoids encoding it into the URL the
/// later step receives.
#[derive(Debug, Clone, Default)]
pub struct ExtractContext {
    pub title: Option<String>,
    pub display_id: Option<String>,
    pub description: Option<String>,
    /// Unix epoch seconds.
    pub timestamp: Option<i64>,
}

#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn suitable(&self, url: &Url) -> bool;
    async fn extract(&self, url: &Url, ctx: &ExtractContext) -> Result<ExtractResult>;
}

pub struct ExtractorEngine {
    pub extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorEngine {
    pub fn new() -> Self {
        Self { extractors: Vec::new() }
    }

    pub fn register_extractor(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    pub async fn extract(&self, url: &str) -> Result<ExtractResult> {
        self.extract_with_context(url, &ExtractContext::default()).await
    }

    pub async fn extract_with_context(
        &self,
        url: &str,
        ctx: &ExtractContext,
    ) -> Result<ExtractResult> {
        let parsed_url = Url::parse(url)?;

        for extractor in &self.extractors {
            if extractor.suitable(&parsed_url) {
                tracing::debug!("Dispatching {} to {}", url, extractor.name());
                return extractor.extract(&parsed_url, ctx).await;
            }
        }

        anyhow::bail!("No suitable extractor found for URL: {}", url);
    }
}

impl Default for ExtractorEngine {
    fn default() -> Self {
        Self::new()
    }
}
