use async_trait::async_trait;

use crate::lifecycle::MaterialInput;

/// Source of material substitution suggestions (an LLM, a product
/// database, a remote service).
///
/// Implementations return raw text; the cache parses it with
/// [`super::OptimizationReport::parse`] and falls back to the local report
/// on any error.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn suggest_alternatives(&self, materials: &[MaterialInput]) -> anyhow::Result<String>;
}
