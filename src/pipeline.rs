use tracing::{info, warn};
use uuid::Uuid;

use crate::llm::ModelGateway;
use crate::models::{ExtractionRequest, PipelineResult, TagVocabulary};
use crate::tasks::{
    extract_fact_checks, extract_quotes, extract_summary, extract_tags, extract_takeaways,
};

/// Orchestrates one extraction run: fans the five tasks out concurrently
/// over the shared gateway and aggregates their outputs.
///
/// Tasks are independent; a failed task logs and contributes its empty
/// default instead of failing the run. Only input validation (upstream, in
/// the handler) can reject a request outright.
pub struct Pipeline {
    gateway: ModelGateway,
    vocabulary: TagVocabulary,
}

impl Pipeline {
    pub fn new(gateway: ModelGateway, vocabulary: TagVocabulary) -> Self {
        Self {
            gateway,
            vocabulary,
        }
    }

    pub async fn run(&self, request: &ExtractionRequest) -> PipelineResult {
        let run_id = Uuid::new_v4();
        let transcript = &request.transcript;

        info!(
            %run_id,
            episode = %transcript.episode_id,
            takeaways = request.takeaway_count,
            quotes = request.quote_count,
            "starting extraction pipeline"
        );

        let (summary, take_aways, quotes, tags, fact_checks) = tokio::join!(
            extract_summary(&self.gateway, transcript),
            extract_takeaways(&self.gateway, transcript, request.takeaway_count),
            extract_quotes(&self.gateway, transcript, request.quote_count),
            extract_tags(&self.gateway, transcript, &self.vocabulary),
            extract_fact_checks(&self.gateway, transcript),
        );

        let result = PipelineResult {
            summary: summary.unwrap_or_else(|e| {
                warn!(%run_id, error = %e, "summary task failed");
                String::new()
            }),
            take_aways: take_aways.unwrap_or_else(|e| {
                warn!(%run_id, error = %e, "takeaways task failed");
                Vec::new()
            }),
            quotes: quotes.unwrap_or_else(|e| {
                warn!(%run_id, error = %e, "quotes task failed");
                Vec::new()
            }),
            tags: tags.unwrap_or_else(|e| {
                warn!(%run_id, error = %e, "tags task failed");
                Vec::new()
            }),
            fact_checks: fact_checks.unwrap_or_else(|e| {
                warn!(%run_id, error = %e, "fact-check task failed");
                Vec::new()
            }),
        };

        info!(
            %run_id,
            takeaways = result.take_aways.len(),
            quotes = result.quotes.len(),
            tags = result.tags.len(),
            fact_checks = result.fact_checks.len(),
            "extraction pipeline completed"
        );

        result
    }
}
