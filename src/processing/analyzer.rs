//! Chat analysis engine: validation, model call and aggregation

use crate::error::{ChatAnalyzerError, Result};
use crate::nlp::LanguageModel;
use crate::processing::aggregator::AnalysisResponse;
use std::sync::Arc;
use std::time::Instant;

/// Shared entry point for the HTTP handler and the CLI
#[derive(Clone)]
pub struct ChatAnalyzer {
    model: Arc<dyn LanguageModel>,
}

impl ChatAnalyzer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Trim the input, rejecting blank text
    pub fn validate(text: &str) -> Result<&str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatAnalyzerError::empty_text());
        }
        Ok(trimmed)
    }

    pub fn analyze(&self, text: &str) -> Result<AnalysisResponse> {
        let text = Self::validate(text)?;
        let start_time = Instant::now();

        let analysis = self.model.analyze(text)?;
        log::debug!(
            "Model '{}' produced {} noun chunks, {} verbs, {} entities",
            self.model.name(),
            analysis.noun_chunks.len(),
            analysis.verbs.len(),
            analysis.entities.len()
        );

        let response = AnalysisResponse::from_analysis(&analysis);
        log::debug!(
            "Aggregated into {} nouns, {} verbs, {} entity groups in {}ms",
            response.nouns.len(),
            response.verbs.len(),
            response.entities.len(),
            start_time.elapsed().as_millis()
        );

        Ok(response)
    }
}
