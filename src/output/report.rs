//! Report structures for offline analysis runs

use crate::processing::AnalysisResponse;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Aggregated analysis plus the context it was produced in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    /// Same shape as the `data` field of the HTTP API
    pub data: AnalysisResponse,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    /// Version of the analyzer used
    pub analyzer_version: String,

    pub model: String,

    /// Characters in the trimmed input
    pub text_characters: usize,

    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub distinct_nouns: usize,
    pub distinct_verbs: usize,
    pub entity_groups: usize,
    pub total_entities: usize,
    pub top_noun: Option<String>,
    pub top_verb: Option<String>,
}

impl AnalysisReport {
    pub fn new(text: &str, model: &str, data: AnalysisResponse, processing_time_ms: u64) -> Self {
        let summary = ReportSummary {
            distinct_nouns: data.nouns.len(),
            distinct_verbs: data.verbs.len(),
            entity_groups: data.entities.len(),
            total_entities: data.entities.iter().map(|e| e.count).sum(),
            top_noun: data.nouns.first().map(|n| n.noun.clone()),
            top_verb: data.verbs.first().map(|v| v.verb.clone()),
        };

        Self {
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                model: model.to_string(),
                text_characters: text.trim().chars().count(),
                processing_time_ms,
            },
            summary,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{EntityAggregate, NounAggregate, VerbAggregate};

    #[test]
    fn test_summary_from_aggregates() {
        let data = AnalysisResponse {
            nouns: vec![
                NounAggregate { noun: "casa".to_string(), count: 2 },
                NounAggregate { noun: "perro".to_string(), count: 1 },
            ],
            verbs: vec![VerbAggregate { verb: "correr".to_string(), count: 1 }],
            entities: vec![EntityAggregate {
                entity: "LOC".to_string(),
                count: 2,
                texts: vec!["lima".to_string(), "quito".to_string()],
            }],
        };

        let report = AnalysisReport::new("  hola mundo ", "es_core_lexicon", data, 3);
        assert_eq!(report.metadata.text_characters, 10);
        assert_eq!(report.summary.distinct_nouns, 2);
        assert_eq!(report.summary.total_entities, 2);
        assert_eq!(report.summary.top_noun.as_deref(), Some("casa"));
        assert_eq!(report.summary.top_verb.as_deref(), Some("correr"));
    }
}
