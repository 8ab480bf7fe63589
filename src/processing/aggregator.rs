//! Grouping and counting of model output into sorted aggregates

use crate::nlp::{Analysis, NamedEntity};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounAggregate {
    pub noun: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbAggregate {
    pub verb: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAggregate {
    pub entity: String,
    pub count: usize,
    /// Lowercased surface texts, kept sorted; duplicates are retained
    pub texts: Vec<String>,
}

impl EntityAggregate {
    fn new(label: &str) -> Self {
        Self {
            entity: label.to_string(),
            count: 0,
            texts: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        let text = text.to_lowercase();
        let idx = self.texts.partition_point(|existing| existing <= &text);
        self.texts.insert(idx, text);
        self.count += 1;
    }
}

/// Aggregated view returned to callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub nouns: Vec<NounAggregate>,
    pub verbs: Vec<VerbAggregate>,
    pub entities: Vec<EntityAggregate>,
}

impl AnalysisResponse {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            nouns: aggregate_nouns(&analysis.noun_chunks),
            verbs: aggregate_verbs(&analysis.verbs),
            entities: aggregate_entities(&analysis.entities),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty() && self.verbs.is_empty() && self.entities.is_empty()
    }
}

pub fn aggregate_nouns<S: AsRef<str>>(chunks: &[S]) -> Vec<NounAggregate> {
    count_lowercased(chunks)
        .into_iter()
        .map(|(noun, count)| NounAggregate { noun, count })
        .collect()
}

pub fn aggregate_verbs<S: AsRef<str>>(lemmas: &[S]) -> Vec<VerbAggregate> {
    count_lowercased(lemmas)
        .into_iter()
        .map(|(verb, count)| VerbAggregate { verb, count })
        .collect()
}

pub fn aggregate_entities(entities: &[NamedEntity]) -> Vec<EntityAggregate> {
    let mut groups: IndexMap<&str, EntityAggregate> = IndexMap::new();

    for entity in entities {
        groups
            .entry(entity.label.as_str())
            .or_insert_with(|| EntityAggregate::new(&entity.label))
            .push(&entity.text);
    }

    let mut aggregates: Vec<EntityAggregate> = groups.into_values().collect();
    // Stable: equal counts keep first-seen order
    aggregates.sort_by(|a, b| b.count.cmp(&a.count));
    aggregates
}

/// Count values by lowercased key, most frequent first, ties in first-seen order
fn count_lowercased<S: AsRef<str>>(values: &[S]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for value in values {
        *counts.entry(value.as_ref().to_lowercase()).or_insert(0) += 1;
    }

    let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    ordered
}
