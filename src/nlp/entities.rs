//! Named entity recognition: gazetteer matches plus proper-noun runs

use crate::error::{ChatAnalyzerError, Result};
use crate::nlp::lexicon::Lexicon;
use crate::nlp::{NamedEntity, PosTag, Token};
use aho_corasick::{AhoCorasick, MatchKind};

/// Label for proper-noun runs the gazetteer does not know
pub const FALLBACK_LABEL: &str = "MISC";

/// An entity located in the analyzed text (byte offsets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

pub struct EntityRecognizer {
    matcher: Option<AhoCorasick>,
    labels: Vec<String>,
}

impl EntityRecognizer {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut labels = Vec::new();

        for (label, phrases) in &lexicon.entities {
            for phrase in phrases {
                patterns.push(phrase.trim().to_lowercase());
                labels.push(label.clone());
            }
        }

        let matcher = if patterns.is_empty() {
            None
        } else {
            let ac = AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostLongest)
                .build(&patterns)
                .map_err(|e| ChatAnalyzerError::ModelLoading(format!("Invalid gazetteer: {}", e)))?;
            Some(ac)
        };

        Ok(Self { matcher, labels })
    }

    /// Locate entities, ordered by start offset
    pub fn recognize(&self, text: &str, tokens: &[Token]) -> Vec<EntitySpan> {
        let mut spans = self.gazetteer_matches(text);

        for run in proper_noun_runs(tokens) {
            let overlaps = spans.iter().any(|s| run.start < s.end && s.start < run.end);
            if !overlaps {
                spans.push(run);
            }
        }

        spans.sort_by_key(|s| s.start);
        spans
    }

    pub fn to_entities(text: &str, spans: &[EntitySpan]) -> Vec<NamedEntity> {
        spans
            .iter()
            .map(|s| NamedEntity {
                text: text[s.start..s.end].to_string(),
                label: s.label.clone(),
            })
            .collect()
    }

    fn gazetteer_matches(&self, text: &str) -> Vec<EntitySpan> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };

        let folded = CaseFolded::new(text);

        matcher
            .find_iter(folded.lowered.as_str())
            .filter_map(|m| {
                let start = folded.source_offset(m.start());
                let end = folded.source_offset(m.end());
                if !at_word_boundary(text, start, end) {
                    return None;
                }
                Some(EntitySpan {
                    start,
                    end,
                    label: self.labels[m.pattern().as_usize()].clone(),
                })
            })
            .collect()
    }
}

/// Lowercased copy of a text that remembers where each byte came from.
///
/// Lowercasing may change byte lengths, so match offsets in the copy have to
/// be mapped back before slicing the source text.
struct CaseFolded {
    lowered: String,
    /// For every byte offset in `lowered` (plus the end), the offset of the
    /// originating char in the source text
    offsets: Vec<usize>,
    source_len: usize,
}

impl CaseFolded {
    fn new(text: &str) -> Self {
        let mut lowered = String::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);

        for (idx, ch) in text.char_indices() {
            for lower in ch.to_lowercase() {
                lowered.push(lower);
                offsets.extend(std::iter::repeat(idx).take(lower.len_utf8()));
            }
        }
        offsets.push(text.len());

        Self {
            lowered,
            offsets,
            source_len: text.len(),
        }
    }

    fn source_offset(&self, lowered_offset: usize) -> usize {
        self.offsets
            .get(lowered_offset)
            .copied()
            .unwrap_or(self.source_len)
    }
}

fn at_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
}

fn proper_noun_runs(tokens: &[Token]) -> Vec<EntitySpan> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize, usize)> = None;

    for token in tokens {
        if token.pos == PosTag::Propn {
            if let Some((_, end, sentence)) = current.as_mut() {
                if *sentence == token.sentence_idx {
                    *end = token.end;
                    continue;
                }
            }
            if let Some((start, end, _)) = current.take() {
                runs.push(fallback_span(start, end));
            }
            current = Some((token.start, token.end, token.sentence_idx));
        } else if let Some((start, end, _)) = current.take() {
            runs.push(fallback_span(start, end));
        }
    }

    if let Some((start, end, _)) = current {
        runs.push(fallback_span(start, end));
    }

    runs
}

fn fallback_span(start: usize, end: usize) -> EntitySpan {
    EntitySpan {
        start,
        end,
        label: FALLBACK_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tagger::Tagger;
    use crate::nlp::tokenizer::tokenize;

    fn entities_of(text: &str) -> Vec<NamedEntity> {
        let lexicon = Lexicon::builtin().unwrap();
        let mut tokens = tokenize(text);
        Tagger::new().tag(&lexicon, &mut tokens);
        let recognizer = EntityRecognizer::new(&lexicon).unwrap();
        let spans = recognizer.recognize(text, &tokens);
        EntityRecognizer::to_entities(text, &spans)
    }

    fn entity(text: &str, label: &str) -> NamedEntity {
        NamedEntity {
            text: text.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_gazetteer_entities() {
        let entities = entities_of("Ayer viajé de Madrid a Buenos Aires con Lionel Messi");
        assert_eq!(
            entities,
            vec![
                entity("Madrid", "LOC"),
                entity("Buenos Aires", "LOC"),
                entity("Lionel Messi", "PER"),
            ]
        );
    }

    #[test]
    fn test_longest_match_wins() {
        let entities = entities_of("El Real Madrid ganó");
        assert_eq!(entities, vec![entity("Real Madrid", "ORG")]);
    }

    #[test]
    fn test_gazetteer_is_case_insensitive() {
        let entities = entities_of("vivo en españa");
        assert_eq!(entities, vec![entity("españa", "LOC")]);
    }

    #[test]
    fn test_partial_words_do_not_match() {
        let entities = entities_of("el cubano canta");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_proper_noun_run_fallback() {
        let entities = entities_of("hablé con Lucía Fernández ayer");
        assert_eq!(entities, vec![entity("Lucía Fernández", FALLBACK_LABEL)]);
    }

    #[test]
    fn test_offsets_survive_length_changing_lowercase() {
        // 'İ' lowercases to two chars, shifting every later byte offset
        let entities = entities_of("İ en Perú");
        assert!(entities.contains(&entity("Perú", "LOC")));
    }
}
