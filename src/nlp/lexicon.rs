//! Lexicon model files: word forms, verb suffix rules and entity gazetteers

use crate::error::{ChatAnalyzerError, Result};
use crate::nlp::PosTag;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// The Spanish lexicon compiled into the binary
const BUILTIN_LEXICON: &str = include_str!("../../models/es_core_lexicon.json");

/// A single lexicon entry for a word form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub pos: PosTag,
    pub lemma: String,
}

/// Rewrites an inflected verb form into its infinitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub name: String,
    pub language: String,
    /// Lowercased word form to entry
    pub words: HashMap<String, WordEntry>,
    #[serde(default)]
    pub verb_suffixes: Vec<SuffixRule>,
    /// Entity label to gazetteer phrases
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<String>>,
    /// Lemmas of every VERB entry; suffix rewrites must land on one of these
    #[serde(skip)]
    verb_lemmas: HashSet<String>,
}

impl Lexicon {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEXICON)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChatAnalyzerError::ModelLoading(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut lexicon: Lexicon = serde_json::from_str(content)
            .map_err(|e| ChatAnalyzerError::ModelLoading(format!("Invalid lexicon: {}", e)))?;

        if lexicon.words.is_empty() {
            return Err(ChatAnalyzerError::ModelLoading(format!(
                "Lexicon '{}' has no word entries",
                lexicon.name
            )));
        }

        lexicon.normalize();
        Ok(lexicon)
    }

    /// Look up a word form, case-insensitively
    pub fn lookup(&self, form: &str) -> Option<&WordEntry> {
        self.words.get(&form.to_lowercase())
    }

    /// Apply the first (longest) suffix rule whose rewrite is a known verb.
    /// Rules sharing a suffix are tried in file order.
    pub fn verb_lemma(&self, lowered: &str) -> Option<String> {
        self.verb_suffixes.iter().find_map(|rule| {
            let stem = lowered.strip_suffix(rule.suffix.as_str())?;
            if stem.chars().count() < 2 {
                return None;
            }
            let lemma = format!("{}{}", stem, rule.replacement);
            self.verb_lemmas.contains(&lemma).then_some(lemma)
        })
    }

    pub fn gazetteer_size(&self) -> usize {
        self.entities.values().map(Vec::len).sum()
    }

    fn normalize(&mut self) {
        self.words = std::mem::take(&mut self.words)
            .into_iter()
            .map(|(form, entry)| (form.to_lowercase(), entry))
            .collect();

        self.verb_lemmas = self
            .words
            .values()
            .filter(|entry| entry.pos == PosTag::Verb)
            .map(|entry| entry.lemma.to_lowercase())
            .collect();

        self.verb_suffixes
            .sort_by(|a, b| b.suffix.chars().count().cmp(&a.suffix.chars().count()));

        for phrases in self.entities.values_mut() {
            phrases.retain(|p| !p.trim().is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_LEXICON: &str = r#"{
        "name": "tiny",
        "language": "es",
        "words": {
            "Perro": {"pos": "NOUN", "lemma": "perro"},
            "corre": {"pos": "VERB", "lemma": "correr"},
            "canta": {"pos": "VERB", "lemma": "cantar"},
            "vive": {"pos": "VERB", "lemma": "vivir"}
        },
        "verb_suffixes": [
            {"suffix": "ar", "replacement": "ar"},
            {"suffix": "ando", "replacement": "ar"},
            {"suffix": "iendo", "replacement": "er"},
            {"suffix": "iendo", "replacement": "ir"}
        ],
        "entities": {"LOC": ["Madrid", "  "]}
    }"#;

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(lexicon.language, "es");
        assert!(lexicon.lookup("perro").is_some());
        assert!(lexicon.gazetteer_size() > 0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        let entry = lexicon.lookup("PERRO").unwrap();
        assert_eq!(entry.pos, PosTag::Noun);
        assert_eq!(entry.lemma, "perro");
    }

    #[test]
    fn test_suffix_rules_longest_first() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        assert_eq!(lexicon.verb_suffixes[0].suffix, "iendo");
        assert_eq!(lexicon.verb_suffixes[1].replacement, "ir");
        assert_eq!(lexicon.verb_lemma("cantando"), Some("cantar".to_string()));
        assert_eq!(lexicon.verb_lemma("cantar"), Some("cantar".to_string()));
        // Stem too short
        assert_eq!(lexicon.verb_lemma("mar"), None);
    }

    #[test]
    fn test_suffix_rewrite_requires_known_verb() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        // "viver" is not a verb, so the -ir rule for the same suffix applies
        assert_eq!(lexicon.verb_lemma("viviendo"), Some("vivir".to_string()));
        assert_eq!(lexicon.verb_lemma("hogar"), None);
        assert_eq!(lexicon.verb_lemma("bailar"), None);
    }

    #[test]
    fn test_blank_gazetteer_entries_dropped() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        assert_eq!(lexicon.gazetteer_size(), 1);
    }

    #[test]
    fn test_empty_lexicon_rejected() {
        let result = Lexicon::from_json(r#"{"name": "empty", "language": "es", "words": {}}"#);
        assert!(matches!(result, Err(ChatAnalyzerError::ModelLoading(_))));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = Lexicon::from_json("not json");
        assert!(matches!(result, Err(ChatAnalyzerError::ModelLoading(_))));
    }
}
