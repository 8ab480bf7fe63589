//! Lexicon-driven language model

use crate::error::Result;
use crate::nlp::chunker::{chunk_text, extract_chunks};
use crate::nlp::entities::EntityRecognizer;
use crate::nlp::lexicon::Lexicon;
use crate::nlp::tagger::Tagger;
use crate::nlp::tokenizer::tokenize;
use crate::nlp::{Analysis, LanguageModel, PosTag, Token};
use std::path::Path;

/// Deterministic Spanish pipeline: tokenizer, tagger, noun chunker and
/// entity recognizer sharing one lexicon
pub struct LexiconModel {
    lexicon: Lexicon,
    tagger: Tagger,
    recognizer: EntityRecognizer,
}

impl LexiconModel {
    pub fn new(lexicon: Lexicon) -> Result<Self> {
        let recognizer = EntityRecognizer::new(&lexicon)?;

        log::debug!(
            "Lexicon '{}' ({}): {} words, {} suffix rules, {} gazetteer phrases",
            lexicon.name,
            lexicon.language,
            lexicon.words.len(),
            lexicon.verb_suffixes.len(),
            lexicon.gazetteer_size()
        );

        Ok(Self {
            lexicon,
            tagger: Tagger::new(),
            recognizer,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(Lexicon::builtin()?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        log::info!("Loading lexicon from {}", path.display());
        Self::new(Lexicon::from_path(path)?)
    }

    /// Tokenize and tag without building the aggregated view
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        let mut tokens = tokenize(text);
        self.tagger.tag(&self.lexicon, &mut tokens);
        tokens
    }

    pub fn language(&self) -> &str {
        &self.lexicon.language
    }
}

impl LanguageModel for LexiconModel {
    fn name(&self) -> &str {
        &self.lexicon.name
    }

    fn analyze(&self, text: &str) -> Result<Analysis> {
        let tokens = self.tokens(text);

        let noun_chunks = extract_chunks(&tokens)
            .iter()
            .map(|chunk| chunk_text(text, &tokens, chunk).to_string())
            .collect();

        let verbs = tokens
            .iter()
            .filter(|t| t.pos == PosTag::Verb)
            .map(|t| t.lemma.clone())
            .collect();

        let spans = self.recognizer.recognize(text, &tokens);
        let entities = EntityRecognizer::to_entities(text, &spans);

        Ok(Analysis {
            noun_chunks,
            verbs,
            entities,
        })
    }
}
