//! Language model abstraction and the default lexicon pipeline
//!
//! Pipeline: text → tokens → POS tags and lemmas → noun chunks + entities

pub mod chunker;
pub mod entities;
pub mod lexicon;
pub mod model;
pub mod tagger;
pub mod tokenizer;

use crate::config::ModelConfig;
use crate::error::{ChatAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use model::LexiconModel;

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Noun,
    Num,
    Pron,
    Propn,
    Punct,
    Sconj,
    Verb,
    X,
}

impl PosTag {
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }
}

/// A token produced by the tokenizer and annotated by the tagger
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    /// Byte offsets into the analyzed text
    pub start: usize,
    pub end: usize,
    pub token_idx: usize,
    pub sentence_idx: usize,
}

/// A named entity span with its category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    pub label: String,
}

/// Raw model output consumed by the aggregator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub noun_chunks: Vec<String>,
    /// Lemmas of tokens tagged VERB, in text order
    pub verbs: Vec<String>,
    pub entities: Vec<NamedEntity>,
}

/// A loaded language model. Implementations are read-only after construction.
pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &str;

    fn analyze(&self, text: &str) -> Result<Analysis>;
}

/// Load the configured model once for the lifetime of the process
pub fn load_model(config: &ModelConfig) -> Result<Arc<dyn LanguageModel>> {
    let model = match &config.path {
        Some(path) => LexiconModel::from_path(path)?,
        None => LexiconModel::builtin()?,
    };

    if let Some(expected) = &config.name {
        if expected != model.name() {
            return Err(ChatAnalyzerError::ModelLoading(format!(
                "expected model '{}', loaded '{}'",
                expected,
                model.name()
            )));
        }
    }

    log::info!("Loaded language model '{}' ({})", model.name(), model.language());
    Ok(Arc::new(model))
}
