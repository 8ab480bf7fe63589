//! Part-of-speech tagging and lemmatization driven by the lexicon

use crate::nlp::lexicon::Lexicon;
use crate::nlp::tokenizer::is_word;
use crate::nlp::{PosTag, Token};
use regex::Regex;

pub struct Tagger {
    number_regex: Regex,
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger {
    pub fn new() -> Self {
        let number_regex = Regex::new(r"^\d+(?:[.,]\d+)*$").expect("Invalid number regex");
        Self { number_regex }
    }

    /// Assign POS tags and lemmas in place
    pub fn tag(&self, lexicon: &Lexicon, tokens: &mut [Token]) {
        let mut current_sentence = None;

        for token in tokens.iter_mut() {
            let sentence_start = current_sentence != Some(token.sentence_idx) && is_word(&token.text);
            if sentence_start {
                current_sentence = Some(token.sentence_idx);
            }

            let (pos, lemma) = self.tag_token(lexicon, &token.text, sentence_start);
            token.pos = pos;
            token.lemma = lemma;
        }
    }

    fn tag_token(&self, lexicon: &Lexicon, text: &str, sentence_start: bool) -> (PosTag, String) {
        if !is_word(text) {
            return (PosTag::Punct, text.to_string());
        }

        if self.number_regex.is_match(text) {
            return (PosTag::Num, text.to_string());
        }

        if let Some(entry) = lexicon.lookup(text) {
            return (entry.pos, entry.lemma.clone());
        }

        let capitalized = text.chars().next().map_or(false, char::is_uppercase);
        if capitalized && !sentence_start {
            return (PosTag::Propn, text.to_string());
        }

        let lowered = text.to_lowercase();
        if let Some(lemma) = lexicon.verb_lemma(&lowered) {
            return (PosTag::Verb, lemma);
        }

        if capitalized {
            return (PosTag::Propn, text.to_string());
        }

        (PosTag::Noun, lowered)
    }
}
