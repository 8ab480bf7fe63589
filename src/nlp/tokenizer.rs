//! Word-boundary tokenization with sentence tracking

use crate::nlp::{PosTag, Token};
use unicode_segmentation::UnicodeSegmentation;

const SENTENCE_TERMINATORS: &[&str] = &[".", "!", "?", "…"];

/// Split text into tokens, dropping whitespace.
///
/// Tokens come back untagged (`PosTag::X`, lemma equal to the surface form);
/// the tagger fills those in.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut sentence_idx = 0;

    for (start, piece) in text.split_word_bound_indices() {
        if piece.trim().is_empty() {
            continue;
        }

        tokens.push(Token {
            text: piece.to_string(),
            lemma: piece.to_string(),
            pos: PosTag::X,
            start,
            end: start + piece.len(),
            token_idx: tokens.len(),
            sentence_idx,
        });

        if SENTENCE_TERMINATORS.contains(&piece) {
            sentence_idx += 1;
        }
    }

    tokens
}

/// True when the token contains at least one letter or digit
pub fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}
