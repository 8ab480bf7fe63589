//! Noun chunk detection
//!
//! Pattern: (DET)? (ADJ)* (NOUN|PROPN)+ (ADJ)*
//! Trailing adjectives cover Spanish post-nominal modifiers ("la casa blanca").

use crate::nlp::{PosTag, Token};

/// Token range of a noun chunk, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    pub start_token: usize,
    pub end_token: usize,
}

/// Extract noun chunks from tagged tokens, never crossing a sentence boundary
pub fn extract_chunks(tokens: &[Token]) -> Vec<ChunkSpan> {
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match match_noun_phrase(tokens, i) {
            Some(span) => {
                i = span.end_token;
                chunks.push(span);
            }
            None => i += 1,
        }
    }

    chunks
}

fn match_noun_phrase(tokens: &[Token], start: usize) -> Option<ChunkSpan> {
    let sentence = tokens[start].sentence_idx;
    let pos_at = |idx: usize| -> Option<PosTag> {
        tokens
            .get(idx)
            .filter(|t| t.sentence_idx == sentence)
            .map(|t| t.pos)
    };

    let mut end = start;

    if pos_at(end) == Some(PosTag::Det) {
        end += 1;
    }

    while pos_at(end) == Some(PosTag::Adj) {
        end += 1;
    }

    let noun_start = end;
    while pos_at(end).map_or(false, |pos| pos.is_noun()) {
        end += 1;
    }

    // Must have at least one noun
    if end == noun_start {
        return None;
    }

    while pos_at(end) == Some(PosTag::Adj) {
        end += 1;
    }

    Some(ChunkSpan {
        start_token: start,
        end_token: end,
    })
}

/// Surface text of a chunk, sliced from the analyzed text
pub fn chunk_text<'a>(text: &'a str, tokens: &[Token], chunk: &ChunkSpan) -> &'a str {
    let first = &tokens[chunk.start_token];
    let last = &tokens[chunk.end_token - 1];
    &text[first.start..last.end]
}
