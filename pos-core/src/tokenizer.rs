//! # Tokenizador de Texto Livre
//!
//! Usado quando a entrada não vem no formato de uma palavra por linha (ex: o
//! endpoint `/tag` do servidor web). Segue as fronteiras de palavra e de
//! sentença do Unicode (UAX #29):
//!
//! - espaços são descartados;
//! - pontuação vira token próprio (`"runs."` -> `"runs"`, `"."`);
//! - contrações e números ficam inteiros (`"don't"`, `"3.14"`).
//!
//! Cada token guarda o offset em bytes no texto original.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Posição do token dentro da sua sentença.
    pub index: usize,
}

/// Tokeniza o texto inteiro como uma única sequência.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_at(text, 0)
}

/// Divide o texto em sentenças e tokeniza cada uma.
pub fn tokenize_sentences(text: &str) -> Vec<Vec<Token>> {
    text.split_sentence_bound_indices()
        .map(|(offset, sentence)| tokenize_at(sentence, offset))
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

fn tokenize_at(text: &str, offset: usize) -> Vec<Token> {
    text.split_word_bound_indices()
        .filter(|(_, piece)| !piece.trim().is_empty())
        .enumerate()
        .map(|(index, (start, piece))| Token {
            text: piece.to_string(),
            start: offset + start,
            end: offset + start + piece.len(),
            index,
        })
        .collect()
}
