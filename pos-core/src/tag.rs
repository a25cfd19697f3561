//! # Alfabeto de Tags e Observações
//!
//! Cada sentença é conceitualmente envolvida como `START, w1..wn, END`. As
//! sentinelas são variantes próprias de [`Tag`], então nunca colidem com uma
//! tag do corpus (mesmo que o corpus use literalmente "B" ou "E").
//!
//! ## Ordem
//!
//! `Start < End < Label(..)`, com rótulos em ordem lexicográfica. Essa ordem
//! é usada em toda iteração sobre o alfabeto, inclusive no Viterbi, para que
//! empates sejam desfeitos sempre da mesma forma.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::unknown::WordClass;

/// Estado oculto do HMM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    /// Início de sentença.
    Start,
    /// Fim de sentença.
    End,
    /// Tag POS vinda do corpus (ex: "NN", "VBZ").
    Label(String),
}

impl Tag {
    pub fn label(name: impl Into<String>) -> Self {
        Tag::Label(name.into())
    }

    /// `true` para `Start` e `End`.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Tag::Label(_))
    }

    /// Nome da tag do corpus; `None` para as sentinelas.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Tag::Label(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Start => f.write_str("<START>"),
            Tag::End => f.write_str("<END>"),
            Tag::Label(name) => f.write_str(name),
        }
    }
}

/// Identidade estatística de uma palavra.
///
/// Palavras vistas pelo menos duas vezes no treino ficam na forma literal
/// (minúscula). As singletons são absorvidas por uma [`WordClass`] de sufixo.
/// Classes nunca são reavaliadas como palavras.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Observation {
    Word(String),
    Class(WordClass),
}

impl Observation {
    /// Normaliza a palavra (minúsculas) e a embrulha como observação literal.
    pub fn word(raw: &str) -> Self {
        Observation::Word(raw.to_lowercase())
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Observation::Class(_))
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::Word(word) => f.write_str(word),
            Observation::Class(class) => f.write_str(class.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_order_puts_sentinels_first() {
        let mut tags = vec![
            Tag::label("VB"),
            Tag::End,
            Tag::label("DT"),
            Tag::Start,
            Tag::label("NN"),
        ];
        tags.sort();
        assert_eq!(
            tags,
            vec![
                Tag::Start,
                Tag::End,
                Tag::label("DT"),
                Tag::label("NN"),
                Tag::label("VB"),
            ]
        );
    }

    #[test]
    fn test_sentinels_do_not_collide_with_labels() {
        assert_ne!(Tag::label("<START>"), Tag::Start);
        assert!(Tag::Start.is_sentinel());
        assert!(!Tag::label("E").is_sentinel());
        assert_eq!(Tag::label("NN").as_label(), Some("NN"));
        assert_eq!(Tag::End.as_label(), None);
    }

    #[test]
    fn test_observation_word_is_lowercased() {
        assert_eq!(Observation::word("The"), Observation::Word("the".into()));
        assert_eq!(Observation::word("ÉPOCA").to_string(), "época");
    }
}
