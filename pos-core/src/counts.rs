//! # Coleta de Estatísticas do Corpus
//!
//! Primeira etapa do treino. Percorre as sentenças anotadas uma única vez e
//! acumula quatro tabelas de contagem:
//!
//! | Tabela            | Chave                  | Conteúdo                                  |
//! |-------------------|------------------------|-------------------------------------------|
//! | `tag_marginal`    | `Tag`                  | ocorrências da tag (inclui `START`/`END`)  |
//! | `tag_bigram`      | `(Tag, Tag)`           | transições ordenadas entre tags            |
//! | `word_marginal`   | `Observation`          | ocorrências da palavra (minúscula)         |
//! | `word_tag_joint`  | `(Observation, Tag)`   | palavra emitida pela tag                   |
//!
//! Cada sentença contribui com exatamente uma transição terminando em `END`,
//! e a cadeia de transições forma um caminho `START -> ... -> END` de
//! comprimento `n + 1`.
//!
//! O acumulador é um objeto explícito ([`StatisticsCollector`]); não há
//! estado global e as contagens são descartadas depois da estimação.

use std::collections::{BTreeSet, HashMap};

use crate::corpus::AnnotatedSentence;
use crate::tag::{Observation, Tag};

/// Contagens brutas do corpus. Leitura com zero como padrão para chaves ausentes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counts {
    pub(crate) tag_marginal: HashMap<Tag, u64>,
    pub(crate) tag_bigram: HashMap<(Tag, Tag), u64>,
    pub(crate) word_marginal: HashMap<Observation, u64>,
    pub(crate) word_tag_joint: HashMap<(Observation, Tag), u64>,
}

impl Counts {
    /// Coleta as contagens de um corpus completo de uma vez.
    pub fn collect(corpus: &[AnnotatedSentence]) -> Self {
        let mut collector = StatisticsCollector::new();
        for sentence in corpus {
            collector.observe(&sentence.annotations);
        }
        collector.finish()
    }

    pub fn tag_count(&self, tag: &Tag) -> u64 {
        self.tag_marginal.get(tag).copied().unwrap_or(0)
    }

    pub fn bigram_count(&self, prev: &Tag, next: &Tag) -> u64 {
        self.tag_bigram
            .get(&(prev.clone(), next.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn word_count(&self, word: &Observation) -> u64 {
        self.word_marginal.get(word).copied().unwrap_or(0)
    }

    pub fn joint_count(&self, word: &Observation, tag: &Tag) -> u64 {
        self.word_tag_joint
            .get(&(word.clone(), tag.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Alfabeto de tags observado, em ordem determinística.
    pub fn tags(&self) -> BTreeSet<Tag> {
        self.tag_marginal.keys().cloned().collect()
    }

    /// Vocabulário observado (palavras e classes), em ordem determinística.
    pub fn observations(&self) -> BTreeSet<Observation> {
        self.word_marginal.keys().cloned().collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.word_marginal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_marginal.is_empty()
    }
}

/// Acumulador do treino: recebe sentenças uma a uma e produz [`Counts`].
#[derive(Debug, Default)]
pub struct StatisticsCollector {
    counts: Counts,
    sentences: usize,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acumula uma sentença de pares (palavra, tag).
    ///
    /// A palavra é convertida para minúsculas antes de ser contada. A sentença
    /// é envolvida pelas sentinelas: `START` é contado uma vez e a última tag
    /// transita para `END`.
    pub fn observe<W: AsRef<str>, T: AsRef<str>>(&mut self, sentence: &[(W, T)]) {
        let counts = &mut self.counts;
        *counts.tag_marginal.entry(Tag::Start).or_insert(0) += 1;

        let mut last_tag = Tag::Start;
        for (word, tag) in sentence {
            let tag = Tag::label(tag.as_ref());
            let word = Observation::word(word.as_ref());

            *counts.tag_marginal.entry(tag.clone()).or_insert(0) += 1;
            *counts
                .tag_bigram
                .entry((last_tag, tag.clone()))
                .or_insert(0) += 1;
            *counts.word_marginal.entry(word.clone()).or_insert(0) += 1;
            *counts
                .word_tag_joint
                .entry((word, tag.clone()))
                .or_insert(0) += 1;

            last_tag = tag;
        }

        *counts.tag_bigram.entry((last_tag, Tag::End)).or_insert(0) += 1;
        *counts.tag_marginal.entry(Tag::End).or_insert(0) += 1;
        self.sentences += 1;
    }

    /// Número de sentenças acumuladas até agora.
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    pub fn finish(self) -> Counts {
        tracing::debug!(
            sentences = self.sentences,
            words = self.counts.vocabulary_size(),
            "statistics collected"
        );
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(sentences: &[&[(&str, &str)]]) -> Counts {
        let mut collector = StatisticsCollector::new();
        for s in sentences {
            collector.observe(s);
        }
        collector.finish()
    }

    #[test]
    fn test_single_sentence_counts() {
        let counts = counts_of(&[&[("the", "DT"), ("dog", "NN"), ("runs", "VBZ")]]);

        let expected: HashMap<Tag, u64> = [
            (Tag::Start, 1),
            (Tag::label("DT"), 1),
            (Tag::label("NN"), 1),
            (Tag::label("VBZ"), 1),
            (Tag::End, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(counts.tag_marginal, expected);

        assert_eq!(counts.tag_bigram.len(), 4);
        assert_eq!(counts.bigram_count(&Tag::Start, &Tag::label("DT")), 1);
        assert_eq!(counts.bigram_count(&Tag::label("DT"), &Tag::label("NN")), 1);
        assert_eq!(counts.bigram_count(&Tag::label("NN"), &Tag::label("VBZ")), 1);
        assert_eq!(counts.bigram_count(&Tag::label("VBZ"), &Tag::End), 1);
    }

    #[test]
    fn test_words_are_lowercased() {
        let counts = counts_of(&[&[("The", "DT"), ("dog", "NN")], &[("the", "DT")]]);
        assert_eq!(counts.word_count(&Observation::word("the")), 2);
        assert_eq!(counts.word_count(&Observation::Word("The".into())), 0);
        assert_eq!(
            counts.joint_count(&Observation::word("the"), &Tag::label("DT")),
            2
        );
    }

    #[test]
    fn test_each_sentence_ends_exactly_once() {
        let corpus: &[&[(&str, &str)]] = &[
            &[("a", "DT"), ("cat", "NN")],
            &[("cats", "NNS"), ("sleep", "VBP"), (".", ".")],
            &[("hi", "UH")],
        ];
        let counts = counts_of(corpus);

        let into_end: u64 = counts
            .tag_bigram
            .iter()
            .filter(|((_, next), _)| *next == Tag::End)
            .map(|(_, c)| c)
            .sum();
        assert_eq!(into_end, corpus.len() as u64);
        assert_eq!(counts.tag_count(&Tag::Start), 3);
        assert_eq!(counts.tag_count(&Tag::End), 3);

        // caminho START -> ... -> END de comprimento n + 1 por sentença
        let total_transitions: u64 = counts.tag_bigram.values().sum();
        let total_words: usize = corpus.iter().map(|s| s.len()).sum();
        assert_eq!(total_transitions, (total_words + corpus.len()) as u64);
    }

    #[test]
    fn test_empty_input_yields_empty_counts() {
        let counts = StatisticsCollector::new().finish();
        assert!(counts.is_empty());
        assert_eq!(counts.tag_count(&Tag::Start), 0);
        assert_eq!(counts.vocabulary_size(), 0);
    }

    #[test]
    fn test_collect_from_corpus() {
        let corpus = vec![AnnotatedSentence::from_pairs(&[("Dogs", "NNS"), ("bark", "VBP")])];
        let counts = Counts::collect(&corpus);
        assert_eq!(counts.bigram_count(&Tag::label("NNS"), &Tag::label("VBP")), 1);
        assert_eq!(counts.word_count(&Observation::word("dogs")), 1);
    }
}
