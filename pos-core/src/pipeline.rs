//! # Pipeline de Treino e Etiquetagem
//!
//! Conecta as etapas do núcleo:
//!
//! ```text
//! TREINO:  corpus -> StatisticsCollector -> adapt (classes) -> estimate -> TrainedModel
//! TAG:     TrainedModel -> ViterbiDecoder (uma sentença por vez)
//! ```
//!
//! As sentenças são independentes entre si na etiquetagem, então
//! [`PosTagger::tag_sentences`] as decodifica em paralelo com Rayon. O modelo
//! é só lido; nenhuma decodificação altera estado compartilhado.

use rayon::prelude::*;

use crate::config::DecoderConfig;
use crate::corpus::{AnnotatedSentence, TaggedSentence};
use crate::counts::Counts;
use crate::estimator::estimate;
use crate::model::TrainedModel;
use crate::tokenizer::tokenize_sentences;
use crate::unknown::adapt;
use crate::viterbi::{ViterbiDecoder, ViterbiResult};

/// Treina um modelo a partir do corpus anotado.
///
/// As contagens existem só durante esta chamada.
pub fn train(corpus: &[AnnotatedSentence]) -> TrainedModel {
    let counts = adapt(Counts::collect(corpus));
    let model = estimate(&counts);
    tracing::info!(
        sentences = corpus.len(),
        words = model.vocabulary_size(),
        tags = model.tags().len(),
        "model trained"
    );
    model
}

/// Etiquetador pronto para uso: modelo treinado + configuração do Viterbi.
#[derive(Debug, Clone)]
pub struct PosTagger {
    model: TrainedModel,
    config: DecoderConfig,
}

impl PosTagger {
    pub fn new(model: TrainedModel, config: DecoderConfig) -> Self {
        Self { model, config }
    }

    /// Treina no corpus e devolve o etiquetador com a configuração padrão.
    pub fn from_corpus(corpus: &[AnnotatedSentence]) -> Self {
        Self::new(train(corpus), DecoderConfig::default())
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn decoder(&self) -> ViterbiDecoder<'_> {
        ViterbiDecoder::new(&self.model, self.config)
    }

    /// Viterbi completo, com a tabela de passos.
    pub fn viterbi<S: AsRef<str>>(&self, words: &[S]) -> ViterbiResult {
        self.decoder().decode(words)
    }

    pub fn tag_sentence<S: AsRef<str>>(&self, words: &[S]) -> TaggedSentence {
        tag_with(&self.decoder(), words)
    }

    /// Etiqueta várias sentenças em paralelo, preservando a ordem de entrada.
    pub fn tag_sentences<S: AsRef<str> + Sync>(&self, sentences: &[Vec<S>]) -> Vec<TaggedSentence> {
        let decoder = self.decoder();
        let tagged: Vec<TaggedSentence> = sentences
            .par_iter()
            .map(|words| tag_with(&decoder, words))
            .collect();
        let failed = tagged.iter().filter(|s| !s.words.is_empty() && !s.is_tagged()).count();
        tracing::info!(sentences = tagged.len(), failed, "sentences tagged");
        tagged
    }

    /// Tokeniza texto livre em sentenças e etiqueta cada uma.
    pub fn tag_text(&self, text: &str) -> Vec<TaggedSentence> {
        let sentences: Vec<Vec<String>> = tokenize_sentences(text)
            .into_iter()
            .map(|tokens| tokens.into_iter().map(|t| t.text).collect())
            .collect();
        self.tag_sentences(&sentences)
    }
}

fn tag_with<S: AsRef<str>>(decoder: &ViterbiDecoder<'_>, words: &[S]) -> TaggedSentence {
    let tags = decoder.tag(words);
    let words: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
    if tags.is_empty() && !words.is_empty() {
        tracing::warn!(words = words.len(), "could not tag sentence");
    }
    TaggedSentence { words, tags }
}
