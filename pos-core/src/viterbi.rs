//! # Algoritmo de Viterbi — Decodificação do HMM
//!
//! Encontra a sequência de tags mais provável para uma sentença, dado o
//! [`TrainedModel`]. Complexidade `O(N × T²)` para N palavras e T tags.
//!
//! ## Algoritmo
//!
//! ```text
//! Inicialização:  coluna 0 = { START: 0.0 }            (ln 1)
//!
//! Recursão:       v[i][t] = max_{t'} v[i-1][t'] + ln P(t | t') + ln e(w_i, t)
//!
//! Terminação:     melhor = argmax_{t} v[N][t] + ln P(END | t)
//!
//! Backtracking:   segue os backpointers da coluna N até a coluna 1
//! ```
//!
//! Os scores são acumulados em log (como no Viterbi do CRF), então sentenças
//! longas não sofrem underflow. `ln` é monotônico: o argmax e os empates são
//! os mesmos do produto de probabilidades.
//!
//! ## Emissão `e(w, t)`
//!
//! 1. `P(w | t)` se o par `(w, t)` existe no modelo;
//! 2. senão `P(classe(w) | t)` se a classe de sufixo da palavra existe com `t`;
//! 3. senão [`DecoderConfig::unseen_emission`] (0.001 por padrão).
//!
//! ## Poda e casos degenerados
//!
//! Uma tag cujo melhor log-score é `-inf` (algum fator do produto é zero) sai
//! da coluna (não é alcançável). Se a última coluna ficar vazia, ou nenhuma tag puder
//! transitar para `END`, o resultado é uma sequência vazia; o mesmo vale para
//! sentença vazia. O decodificador nunca falha.
//!
//! Empates ficam com a primeira tag na ordem do alfabeto (lexicográfica).

use serde::{Deserialize, Serialize};

use crate::config::DecoderConfig;
use crate::model::TrainedModel;
use crate::tag::{Observation, Tag};
use crate::unknown::WordClass;

/// Score de uma tag sobrevivente em um passo do Viterbi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagScore {
    pub tag: String,
    /// Probabilidade do melhor caminho que termina nesta tag (`exp(log_score)`).
    pub score: f64,
    /// Log-probabilidade do mesmo caminho.
    pub log_score: f64,
    /// Tag anterior que gerou o score.
    pub best_prev: String,
    /// Emissão usada para a palavra com esta tag.
    pub emission: f64,
}

/// Estado do Viterbi em uma posição da sentença (para inspeção).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiStep {
    pub token_index: usize,
    pub word: String,
    /// Apenas as tags não podadas, na ordem do alfabeto.
    pub scores: Vec<TagScore>,
}

/// Resultado completo da decodificação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiResult {
    /// Uma tag por palavra, ou vazio quando a sentença não pôde ser etiquetada.
    pub best_sequence: Vec<String>,
    /// Probabilidade conjunta do melhor caminho, incluindo a transição para `END`.
    /// Pode ser `0.0` por underflow em sentenças longas; use `best_log_score`.
    pub best_score: f64,
    /// `ln(best_score)`; `-inf` quando a sentença não foi etiquetada.
    pub best_log_score: f64,
    pub steps: Vec<ViterbiStep>,
}

impl ViterbiResult {
    fn empty(steps: Vec<ViterbiStep>) -> Self {
        Self {
            best_sequence: Vec::new(),
            best_score: 0.0,
            best_log_score: f64::NEG_INFINITY,
            steps,
        }
    }
}

/// Célula de uma coluna: (log-score, índice do estado anterior).
type Cell = Option<(f64, usize)>;

/// Decodificador Viterbi sobre um modelo emprestado.
///
/// Os estados são `START` (índice 0) seguido das tags do corpus em ordem. As
/// transições são pré-calculadas em log numa matriz densa na construção.
pub struct ViterbiDecoder<'m> {
    model: &'m TrainedModel,
    config: DecoderConfig,
    states: Vec<Tag>,
    /// `transitions[p][s] = ln P(states[s] | states[p])`
    transitions: Vec<Vec<f64>>,
    /// `to_end[p] = ln P(END | states[p])`
    to_end: Vec<f64>,
}

impl<'m> ViterbiDecoder<'m> {
    pub fn new(model: &'m TrainedModel, config: DecoderConfig) -> Self {
        let states: Vec<Tag> = std::iter::once(Tag::Start)
            .chain(model.labels().cloned())
            .collect();
        let transitions = states
            .iter()
            .map(|prev| states.iter().map(|next| model.transition(prev, next).ln()).collect())
            .collect();
        let to_end = states
            .iter()
            .map(|prev| model.transition(prev, &Tag::End).ln())
            .collect();

        Self {
            model,
            config,
            states,
            transitions,
            to_end,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// `e(w, t)` com os dois níveis de fallback.
    pub fn emission(&self, word: &str, tag: &Tag) -> f64 {
        let obs = Observation::word(word);
        self.model
            .emission(&obs, tag)
            .or_else(|| {
                let class = Observation::Class(WordClass::classify(word));
                self.model.emission(&class, tag)
            })
            .unwrap_or(self.config.unseen_emission)
    }

    /// Emissões da palavra para todos os estados (`0.0` para START).
    fn emission_row(&self, word: &str) -> Vec<f64> {
        let obs = Observation::word(word);
        let class = Observation::Class(WordClass::classify(word));
        let mut row = vec![0.0; self.states.len()];
        for (s, tag) in self.states.iter().enumerate().skip(1) {
            row[s] = self
                .model
                .emission(&obs, tag)
                .or_else(|| self.model.emission(&class, tag))
                .unwrap_or(self.config.unseen_emission);
        }
        row
    }

    /// Executa o Viterbi e devolve a sequência, o score e a tabela de passos.
    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> ViterbiResult {
        if words.is_empty() {
            return ViterbiResult::empty(Vec::new());
        }

        let n_states = self.states.len();
        let mut start: Vec<Cell> = vec![None; n_states];
        start[0] = Some((0.0, 0));
        let mut columns: Vec<Vec<Cell>> = Vec::with_capacity(words.len() + 1);
        columns.push(start);
        let mut steps = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let word = word.as_ref();
            let prev = &columns[columns.len() - 1];
            let mut column: Vec<Cell> = vec![None; n_states];
            let mut scores = Vec::new();
            let emissions = self.emission_row(word);

            // estado 0 é START, que nunca é alvo de transição
            for s in 1..n_states {
                let emission = emissions[s];
                let log_emission = emission.ln();
                let mut best: Cell = None;
                for (p, cell) in prev.iter().enumerate() {
                    let Some((score, _)) = cell else { continue };
                    let candidate = score + self.transitions[p][s] + log_emission;
                    if candidate > best.map_or(f64::NEG_INFINITY, |(b, _)| b) {
                        best = Some((candidate, p));
                    }
                }
                if let Some((log_score, p)) = best {
                    scores.push(TagScore {
                        tag: self.states[s].to_string(),
                        score: log_score.exp(),
                        log_score,
                        best_prev: self.states[p].to_string(),
                        emission,
                    });
                }
                column[s] = best;
            }

            steps.push(ViterbiStep {
                token_index: i,
                word: word.to_string(),
                scores,
            });
            columns.push(column);
        }

        // === Terminação ===
        let last = &columns[columns.len() - 1];
        let mut best: Cell = None;
        for (p, cell) in last.iter().enumerate() {
            let Some((score, _)) = cell else { continue };
            let candidate = score + self.to_end[p];
            if candidate > best.map_or(f64::NEG_INFINITY, |(b, _)| b) {
                best = Some((candidate, p));
            }
        }
        let Some((best_log_score, mut state)) = best else {
            tracing::debug!(words = words.len(), "no path reaches END");
            return ViterbiResult::empty(steps);
        };

        // === Backtracking ===
        let mut best_sequence = Vec::with_capacity(words.len());
        for column in columns[1..].iter().rev() {
            best_sequence.push(self.states[state].to_string());
            state = column[state].map_or(0, |(_, back)| back);
        }
        best_sequence.reverse();

        ViterbiResult {
            best_sequence,
            best_score: best_log_score.exp(),
            best_log_score,
            steps,
        }
    }

    /// Atalho para [`ViterbiDecoder::decode`] que devolve só as tags.
    pub fn tag<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        self.decode(words).best_sequence
    }
}
