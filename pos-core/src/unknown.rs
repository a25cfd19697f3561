//! # Palavras Desconhecidas por Sufixo
//!
//! Palavras que aparecem uma única vez no treino não são guardadas na forma
//! literal. Elas são dobradas em uma **classe de sufixo**, e a massa de
//! probabilidade dessa classe é usada no Viterbi para palavras nunca vistas.
//!
//! ## Regras (primeira que casar vence)
//!
//! | Grupo de sufixos          | Classe                          |
//! |---------------------------|---------------------------------|
//! | able, ible                | `UNKNOWN_AFFIXED_WITH_ABLE`     |
//! | al                        | `UNKNOWN_AFFIXED_WITH_AL`       |
//! | an                        | `UNKNOWN_AFFIXED_WITH_AN`       |
//! | ar                        | `UNKNOWN_AFFIXED_WITH_AR`       |
//! | ed                        | `UNKNOWN_AFFIXED_WITH_ED`       |
//! | en                        | `UNKNOWN_AFFIXED_WITH_EN`       |
//! | er, or                    | `UNKNOWN_AFFIXED_WITH_ER`       |
//! | est                       | `UNKNOWN_AFFIXED_WITH_EST`      |
//! | ing                       | `UNKNOWN_AFFIXED_WITH_ING`      |
//! | ish, ous, ful, less       | `UNKNOWN_AFFIXED_WITH_ISH`      |
//! | ive                       | `UNKNOWN_AFFIXED_WITH_IVE`      |
//! | ly                        | `UNKNOWN_AFFIXED_WITH_LY`       |
//! | ment, ness                | `UNKNOWN_AFFIXED_WITH_MENT`     |
//! | y                         | `UNKNOWN_AFFIXED_WITH_Y`        |
//! | (nenhum)                  | `UNKNOWN`                       |
//!
//! O rótulo da classe é sempre o primeiro membro do grupo em maiúsculas. A
//! mesma regra roda no treino e na decodificação; mudar a ordem quebra a
//! compatibilidade com modelos já persistidos.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::counts::Counts;
use crate::tag::{Observation, Tag};

/// Classe de palavra desconhecida, derivada do sufixo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WordClass {
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_ABLE")]
    Able,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_AL")]
    Al,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_AN")]
    An,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_AR")]
    Ar,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_ED")]
    Ed,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_EN")]
    En,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_ER")]
    Er,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_EST")]
    Est,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_ING")]
    Ing,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_ISH")]
    Ish,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_IVE")]
    Ive,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_LY")]
    Ly,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_MENT")]
    Ment,
    #[serde(rename = "UNKNOWN_AFFIXED_WITH_Y")]
    Y,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Grupos de sufixos em ordem de prioridade.
const SUFFIX_RULES: &[(&[&str], WordClass)] = &[
    (&["able", "ible"], WordClass::Able),
    (&["al"], WordClass::Al),
    (&["an"], WordClass::An),
    (&["ar"], WordClass::Ar),
    (&["ed"], WordClass::Ed),
    (&["en"], WordClass::En),
    (&["er", "or"], WordClass::Er),
    (&["est"], WordClass::Est),
    (&["ing"], WordClass::Ing),
    (&["ish", "ous", "ful", "less"], WordClass::Ish),
    (&["ive"], WordClass::Ive),
    (&["ly"], WordClass::Ly),
    (&["ment", "ness"], WordClass::Ment),
    (&["y"], WordClass::Y),
];

impl WordClass {
    /// Classifica uma palavra pelo sufixo (sem diferenciar maiúsculas).
    pub fn classify(word: &str) -> Self {
        let word = word.to_lowercase();
        SUFFIX_RULES
            .iter()
            .find(|(group, _)| group.iter().any(|suffix| word.ends_with(suffix)))
            .map(|(_, class)| *class)
            .unwrap_or(WordClass::Unknown)
    }

    /// Rótulo textual da classe, igual ao usado na serialização.
    pub fn label(&self) -> &'static str {
        match self {
            WordClass::Able => "UNKNOWN_AFFIXED_WITH_ABLE",
            WordClass::Al => "UNKNOWN_AFFIXED_WITH_AL",
            WordClass::An => "UNKNOWN_AFFIXED_WITH_AN",
            WordClass::Ar => "UNKNOWN_AFFIXED_WITH_AR",
            WordClass::Ed => "UNKNOWN_AFFIXED_WITH_ED",
            WordClass::En => "UNKNOWN_AFFIXED_WITH_EN",
            WordClass::Er => "UNKNOWN_AFFIXED_WITH_ER",
            WordClass::Est => "UNKNOWN_AFFIXED_WITH_EST",
            WordClass::Ing => "UNKNOWN_AFFIXED_WITH_ING",
            WordClass::Ish => "UNKNOWN_AFFIXED_WITH_ISH",
            WordClass::Ive => "UNKNOWN_AFFIXED_WITH_IVE",
            WordClass::Ly => "UNKNOWN_AFFIXED_WITH_LY",
            WordClass::Ment => "UNKNOWN_AFFIXED_WITH_MENT",
            WordClass::Y => "UNKNOWN_AFFIXED_WITH_Y",
            WordClass::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for WordClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Substitui toda palavra com frequência 1 pela sua classe de sufixo.
///
/// As linhas da palavra em `word_marginal` e `word_tag_joint` são removidas e
/// somadas às linhas da classe. Palavras com frequência >= 2 e as próprias
/// classes não são tocadas, então reaplicar sobre contagens já adaptadas não
/// muda nada. As tabelas de tags ficam intactas.
pub fn adapt(mut counts: Counts) -> Counts {
    let singletons: Vec<(String, WordClass)> = counts
        .word_marginal
        .iter()
        .filter_map(|(obs, &count)| match obs {
            Observation::Word(word) if count == 1 => Some((word.clone(), WordClass::classify(word))),
            _ => None,
        })
        .collect();

    if singletons.is_empty() {
        return counts;
    }

    // palavra -> classe, para reescrever a tabela conjunta numa só passada
    let renamed: HashMap<Observation, Observation> = singletons
        .iter()
        .map(|(word, class)| (Observation::Word(word.clone()), Observation::Class(*class)))
        .collect();

    for (word, class) in &renamed {
        if let Some(count) = counts.word_marginal.remove(word) {
            *counts.word_marginal.entry(class.clone()).or_insert(0) += count;
        }
    }

    let joint = std::mem::take(&mut counts.word_tag_joint);
    let mut adapted: HashMap<(Observation, Tag), u64> = HashMap::with_capacity(joint.len());
    for ((obs, tag), count) in joint {
        let obs = renamed.get(&obs).cloned().unwrap_or(obs);
        *adapted.entry((obs, tag)).or_insert(0) += count;
    }
    counts.word_tag_joint = adapted;

    tracing::debug!(
        singletons = singletons.len(),
        vocabulary = counts.vocabulary_size(),
        "singleton words folded into suffix classes"
    );
    counts
}
