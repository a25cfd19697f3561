//! # Estimação por Máxima Verossimilhança
//!
//! Converte as contagens (já adaptadas para palavras desconhecidas) em
//! probabilidades, sem suavização:
//!
//! ```text
//! P(t2 | t1) = count(t1, t2) / count(t1)      (0 se count(t1) = 0)
//! P(w | t)   = count(w, t)   / count(t)
//! ```
//!
//! A tabela de transição é densa sobre todo o alfabeto (sentinelas inclusas).
//! A de emissão é densa sobre vocabulário observado x tags do corpus: pares
//! com contagem conjunta zero ficam presentes com probabilidade `0.0`, o que
//! diferencia "palavra conhecida, nunca vista com essa tag" de "palavra
//! desconhecida" no Viterbi.

use std::collections::HashMap;

use crate::counts::Counts;
use crate::model::TrainedModel;
use crate::tag::Tag;

/// Produz o [`TrainedModel`] a partir de contagens finalizadas.
///
/// As colunas `Start` e `End` ficam fora da tabela de emissão: sentinelas não
/// emitem palavras e nunca são candidatas no Viterbi, então guardar `0.0`
/// para elas só aumentaria o modelo persistido.
pub fn estimate(counts: &Counts) -> TrainedModel {
    let tags = counts.tags();
    let observations = counts.observations();

    let mut transitions = HashMap::with_capacity(tags.len() * tags.len());
    for prev in &tags {
        let total = counts.tag_count(prev);
        for next in &tags {
            let prob = if total == 0 {
                0.0
            } else {
                counts.bigram_count(prev, next) as f64 / total as f64
            };
            transitions.insert((prev.clone(), next.clone()), prob);
        }
    }

    let labels: Vec<&Tag> = tags.iter().filter(|t| !t.is_sentinel()).collect();
    let mut emissions = HashMap::with_capacity(observations.len() * labels.len());
    for obs in &observations {
        for &tag in &labels {
            let total = counts.tag_count(tag);
            let prob = if total == 0 {
                0.0
            } else {
                counts.joint_count(obs, tag) as f64 / total as f64
            };
            emissions.insert((obs.clone(), tag.clone()), prob);
        }
    }

    tracing::info!(
        words = observations.len(),
        tags = tags.len(),
        transitions = transitions.len(),
        emissions = emissions.len(),
        "probabilities estimated"
    );

    TrainedModel {
        tags,
        transitions,
        emissions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::sample_corpus;
    use crate::counts::StatisticsCollector;
    use crate::tag::Observation;
    use crate::unknown::{adapt, WordClass};

    const EPS: f64 = 1e-9;

    fn trained_sample() -> (Counts, TrainedModel) {
        let counts = adapt(Counts::collect(&sample_corpus()));
        let model = estimate(&counts);
        (counts, model)
    }

    #[test]
    fn test_transition_rows_sum_to_one() {
        let (counts, model) = trained_sample();
        for prev in model.tags() {
            if *prev == Tag::End || counts.tag_count(prev) == 0 {
                continue;
            }
            let sum: f64 = model.tags().iter().map(|next| model.transition(prev, next)).sum();
            assert!((sum - 1.0).abs() < EPS, "linha {prev} soma {sum}");
        }
    }

    #[test]
    fn test_emission_columns_sum_to_one() {
        let (counts, model) = trained_sample();
        for tag in model.labels() {
            let sum: f64 = counts
                .observations()
                .iter()
                .map(|obs| model.emission(obs, tag).unwrap_or(0.0))
                .sum();
            assert!((sum - 1.0).abs() < EPS, "coluna {tag} soma {sum}");
        }
    }

    #[test]
    fn test_singletons_absent_from_emissions() {
        let (_, model) = trained_sample();
        // "mat" aparece uma única vez no corpus de exemplo
        assert_eq!(model.emission(&Observation::word("mat"), &Tag::label("NN")), None);
        assert!(model
            .emission(&Observation::Class(WordClass::Unknown), &Tag::label("NN"))
            .is_some());
    }

    #[test]
    fn test_zero_joint_is_present_not_absent() {
        let (_, model) = trained_sample();
        // "the" nunca foi NN, mas o par existe com probabilidade zero
        assert_eq!(model.emission(&Observation::word("the"), &Tag::label("NN")), Some(0.0));
        assert!(model.emission(&Observation::word("the"), &Tag::label("DT")).unwrap() > 0.0);
    }

    #[test]
    fn test_hand_computed_probabilities() {
        let mut collector = StatisticsCollector::new();
        collector.observe(&[("the", "DT"), ("dog", "NN")]);
        collector.observe(&[("the", "DT"), ("dog", "VB")]);
        collector.observe(&[("dog", "NN")]);
        let model = estimate(&collector.finish());

        // START -> DT duas vezes, START -> NN uma vez
        assert!((model.transition(&Tag::Start, &Tag::label("DT")) - 2.0 / 3.0).abs() < EPS);
        assert!((model.transition(&Tag::Start, &Tag::label("NN")) - 1.0 / 3.0).abs() < EPS);
        assert_eq!(model.transition(&Tag::label("DT"), &Tag::label("NN")), 0.5);
        assert_eq!(model.transition(&Tag::End, &Tag::label("NN")), 0.0);
        assert_eq!(model.emission(&Observation::word("dog"), &Tag::label("NN")), Some(1.0));
        assert_eq!(model.emission(&Observation::word("dog"), &Tag::label("VB")), Some(1.0));
        assert_eq!(model.emission(&Observation::word("the"), &Tag::label("VB")), Some(0.0));
        // sentinelas não emitem palavras
        assert_eq!(model.emission(&Observation::word("the"), &Tag::Start), None);
    }

    #[test]
    fn test_emissions_cover_labels_only() {
        let (counts, model) = trained_sample();
        let observations = counts.observations();
        for obs in &observations {
            assert_eq!(model.emission(obs, &Tag::Start), None, "{obs} com START");
            assert_eq!(model.emission(obs, &Tag::End), None, "{obs} com END");
        }
        assert_eq!(
            model.emission_count(),
            observations.len() * model.labels().count()
        );
    }

    #[test]
    fn test_empty_counts_yield_empty_model() {
        let model = estimate(&Counts::default());
        assert!(model.is_empty());
        assert_eq!(model.transition_count(), 0);
        assert_eq!(model.emission_count(), 0);
    }
}
