//! # Modelo Treinado e Persistência
//!
//! O [`TrainedModel`] é o artefato do treino: o alfabeto de tags, a tabela de
//! transição `P(t2 | t1)` e a tabela de emissão `P(w | t)`. Depois de criado
//! ele não tem caminho de mutação; qualquer número de etiquetadores pode
//! compartilhá-lo (inclusive entre threads).
//!
//! ## Formato em disco
//!
//! JSON (`serde_json` com `float_roundtrip`, então cada `f64` volta idêntico
//! bit a bit). As tabelas com chave de tupla viram listas ordenadas de
//! entradas `[a, b, p]`, o que deixa o arquivo determinístico:
//!
//! ```json
//! {
//!   "tags": ["Start", "End", {"Label": "DT"}],
//!   "transitions": [["Start", {"Label": "DT"}, 1.0]],
//!   "emissions": [[{"Word": "the"}, {"Label": "DT"}, 1.0]]
//! }
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tag::{Observation, Tag};

/// Parâmetros do HMM de primeira ordem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    /// Alfabeto de tags, incluindo `Start` e `End`.
    pub(crate) tags: BTreeSet<Tag>,
    /// `P(t2 | t1)`, densa sobre o alfabeto. Chave: `(t1, t2)`.
    #[serde(with = "pair_table")]
    pub(crate) transitions: HashMap<(Tag, Tag), f64>,
    /// `P(w | t)`, densa sobre vocabulário observado x tags do corpus.
    /// Pares ausentes significam "nunca visto", diferente de probabilidade zero.
    #[serde(with = "pair_table")]
    pub(crate) emissions: HashMap<(Observation, Tag), f64>,
}

impl TrainedModel {
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Tags do corpus (sem as sentinelas), em ordem determinística.
    pub fn labels(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(|t| !t.is_sentinel())
    }

    /// `P(next | prev)`; zero para pares fora do alfabeto.
    pub fn transition(&self, prev: &Tag, next: &Tag) -> f64 {
        self.transitions
            .get(&(prev.clone(), next.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// `P(obs | tag)` quando o par existe na tabela.
    pub fn emission(&self, obs: &Observation, tag: &Tag) -> Option<f64> {
        self.emissions.get(&(obs.clone(), tag.clone())).copied()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn emission_count(&self) -> usize {
        self.emissions.len()
    }

    /// Número de observações distintas (palavras e classes) com emissão.
    pub fn vocabulary_size(&self) -> usize {
        self.emissions
            .keys()
            .map(|(obs, _)| obs)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Serializa o modelo em JSON para qualquer escritor.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Persiste o modelo em `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| Error::ModelWrite {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|err| {
            if err.is_io() {
                write_err(err.into())
            } else {
                Error::ModelFormat(err)
            }
        })?;
        writer.flush().map_err(write_err)?;
        tracing::info!(path = %path.display(), "model saved");
        Ok(())
    }

    /// Carrega um modelo persistido por [`TrainedModel::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let read_err = |source: std::io::Error| Error::ModelRead {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_err)?;
        let model: Self = serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            if err.is_io() {
                read_err(err.into())
            } else {
                Error::ModelFormat(err)
            }
        })?;
        tracing::info!(
            path = %path.display(),
            tags = model.tags.len(),
            emissions = model.emissions.len(),
            "model loaded"
        );
        Ok(model)
    }
}

/// (De)serializa `HashMap<(A, B), f64>` como lista ordenada de `(A, B, f64)`.
mod pair_table {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<A, B, S>(table: &HashMap<(A, B), f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        A: Serialize + Ord,
        B: Serialize + Ord,
        S: Serializer,
    {
        let mut entries: Vec<(&A, &B, f64)> = table.iter().map(|((a, b), p)| (a, b, *p)).collect();
        entries.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
        serializer.collect_seq(entries)
    }

    pub fn deserialize<'de, A, B, D>(deserializer: D) -> Result<HashMap<(A, B), f64>, D::Error>
    where
        A: Deserialize<'de> + Eq + Hash,
        B: Deserialize<'de> + Eq + Hash,
        D: Deserializer<'de>,
    {
        let entries: Vec<(A, B, f64)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|(a, b, p)| ((a, b), p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unknown::WordClass;

    fn tiny_model() -> TrainedModel {
        let tags: BTreeSet<Tag> = [Tag::Start, Tag::End, Tag::label("DT"), Tag::label("NN")]
            .into_iter()
            .collect();
        let mut transitions = HashMap::new();
        transitions.insert((Tag::Start, Tag::label("DT")), 1.0);
        transitions.insert((Tag::label("DT"), Tag::label("NN")), 1.0);
        transitions.insert((Tag::label("NN"), Tag::End), 1.0);
        // valor sem representação decimal curta, para testar o round-trip
        transitions.insert((Tag::label("NN"), Tag::label("DT")), 1.0 / 3.0);
        let mut emissions = HashMap::new();
        emissions.insert((Observation::word("the"), Tag::label("DT")), 1.0);
        emissions.insert((Observation::word("the"), Tag::label("NN")), 0.0);
        emissions.insert((Observation::Class(WordClass::Unknown), Tag::label("NN")), 0.1 + 0.2);
        TrainedModel { tags, transitions, emissions }
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let model = tiny_model();
        let mut buf = Vec::new();
        model.to_writer(&mut buf).unwrap();
        let loaded = TrainedModel::from_reader(buf.as_slice()).unwrap();
        assert_eq!(loaded, model);
        for (key, p) in &model.transitions {
            assert_eq!(loaded.transitions[key].to_bits(), p.to_bits());
        }
        for (key, p) in &model.emissions {
            assert_eq!(loaded.emissions[key].to_bits(), p.to_bits());
        }
    }

    #[test]
    fn test_serialized_tables_are_sorted() {
        let model = tiny_model();
        let mut a = Vec::new();
        let mut b = Vec::new();
        model.to_writer(&mut a).unwrap();
        model.clone().to_writer(&mut b).unwrap();
        assert_eq!(a, b);
        let json = String::from_utf8(a).unwrap();
        assert!(json.contains("\"UNKNOWN\""));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.json");
        let model = tiny_model();
        model.save(&path).unwrap();
        let loaded = TrainedModel::load(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_load_errors_are_distinguishable() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            TrainedModel::load(&missing),
            Err(Error::ModelRead { .. })
        ));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        assert!(matches!(
            TrainedModel::load(&garbage),
            Err(Error::ModelFormat(_))
        ));
    }

    #[test]
    fn test_lookups() {
        let model = tiny_model();
        assert_eq!(model.transition(&Tag::Start, &Tag::label("DT")), 1.0);
        assert_eq!(model.transition(&Tag::Start, &Tag::label("VB")), 0.0);
        assert_eq!(model.emission(&Observation::word("the"), &Tag::label("NN")), Some(0.0));
        assert_eq!(model.emission(&Observation::word("dog"), &Tag::label("NN")), None);
        assert_eq!(model.labels().count(), 2);
        assert_eq!(model.vocabulary_size(), 2);
    }
}
