//! # Corpus Anotado e Formato de Arquivo
//!
//! Formato linha a linha, o mesmo para treino, entrada e saída:
//!
//! ```text
//! The	DT
//! dog	NN
//! runs	VBZ
//!
//! Cats	NNS
//! sleep	VBP
//! ```
//!
//! - Cada linha não vazia é `palavra<TAB>tag` (na entrada de etiquetagem só a
//!   primeira coluna é usada).
//! - Linha em branco encerra a sentença; várias linhas em branco seguidas não
//!   geram sentenças vazias.
//! - A última sentença não precisa terminar com linha em branco.
//!
//! O módulo também traz um pequeno corpus em inglês ([`sample_corpus`]) usado
//! pelo servidor web quando nenhum modelo é informado e pelos testes.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Uma sentença anotada: pares (palavra, tag) na ordem original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub annotations: Vec<(String, String)>,
}

impl AnnotatedSentence {
    pub fn from_pairs<W: AsRef<str>, T: AsRef<str>>(pairs: &[(W, T)]) -> Self {
        Self {
            annotations: pairs
                .iter()
                .map(|(w, t)| (w.as_ref().to_string(), t.as_ref().to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.annotations.iter().map(|(w, _)| w.as_str())
    }
}

/// Resultado da etiquetagem de uma sentença.
///
/// `tags` fica vazio quando o decodificador não encontrou caminho; caso
/// contrário tem o mesmo comprimento de `words`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSentence {
    pub words: Vec<String>,
    pub tags: Vec<String>,
}

impl TaggedSentence {
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty() && self.tags.len() == self.words.len()
    }

    /// Pares (palavra, tag); vazio se a sentença não foi etiquetada.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words
            .iter()
            .zip(&self.tags)
            .map(|(w, t)| (w.as_str(), t.as_str()))
    }
}

/// Lê um corpus de treino do disco.
pub fn read_training_corpus(path: impl AsRef<Path>) -> Result<Vec<AnnotatedSentence>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::CorpusRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_training_from(BufReader::new(file), path)
}

/// Decodifica o formato de treino a partir de qualquer leitor.
///
/// Falhas de leitura aparecem como [`Error::CorpusRead`] com caminho `-`.
pub fn parse_training<R: BufRead>(reader: R) -> Result<Vec<AnnotatedSentence>> {
    parse_training_from(reader, Path::new("-"))
}

fn parse_training_from<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<AnnotatedSentence>> {
    let mut corpus = Vec::new();
    let mut sentence = AnnotatedSentence::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::CorpusRead {
            path: origin.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !sentence.is_empty() {
                corpus.push(std::mem::take(&mut sentence));
            }
            continue;
        }

        // exatamente dois campos não vazios: palavra e tag
        let mut fields = trimmed.split('\t').map(str::trim);
        let (Some(word), Some(tag), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(Error::MalformedRecord {
                line: index + 1,
                content: line,
            });
        };
        if word.is_empty() || tag.is_empty() {
            return Err(Error::MalformedRecord {
                line: index + 1,
                content: line,
            });
        }
        sentence.annotations.push((word.to_string(), tag.to_string()));
    }

    if !sentence.is_empty() {
        corpus.push(sentence);
    }
    tracing::debug!(sentences = corpus.len(), origin = %origin.display(), "training corpus parsed");
    Ok(corpus)
}

/// Lê sentenças não etiquetadas (uma palavra por linha) do disco.
pub fn read_untagged(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::CorpusRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_untagged(BufReader::new(file)).map_err(|source| Error::CorpusRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodifica sentenças não etiquetadas. Colunas além da primeira são ignoradas,
/// então um arquivo já etiquetado também serve de entrada.
pub fn parse_untagged<R: BufRead>(reader: R) -> std::io::Result<Vec<Vec<String>>> {
    let mut sentences = Vec::new();
    let mut sentence: Vec<String> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !sentence.is_empty() {
                sentences.push(std::mem::take(&mut sentence));
            }
            continue;
        }
        let word = trimmed.split('\t').next().unwrap_or(trimmed).trim();
        sentence.push(word.to_string());
    }

    if !sentence.is_empty() {
        sentences.push(sentence);
    }
    Ok(sentences)
}

/// Escreve sentenças etiquetadas no formato `palavra<TAB>tag`, com uma linha
/// em branco depois de cada sentença.
///
/// Sentenças que o decodificador não conseguiu etiquetar não geram linhas de
/// palavras, só a linha em branco, mantendo o alinhamento com a entrada.
pub fn write_tagged<W: Write>(mut writer: W, sentences: &[TaggedSentence]) -> Result<()> {
    for sentence in sentences {
        for (word, tag) in sentence.pairs() {
            writeln!(writer, "{word}\t{tag}").map_err(Error::OutputWrite)?;
        }
        writeln!(writer).map_err(Error::OutputWrite)?;
    }
    writer.flush().map_err(Error::OutputWrite)
}

/// Corpus de demonstração em inglês, com tags do Penn Treebank.
pub fn sample_corpus() -> Vec<AnnotatedSentence> {
    const SENTENCES: &[&[(&str, &str)]] = &[
        &[("The", "DT"), ("dog", "NN"), ("runs", "VBZ"), ("quickly", "RB"), (".", ".")],
        &[("The", "DT"), ("cat", "NN"), ("sleeps", "VBZ"), ("on", "IN"), ("the", "DT"), ("mat", "NN"), (".", ".")],
        &[("A", "DT"), ("small", "JJ"), ("dog", "NN"), ("barked", "VBD"), ("loudly", "RB"), (".", ".")],
        &[("She", "PRP"), ("is", "VBZ"), ("reading", "VBG"), ("a", "DT"), ("book", "NN"), (".", ".")],
        &[("They", "PRP"), ("walked", "VBD"), ("to", "TO"), ("the", "DT"), ("park", "NN"), (".", ".")],
        &[("The", "DT"), ("children", "NNS"), ("are", "VBP"), ("playing", "VBG"), ("in", "IN"), ("the", "DT"), ("park", "NN"), (".", ".")],
        &[("He", "PRP"), ("bought", "VBD"), ("a", "DT"), ("beautiful", "JJ"), ("house", "NN"), (".", ".")],
        &[("The", "DT"), ("teacher", "NN"), ("is", "VBZ"), ("very", "RB"), ("careful", "JJ"), (".", ".")],
        &[("We", "PRP"), ("are", "VBP"), ("eating", "VBG"), ("dinner", "NN"), ("now", "RB"), (".", ".")],
        &[("A", "DT"), ("happy", "JJ"), ("cat", "NN"), ("sat", "VBD"), ("on", "IN"), ("a", "DT"), ("chair", "NN"), (".", ".")],
        &[("She", "PRP"), ("walked", "VBD"), ("slowly", "RB"), ("to", "TO"), ("the", "DT"), ("house", "NN"), (".", ".")],
        &[("The", "DT"), ("dogs", "NNS"), ("are", "VBP"), ("barking", "VBG"), (".", ".")],
        &[("He", "PRP"), ("is", "VBZ"), ("a", "DT"), ("good", "JJ"), ("teacher", "NN"), (".", ".")],
        &[("They", "PRP"), ("bought", "VBD"), ("the", "DT"), ("small", "JJ"), ("book", "NN"), (".", ".")],
    ];
    SENTENCES.iter().map(|&s| AnnotatedSentence::from_pairs(s)).collect()
}

/// Textos de demonstração para a interface web.
pub fn demo_texts() -> Vec<&'static str> {
    vec![
        "The small cat is sleeping on the chair.",
        "She bought a beautiful book.",
        "The old teacher walked to the museum.",
        "They are playing in the park.",
        "He is a careful driver.",
    ]
}
