//! # pos-core — Etiquetador Morfossintático (POS) com HMM
//!
//! Este crate implementa um etiquetador de classes gramaticais baseado em um
//! Hidden Markov Model de primeira ordem, decodificado com o algoritmo de
//! Viterbi. As tags são os estados ocultos; as palavras são as emissões.
//!
//! ## Arquitetura
//!
//! Dois pipelines independentes compartilham o mesmo modelo de dados:
//!
//! 1.  **Treino** ([`pipeline::train`]):
//!     *   **Contagem** ([`counts`]): transições entre tags, emissões palavra/tag e marginais.
//!     *   **Palavras Desconhecidas** ([`unknown`]): palavras vistas uma única vez viram classes de sufixo.
//!     *   **Estimação** ([`estimator`]): contagens viram probabilidades de máxima verossimilhança.
//! 2.  **Etiquetagem** ([`viterbi`]): o modelo treinado ([`model`]) é carregado e cada
//!     sentença é decodificada de forma independente.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use pos_core::{corpus::sample_corpus, PosTagger};
//!
//! // 1. Treina no corpus de exemplo (pares palavra/tag)
//! let tagger = PosTagger::from_corpus(&sample_corpus());
//!
//! // 2. Etiqueta uma sentença já tokenizada
//! let tagged = tagger.tag_sentence(&["She", "is", "reading", "a", "book", "."]);
//!
//! // 3. Uma tag por palavra
//! for (word, tag) in tagged.pairs() {
//!     println!("{word}\t{tag}");
//! }
//! ```
//!
//! ## Módulos de E/S
//!
//! - [`corpus`]: leitura e escrita do formato `palavra<TAB>tag`.
//! - [`model`]: persistência do modelo em JSON.
//! - [`tokenizer`]: segmentação de texto livre para o servidor web.

pub mod config;
pub mod corpus;
pub mod counts;
pub mod error;
pub mod estimator;
pub mod model;
pub mod pipeline;
pub mod tag;
pub mod tokenizer;
pub mod unknown;
pub mod viterbi;

pub use config::DecoderConfig;
pub use corpus::{AnnotatedSentence, TaggedSentence};
pub use error::{Error, Result};
pub use model::TrainedModel;
pub use pipeline::{train, PosTagger};
pub use tag::{Observation, Tag};
pub use unknown::WordClass;
pub use viterbi::{ViterbiDecoder, ViterbiResult};
