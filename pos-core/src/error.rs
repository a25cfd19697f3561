//! # Erros das Camadas de E/S
//!
//! Os algoritmos do núcleo (contagem, classes de palavras desconhecidas,
//! estimação e Viterbi) nunca falham: entradas degeneradas viram coleções
//! vazias. Apenas os colaboradores de E/S (leitura do corpus, persistência do
//! modelo, escrita da saída) produzem erros, e cada origem tem sua variante
//! para que o chamador saiba distinguir "corpus ilegível" de "modelo ilegível".

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result padrão do crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// O arquivo de corpus (treino ou etiquetagem) não pôde ser lido.
    #[error("failed to read corpus '{}': {source}", path.display())]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Linha de treino que não decodifica em um par (palavra, tag).
    #[error("malformed training record at line {line}: {content:?}")]
    MalformedRecord { line: usize, content: String },

    /// O arquivo de modelo não pôde ser aberto ou lido.
    #[error("failed to read model '{}': {source}", path.display())]
    ModelRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// O arquivo de modelo não pôde ser criado ou escrito.
    #[error("failed to write model '{}': {source}", path.display())]
    ModelWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// O conteúdo do modelo não é um JSON válido para [`crate::TrainedModel`].
    #[error("malformed model: {0}")]
    ModelFormat(#[from] serde_json::Error),

    /// Parâmetro de configuração fora do domínio válido.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Falha ao escrever a saída etiquetada.
    #[error("failed to write tagged output: {0}")]
    OutputWrite(#[source] io::Error),
}
