//! Servidor web Axum que expõe o etiquetador HMM via JSON.
//!
//! Rotas:
//!
//! | Método | Rota | Corpo | Resposta |
//! |--------|------|-------|----------|
//! | `POST` | `/tag` | `{"text": "..."}` ou `{"sentences": [["w", ...]]}` | sentenças etiquetadas |
//! | `POST` | `/viterbi` | `{"words": [...]}` | tabela completa do Viterbi |
//! | `GET`  | `/model` | | resumo do modelo carregado |
//! | `GET`  | `/demo-texts` | | textos de demonstração |
//! | `GET`  | `/health` | | `ok` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use pos_core::config::DEFAULT_UNSEEN_EMISSION;
use pos_core::corpus::{demo_texts, sample_corpus};
use pos_core::{train, DecoderConfig, PosTagger, TaggedSentence, TrainedModel};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pos-web", version, about = "HTTP front-end for the HMM tagger")]
struct Args {
    /// Trained model (JSON). Without it the server trains on the built-in sample corpus.
    #[arg(short, long, env = "POSTAG_MODEL")]
    model: Option<PathBuf>,
    #[arg(short, long, env = "POSTAG_ADDR", default_value = "0.0.0.0:3000")]
    addr: SocketAddr,
    #[arg(long, default_value_t = DEFAULT_UNSEEN_EMISSION)]
    unseen_emission: f64,
}

/// Estado compartilhado da aplicação
struct AppState {
    tagger: PosTagger,
}

#[derive(Deserialize)]
struct TagRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    sentences: Option<Vec<Vec<String>>>,
}

/// Entrada de `/tag` já validada.
#[derive(Debug, PartialEq)]
enum Input {
    Text(String),
    Sentences(Vec<Vec<String>>),
}

impl TagRequest {
    /// Texto não vazio tem prioridade; senão usa `sentences` se alguma
    /// sentença tiver palavras. `None` vira 400.
    fn into_input(self) -> Option<Input> {
        match (self.text, self.sentences) {
            (Some(text), _) if !text.trim().is_empty() => Some(Input::Text(text)),
            (_, Some(sentences)) if sentences.iter().any(|s| !s.is_empty()) => {
                Some(Input::Sentences(sentences))
            }
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct TagResponse {
    sentences: Vec<TaggedSentence>,
    total_tokens: usize,
}

#[derive(Deserialize)]
struct ViterbiRequest {
    words: Vec<String>,
}

#[derive(Serialize)]
struct ModelSummary {
    tags: Vec<String>,
    vocabulary_size: usize,
    transitions: usize,
    emissions: usize,
    unseen_emission: f64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = DecoderConfig::new(args.unseen_emission)?;
    let model = match &args.model {
        Some(path) => TrainedModel::load(path)?,
        None => {
            info!("no model given, training on the sample corpus");
            train(&sample_corpus())
        }
    };
    let state = Arc::new(AppState {
        tagger: PosTagger::new(model, config),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/tag", post(tag_handler))
        .route("/viterbi", post(viterbi_handler))
        .route("/model", get(model_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!("servidor POS iniciado em http://{}", args.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Etiqueta texto livre ou sentenças já tokenizadas
async fn tag_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TagRequest>,
) -> Response {
    let Some(input) = req.into_input() else {
        return bad_request("texto vazio");
    };

    // Viterbi é síncrono e CPU-bound: roda fora do runtime
    let worker = Arc::clone(&state);
    let handle = tokio::task::spawn_blocking(move || match input {
        Input::Text(text) => worker.tagger.tag_text(&text),
        Input::Sentences(sentences) => worker.tagger.tag_sentences(&sentences),
    });

    match handle.await {
        Ok(sentences) => {
            let total_tokens = sentences.iter().map(|s| s.words.len()).sum();
            Json(TagResponse { sentences, total_tokens }).into_response()
        }
        Err(err) => {
            error!("tagging task failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Retorna a tabela completa do Viterbi para uma sentença
async fn viterbi_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ViterbiRequest>,
) -> Response {
    let worker = Arc::clone(&state);
    match tokio::task::spawn_blocking(move || worker.tagger.viterbi(&req.words)).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            error!("viterbi task failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn model_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let model = state.tagger.model();
    Json(ModelSummary {
        tags: model.labels().map(ToString::to_string).collect(),
        vocabulary_size: model.vocabulary_size(),
        transitions: model.transition_count(),
        emissions: model.emission_count(),
        unseen_emission: state.tagger.config().unseen_emission,
    })
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    Json(demo_texts())
}

async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> TagRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert_eq!(request(r#"{"text": "   "}"#).into_input(), None);
        assert_eq!(request("{}").into_input(), None);
        assert_eq!(request(r#"{"sentences": [[], []]}"#).into_input(), None);
    }

    #[test]
    fn test_text_takes_priority() {
        let input = request(r#"{"text": "The dog runs.", "sentences": [["a"]]}"#).into_input();
        assert_eq!(input, Some(Input::Text("The dog runs.".to_string())));
    }

    #[test]
    fn test_blank_text_falls_back_to_sentences() {
        let input = request(r#"{"text": "", "sentences": [["The", "dog"], []]}"#).into_input();
        assert_eq!(
            input,
            Some(Input::Sentences(vec![
                vec!["The".to_string(), "dog".to_string()],
                vec![],
            ]))
        );
    }
}
