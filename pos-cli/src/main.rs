//! # postag — CLI do Etiquetador HMM
//!
//! Dois modos, como subcomandos:
//!
//! | Comando | Entrada | Saída |
//! |---------|---------|-------|
//! | `train` | corpus `palavra<TAB>tag`, sentenças separadas por linha vazia | modelo JSON (`-s`) |
//! | `tag`   | uma palavra por linha (só a primeira coluna é lida) | `palavra<TAB>tag` (`-o`) |
//!
//! O nível de log vem de `RUST_LOG` (padrão `info`).

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pos_core::config::DEFAULT_UNSEEN_EMISSION;
use pos_core::corpus::{read_training_corpus, read_untagged, write_tagged};
use pos_core::{train, DecoderConfig, Error, PosTagger, Result, TrainedModel};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "postag", version, about = "HMM part-of-speech tagger")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train a model from a tab-separated annotated corpus.
    Train {
        corpus: PathBuf,
        #[arg(short, long, default_value = "states.json")]
        states: PathBuf,
    },
    /// Tag a one-word-per-line file with a trained model.
    Tag {
        input: PathBuf,
        #[arg(short, long, default_value = "states.json")]
        states: PathBuf,
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,
        /// Emission used for words never seen in training.
        #[arg(long, default_value_t = DEFAULT_UNSEEN_EMISSION)]
        unseen_emission: f64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Train { corpus, states } => run_train(&corpus, &states),
        Command::Tag { input, states, output, unseen_emission } => {
            run_tag(&input, &states, &output, unseen_emission)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("postag: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_train(corpus: &Path, states: &Path) -> Result<()> {
    let sentences = read_training_corpus(corpus)?;
    info!(sentences = sentences.len(), path = %corpus.display(), "corpus loaded");

    let model = train(&sentences);
    println!(
        "{} distinct words, {} tags",
        model.vocabulary_size(),
        model.labels().count()
    );
    println!(
        "{} transition pairs, {} emission pairs",
        model.transition_count(),
        model.emission_count()
    );

    model.save(states)?;
    println!("model written to {}", states.display());
    Ok(())
}

fn run_tag(input: &Path, states: &Path, output: &Path, unseen_emission: f64) -> Result<()> {
    let config = DecoderConfig::new(unseen_emission)?;
    let model = TrainedModel::load(states)?;
    let tagger = PosTagger::new(model, config);

    let sentences = read_untagged(input)?;
    let tagged = tagger.tag_sentences(&sentences);
    let failed = tagged.iter().filter(|s| !s.words.is_empty() && !s.is_tagged()).count();

    let file = File::create(output).map_err(Error::OutputWrite)?;
    write_tagged(BufWriter::new(file), &tagged)?;

    println!("{} sentences tagged, {} without a path", tagged.len() - failed, failed);
    println!("output written to {}", output.display());
    Ok(())
}
