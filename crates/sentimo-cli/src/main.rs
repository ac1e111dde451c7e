mod display;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sentimo_ai::{ArtifactPaths, Pipeline, SentimentClassifier};
use sentimo_core::{PredictBody, is_blank, normalize};
use sentimo_server::ServerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sentimo", version, about = "Movie review sentiment service")]
struct Cli {
    #[command(flatten)]
    artifacts: ArtifactArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ArtifactArgs {
    /// Fitted classifier artifact.
    #[arg(
        long,
        env = "SENTIMO_MODEL",
        default_value = sentimo_ai::DEFAULT_MODEL_FILE,
        global = true
    )]
    model: PathBuf,

    /// Fitted TF-IDF vectorizer artifact.
    #[arg(
        long,
        env = "SENTIMO_VECTORIZER",
        default_value = sentimo_ai::DEFAULT_VECTORIZER_FILE,
        global = true
    )]
    vectorizer: PathBuf,
}

impl ArtifactArgs {
    fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model.clone(),
            vectorizer: self.vectorizer.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        #[arg(long, env = "SENTIMO_HOST", default_value = sentimo_server::DEFAULT_HOST)]
        host: String,

        #[arg(long, env = "SENTIMO_PORT", default_value_t = sentimo_server::DEFAULT_PORT)]
        port: u16,
    },
    /// Classify one review and print the result.
    Classify {
        text: String,

        /// Print the JSON body `/predict` would return.
        #[arg(long)]
        json: bool,
    },
    /// Load the artifacts and print what they contain.
    Inspect,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = cli.artifacts.paths();

    match cli.command {
        Command::Serve { host, port } => {
            tracing::info!("sentimo v{}", env!("CARGO_PKG_VERSION"));
            let pipeline = load_pipeline(&paths)?;
            sentimo_server::serve(&ServerConfig { host, port }, Arc::new(pipeline)).await
        }
        Command::Classify { text, json } => {
            anyhow::ensure!(!is_blank(&text), "Text cannot be empty");
            let pipeline = load_pipeline(&paths)?;
            let prediction = pipeline.classify(&text)?;

            if json {
                let body = PredictBody::new(text, prediction);
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                let cleaned = normalize(&text);
                print!("{}", display::render_prediction(&text, &cleaned, &prediction));
            }
            Ok(())
        }
        Command::Inspect => {
            let pipeline = load_pipeline(&paths)?;
            print!("{}", display::render_summary(&paths, &pipeline.summary()));
            Ok(())
        }
    }
}

fn load_pipeline(paths: &ArtifactPaths) -> anyhow::Result<Pipeline> {
    Pipeline::load(paths).with_context(|| {
        format!(
            "loading model artifacts ({} and {})",
            paths.vectorizer.display(),
            paths.model.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["sentimo", "serve"]).unwrap();
        let paths = cli.artifacts.paths();
        assert_eq!(paths.model, PathBuf::from("sentiment_model.json"));
        assert_eq!(paths.vectorizer, PathBuf::from("tfidf_vectorizer.json"));
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(ServerConfig { host, port }, ServerConfig::default());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn artifact_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sentimo",
            "classify",
            "great film",
            "--json",
            "--model",
            "models/sentiment_model.json",
        ])
        .unwrap();
        assert_eq!(
            cli.artifacts.model,
            PathBuf::from("models/sentiment_model.json")
        );
        match cli.command {
            Command::Classify { text, json } => {
                assert_eq!(text, "great film");
                assert!(json);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["sentimo"]).is_err());
    }
}
