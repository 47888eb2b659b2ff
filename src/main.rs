use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use podsight::{
    handle_request, load_tag_vocabulary, load_transcript_value, AnthropicClient, AnthropicConfig,
    ModelGateway, Pipeline, Transcript,
};

#[derive(Parser)]
#[command(name = "podsight")]
#[command(author, version, about = "Podcast transcript insight extraction pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full extraction pipeline over a transcript
    Extract {
        /// Input transcript file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Tag vocabulary file ({"tags": [...]} JSON)
        #[arg(short, long)]
        tags: PathBuf,

        /// Output file for the result JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of takeaways to request
        #[arg(long, default_value = "5")]
        takeaways: usize,

        /// Number of quotes to request
        #[arg(long, default_value = "3")]
        quotes: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a transcript file without calling the model backend
    Validate {
        /// Input transcript file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            tags,
            output,
            takeaways,
            quotes,
            verbose,
        } => {
            setup_logging(verbose);
            extract(input, tags, output, takeaways, quotes).await
        }
        Commands::Validate { input, verbose } => {
            setup_logging(verbose);
            validate(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn extract(
    input: PathBuf,
    tags: PathBuf,
    output: Option<PathBuf>,
    takeaways: usize,
    quotes: usize,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let transcript = load_transcript_value(&input).context("Failed to load input transcript")?;

    info!("Loading tag vocabulary from {:?}", tags);
    let vocabulary = load_tag_vocabulary(&tags).context("Failed to load tag vocabulary")?;
    info!("Loaded {} allowed tags", vocabulary.tags.len());

    let config = AnthropicConfig::from_env()?;
    let client = AnthropicClient::new(config);
    let gateway = ModelGateway::new(Arc::new(client));
    let pipeline = Pipeline::new(gateway, vocabulary);

    let event = json!({
        "transcript": transcript,
        "takeaways": takeaways,
        "quotes": quotes,
    });

    let response = handle_request(&pipeline, &event).await;
    if response.status_code != 200 {
        anyhow::bail!(
            "extraction failed with status {}: {}",
            response.status_code,
            response.body
        );
    }

    let rendered = serde_json::to_string_pretty(&response.body)?;
    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            info!("Output written to {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn validate(input: PathBuf) -> Result<()> {
    let value = load_transcript_value(&input).context("Failed to load input transcript")?;

    match Transcript::from_value(&value) {
        Ok(transcript) => {
            println!("Transcript is valid");
            println!("  Episode: {} ({})", transcript.title, transcript.episode_id);
            println!("  Host: {}", transcript.host);
            println!("  Guests: {}", transcript.guests.join(", "));
            println!("  Utterances: {}", transcript.utterances.len());
            Ok(())
        }
        Err(reason) => anyhow::bail!("Transcript is invalid: {}", reason),
    }
}
