mod cli;
mod gemini_client;
mod model;
mod simulated_client;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::ChatContext;
use crate::model::ModelMode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Prompt to send in a single non-interactive interaction
    #[arg(short, long)]
    input: Option<String>,

    /// Call the hosted Gemini model instead of the local simulator
    #[arg(short, long)]
    live: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a prompt-to-result session
    Chat {
        /// Prompt to send in a single non-interactive interaction
        #[arg(short, long)]
        input: Option<String>,

        /// Call the hosted Gemini model instead of the local simulator
        #[arg(short, long)]
        live: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let (input, live, verbose) = match cli.command {
        Some(Commands::Chat { input, live, verbose }) => (input, live, verbose),
        None => (cli.input, cli.live, cli.verbose),
    };

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let mode = if live {
        ModelMode::Live
    } else {
        ModelMode::Simulated
    };

    info!("Starting Prompt-to-Result CLI in {} mode", mode.label());

    let interactive = input.is_none();
    let mut chat_context = ChatContext::new(Box::new(io::stdout()), input, interactive, mode);
    chat_context.run().await
}
