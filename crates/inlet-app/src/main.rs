//! Inlet application binary - composition root.
//!
//! Ties the Inlet crates together into a single executable:
//! 1. Load configuration from TOML
//! 2. Initialize tracing from config and flags
//! 3. Dispatch the subcommand:
//!    - `classify` (intent waterfall plus the confirmation flow)
//!    - `clean` (five-stage transcript cleaner)
//!    - `capture` (voice capture session over the platform source)

mod cli;

use std::io::{Read, Write};

use clap::Parser;

use inlet_core::{InletConfig, InletError};
use inlet_dictation::{CaptureService, SessionEvent, UnsupportedSource};
use inlet_intent::{Classification, ConfirmationRequest, Dispatch, IntentKey};

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config = InletConfig::load_or_default(&config_file);

    // Logs go to stderr so piped command output stays clean.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    if let Err(err) = run(args, config).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(args: CliArgs, config: InletConfig) -> inlet_core::Result<()> {
    match args.command {
        Command::Classify { text, json } => classify(&read_input(text)?, json),
        Command::Clean { text } => {
            println!("{}", inlet_cleaner::clean_text(&read_input(text)?));
            Ok(())
        }
        Command::Capture => capture(config).await,
    }
}

/// Use the argument when given, otherwise read all of stdin.
fn read_input(text: Option<String>) -> inlet_core::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Classify input text, escalating to an interactive choice when the
/// waterfall is not confident enough.
fn classify(input: &str, json: bool) -> inlet_core::Result<()> {
    let dispatch = inlet_intent::route(input)
        .ok_or_else(|| InletError::Intent("Nothing to classify".to_string()))?;

    let classification = match dispatch {
        Dispatch::Immediate(classification) => classification,
        Dispatch::NeedsChoice(request) => prompt_choice(request)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
    } else {
        let intent = classification.intent.info();
        println!("{}  ({})", intent.label, classification.intent);
        println!("  pipeline:   {}", intent.pipeline);
        println!("  confidence: {:.2}", classification.confidence);
        println!("  level:      {}", classification.level);
        println!("  reason:     {}", classification.reason);
    }
    Ok(())
}

/// Print the proposed intent and its alternatives, then read the user's
/// choice from stdin.
fn prompt_choice(request: ConfirmationRequest) -> inlet_core::Result<Classification> {
    println!(
        "Not confident ({:.2} for {}). Pick an intent:",
        request.proposed.confidence, request.proposed.intent
    );
    for option in &request.options {
        println!("  {:<12} {}", option.key.to_string(), option.label);
    }
    print!("> ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let choice = line
        .trim()
        .parse::<IntentKey>()
        .map_err(InletError::Intent)?;

    Ok(request.confirm(choice))
}

/// Run a capture session until it completes, printing live previews.
///
/// The only in-tree source is the unsupported stub, so on platforms
/// without a speech backend this reports `NotSupported` through the
/// normal error path.
async fn capture(config: InletConfig) -> inlet_core::Result<()> {
    let mut service = CaptureService::new(config.capture);
    let (handle, mut events) = service.start(UnsupportedSource).await?;
    tracing::info!(session_id = %handle.id(), "Capture session running; stay silent to finish");

    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Preview(update) => println!("... {}", update.cleaned),
            SessionEvent::Error(code) => eprintln!("recognition error: {}", code),
            SessionEvent::Completed(result) => {
                println!("{}", result.cleaned);
                tracing::info!(chunks = result.chunks.len(), "Capture finished");
            }
        }
    }
    Ok(())
}
