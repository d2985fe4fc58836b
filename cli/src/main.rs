//! CLI entrypoint for llm-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use council_application::{
    ConversationLogger, CouncilConfig, DeleteConversationUseCase, ListConversationsUseCase,
    LoadConversationUseCase, NoConversationLogger, NoProgress, ProgressNotifier,
    RunSynthesisInput, RunSynthesisUseCase, SaveConversationUseCase,
};
use council_domain::{PromptTemplate, SessionRecord, aggregate};
use council_infrastructure::{
    ConfigLoader, FileConfig, JsonFileConversationStore, JsonlConversationLogger,
};
use council_presentation::{Cli, Command, OutputConfig, OutputFormatter, ProgressReporter, formatter_for};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // Logs go to stderr so JSON output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting llm-council");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    check_config(&config)?;

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        config.output.format,
        config.output.color,
        cli.quiet,
    );
    output.apply_color();
    let formatter = formatter_for(output.format);

    // === Dependency Injection ===
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolve_data_dir());
    info!("Conversations stored in {}", data_dir.display());
    let store = Arc::new(JsonFileConversationStore::new(data_dir));
    let logger = conversation_logger(&config);

    match command {
        Command::Synthesize { input, no_save } => {
            let request: RunSynthesisInput = read_json(&input)?;
            let council = CouncilConfig {
                auto_save: config.auto_save && !no_save,
                timeout: Some(Duration::from_secs(config.synthesizer.timeout_seconds)),
            };

            let gateway = synthesis_gateway(&config)?;
            let use_case = RunSynthesisUseCase::new(gateway, store)
                .with_config(council)
                .with_logger(logger);

            let progress: Box<dyn ProgressNotifier> = if output.show_progress {
                Box::new(ProgressReporter::new())
            } else {
                Box::new(NoProgress)
            };

            let outcome = use_case
                .execute_with_progress(request.clone(), progress.as_ref())
                .await?;
            print!("{}", formatter.format_synthesis(&request, &outcome));
        }

        Command::Rank { input } => {
            let request: RunSynthesisInput = read_json(&input)?;
            request.validate()?;
            let rankings = aggregate(&request.stage1_responses, &request.stage2_reviews);
            print!("{}", formatter.format_leaderboard(&request.question, &rankings));
        }

        Command::Prompt { input } => {
            let request: RunSynthesisInput = read_json(&input)?;
            request.validate()?;
            println!(
                "{}",
                PromptTemplate::review_prompt(&request.question, &request.stage1_responses)
            );
        }

        Command::Save { input } => {
            let session: SessionRecord = read_json(&input)?;
            let view = SaveConversationUseCase::new(store, config.synthesizer.resolve_model())
                .with_logger(logger)
                .execute(session)
                .await?;
            print!("{}", formatter.format_saved(&view));
        }

        Command::List => {
            let summaries = ListConversationsUseCase::new(store).execute().await?;
            print!("{}", formatter.format_conversation_list(&summaries));
        }

        Command::Show { id } => {
            let Some(view) = LoadConversationUseCase::new(store).execute(&id).await? else {
                bail!("Conversation not found: {}", id);
            };
            print!("{}", formatter.format_conversation(&view));
        }

        Command::Delete { id } => {
            let deleted = DeleteConversationUseCase::new(store)
                .with_logger(logger)
                .execute(&id)
                .await?;
            if !deleted {
                bail!("Conversation not found: {}", id);
            }
            print!("{}", formatter.format_deleted(&id));
        }
    }

    Ok(())
}

/// Warn about every config issue; refuse to run on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }

    let errors: Vec<&str> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    config
        .logging
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::new)
        .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>)
        .unwrap_or_else(|| Arc::new(NoConversationLogger))
}

#[cfg(feature = "gemini")]
fn synthesis_gateway(
    config: &FileConfig,
) -> Result<Arc<dyn council_application::SynthesisGateway>> {
    let gateway = council_infrastructure::GeminiGateway::from_config(&config.synthesizer)?;
    Ok(Arc::new(gateway))
}

#[cfg(not(feature = "gemini"))]
fn synthesis_gateway(
    _config: &FileConfig,
) -> Result<Arc<dyn council_application::SynthesisGateway>> {
    bail!("llm-council was built without the `gemini` feature; synthesis is unavailable")
}

/// Read and decode a JSON file, or stdin when `path` is `-`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}
