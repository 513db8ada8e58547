mod cli;

use anyhow::{Context, Result};
use cfn_transcoder_pipeline::event::{LifecycleEvent, RequestType};
use cfn_transcoder_pipeline::transcoder::ElasticTranscoderClient;
use cfn_transcoder_pipeline::{config, PipelineHandler};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cfn_transcoder_pipeline=trace,aws_config=debug".to_string()
        } else {
            "cfn_transcoder_pipeline=info,aws_config=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Handle { event } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(handle_event(&event, cli.config.as_deref()))
        }
        Commands::Validate { event } => validate_event(&event),
        Commands::Version => {
            println!("cfn-transcoder-pipeline {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_event(path: &Path) -> Result<LifecycleEvent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {:?}", path))?;
    let event: LifecycleEvent = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event file: {:?}", path))?;
    Ok(event)
}

async fn handle_event(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let event = load_event(path)?;
    let config = config::load_config_or_default(config_path)?;

    let api = ElasticTranscoderClient::new(&config).await;
    let handler = PipelineHandler::new(Arc::new(api));

    let request_type = event
        .request_type
        .ok_or_else(|| anyhow::anyhow!("Event has no RequestType"))?;

    // CloudFormation validates before mutating; the local harness does the same.
    match request_type {
        RequestType::Create => {
            handler.validate(&event)?;
            let data = handler.create(&event).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        RequestType::Update => {
            handler.validate(&event)?;
            let data = handler.update(&event).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        RequestType::Delete => {
            handler.delete(&event).await?;
            println!("Pipeline deleted");
        }
    }

    Ok(())
}

fn validate_event(path: &Path) -> Result<()> {
    let event = load_event(path)?;
    cfn_transcoder_pipeline::handler::validate(&event)?;

    println!("✓ Event is valid");
    Ok(())
}
