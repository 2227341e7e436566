//! Send command - issue credentials for a roster and deliver them

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::auth::CredentialIssuer;
use crate::infrastructure::batch::{BatchOrchestrator, RunMode};
use crate::infrastructure::email::BrevoEmailSender;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::render::{load_template, MessageRenderer};
use crate::infrastructure::roster::load_roster;

#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Path to the roster JSON file
    #[arg(long, default_value = "data.json")]
    pub data: PathBuf,

    /// Generate tokens but do not send emails
    #[arg(long, conflicts_with = "output")]
    pub dry_run: bool,

    /// Write tokens to this file instead of sending emails
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only process the member with this exact email address
    #[arg(long)]
    pub to: Option<String>,

    /// Email template path (defaults to the configured template)
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// Run the send command
pub async fn run(args: SendArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let mode = RunMode::from_flags(args.dry_run, args.output.clone());
    let roster = load_roster(&args.data).await?;

    let issuer = CredentialIssuer::new(&config.auth)?;
    let renderer = MessageRenderer::new(&config.links)?;
    let mut orchestrator = BatchOrchestrator::new(issuer, renderer);

    if mode.dispatches() {
        let sender = BrevoEmailSender::new(&config.email)?;
        let template_path = args
            .template
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.email.template_path));
        let template = load_template(&template_path).await?;

        orchestrator = orchestrator
            .with_template(template)
            .with_sender(Arc::new(sender));
    }

    let summary = orchestrator.run(&roster, &mode, args.to.as_deref()).await?;

    if let Some(path) = &summary.output_path {
        println!("Tokens saved to {}", path.display());
    }
    if mode.dispatches() {
        println!(
            "Emails sent: {}, failed: {}",
            summary.delivered, summary.failed
        );
        for (email, result) in &summary.failed_recipients {
            println!("  {}: {}", email, result);
        }
    }
    if summary.skipped > 0 {
        println!("Skipped {} invalid members", summary.skipped);
    }
    println!("{}", summary);

    if let Some(e) = &summary.output_error {
        anyhow::bail!("Error saving tokens to file: {}", e);
    }

    info!("Send command finished");
    Ok(())
}
