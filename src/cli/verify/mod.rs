//! Verify command - decode a judge credential with the configured secret

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::auth::CredentialIssuer;
use crate::infrastructure::logging::init_logging;

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// The token to verify (the `auth` query parameter of a login link)
    pub token: String,
}

/// Run the verify command
pub async fn run(args: VerifyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let issuer = CredentialIssuer::new(&config.auth)?;
    let claims = issuer
        .verify(args.token.trim())
        .context("Token verification failed")?;

    println!("{}", serde_json::to_string_pretty(&claims)?);
    if let Some(expires_at) = claims.expires_at_utc() {
        println!("Expires at {}", expires_at.to_rfc3339());
    }

    Ok(())
}
