//! CLI module for Judge Invites
//!
//! Provides subcommands:
//! - `send`: issue judge credentials for a roster and email login links
//! - `verify`: decode a credential with the configured secret

pub mod send;
pub mod verify;

use clap::{Parser, Subcommand};

/// Judge Invites - Issue judge credentials and email one-click login links
#[derive(Parser)]
#[command(name = "judge-invites")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Issue credentials for every roster member and deliver them
    Send(send::SendArgs),

    /// Verify a credential and print its claims
    Verify(verify::VerifyArgs),
}
