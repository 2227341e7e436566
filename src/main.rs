use clap::Parser;
use judge_invites::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Send(args) => cli::send::run(args).await,
        Command::Verify(args) => cli::verify::run(args).await,
    }
}
