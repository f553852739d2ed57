//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use softball_league::{
    cli::SoftballCli,
    commands::{dispatch, CommandContext},
    Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = SoftballCli::parse();

    let mut ctx = CommandContext::open(app.session).await;
    tracing::debug!(source = %ctx.source, "league ready");
    dispatch(&mut ctx, app.command).await?;

    Ok(())
}
