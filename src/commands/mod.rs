//! Command implementations for the softball league CLI

pub mod calendar;
pub mod common;
pub mod data;
pub mod lineup;
pub mod roster;
pub mod standings;


use crate::{
    cli::Commands, error::LeagueError, Result, SOFTBALL_PASS, SOFTBALL_USER,
};

pub use common::CommandContext;

/// Resolve login credentials from options or environment variables
pub fn resolve_credentials(user: Option<&str>, pass: Option<&str>) -> Result<(String, String)> {
    let user = from_option_or_env(user, SOFTBALL_USER)?;
    let pass = from_option_or_env(pass, SOFTBALL_PASS)?;
    Ok((user, pass))
}

fn from_option_or_env(value: Option<&str>, env_var: &str) -> Result<String> {
    value
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LeagueError::MissingCredentials {
            env_var: env_var.to_string(),
        })
}

/// Route a parsed command to its handler
pub async fn dispatch(ctx: &mut CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Team { cmd } => roster::handle_team(ctx, cmd).await,
        Commands::Player { cmd } => roster::handle_player(ctx, cmd).await,
        Commands::Roster { cmd } => roster::handle_roster(ctx, cmd).await,
        Commands::Match { cmd } => calendar::handle_match(ctx, cmd).await,
        Commands::Lineup { cmd } => lineup::handle_lineup(ctx, cmd).await,
        Commands::Standings { cmd } => standings::handle_standings(ctx, cmd).await,
        Commands::Leaders {
            category,
            min_ab,
            limit,
        } => standings::handle_leaders(ctx, category, min_ab, limit),
        Commands::Recompute => standings::handle_recompute(ctx).await,
        Commands::Data { cmd } => data::handle_data(ctx, cmd).await,
    }
}
