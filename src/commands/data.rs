//! Whole-document export and reset

use std::io::Write;

use crate::{cli::DataCmd, error::LeagueError, Result};

use super::{roster::with_output, CommandContext};

/// Handle the data commands
pub async fn handle_data(ctx: &mut CommandContext, cmd: DataCmd) -> Result<()> {
    match cmd {
        DataCmd::Export { output } => {
            ctx.admin("export league data")?;
            let json = serde_json::to_string_pretty(&ctx.league)?;
            with_output(output.as_deref(), |mut out| {
                writeln!(out, "{}", json)?;
                Ok(())
            })?;
            if let Some(path) = output {
                println!("✓ League exported to {}", path.display());
            }
        }

        DataCmd::Reset { yes } => {
            ctx.admin("reset league data")?;
            if !yes {
                return Err(LeagueError::validation(
                    "Esto borra todos los datos de la liga. Repite con --yes para confirmar.",
                ));
            }
            ctx.store.reset().await;
            println!("✓ League data deleted (source was {})", ctx.source);
        }
    }
    Ok(())
}
