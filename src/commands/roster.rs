//! Team, player and roster-file commands

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::{
    cli::{PlayerCmd, PlayerFields, RosterCmd, TeamCmd, TeamFields},
    csv_io::{parse_roster_csv, write_roster_csv, write_roster_template},
    error::LeagueError,
    league::{Player, PlayerDraft, TeamDraft},
    Result,
};

use super::CommandContext;

fn team_draft(nombre: Option<String>, fields: TeamFields) -> TeamDraft {
    TeamDraft {
        nombre,
        escudo: fields.escudo,
        color: fields.color,
        imagen: fields.imagen,
        entrenador: fields.entrenador,
        email: fields.email,
        telefono: fields.telefono,
    }
}

fn player_draft(nombre: Option<String>, team: Option<crate::TeamId>, fields: PlayerFields) -> PlayerDraft {
    PlayerDraft {
        nombre,
        dorsal: fields.dorsal,
        team_id: team,
        posicion: fields.posicion,
        estado: fields.estado,
        verificado: None,
        altura: fields.altura,
        peso: fields.peso,
        edad: fields.edad,
        foto: fields.foto,
        stats: None,
    }
}

fn player_line(ctx: &CommandContext, p: &Player) -> String {
    format!(
        "{:<5} #{:<3} {:<24} {:<18} {:<10} {:<10} {}{}",
        p.id,
        p.dorsal,
        p.nombre,
        ctx.league.team_name(&p.team_id),
        p.posicion,
        p.estado.to_string(),
        p.stats.avg,
        if p.verificado { "" } else { "  (pending approval)" }
    )
}

/// Write to a file when a path is given, otherwise to stdout
pub(crate) fn with_output<T>(
    output: Option<&Path>,
    write: impl FnOnce(Box<dyn Write>) -> Result<T>,
) -> Result<T> {
    match output {
        Some(path) => write(Box::new(File::create(path)?)),
        None => write(Box::new(std::io::stdout().lock())),
    }
}

/// Handle the team commands
pub async fn handle_team(ctx: &mut CommandContext, cmd: TeamCmd) -> Result<()> {
    match cmd {
        TeamCmd::List => {
            if ctx.print_json(&ctx.league.teams)? {
                return Ok(());
            }
            for t in &ctx.league.teams {
                let players = ctx.league.team_players(&t.id).count();
                println!("{:<20} {} {} ({} players)", t.id, t.escudo, t.nombre, players);
            }
        }

        TeamCmd::Add { nombre, fields } => {
            ctx.admin("create teams")?;
            let id = ctx.league.add_team(team_draft(Some(nombre), fields))?;
            ctx.commit().await;
            println!("✓ Team created: {}", id);
        }

        TeamCmd::Update { id, nombre, fields } => {
            ctx.admin("edit teams")?;
            ctx.league.update_team(&id, team_draft(nombre, fields))?;
            ctx.commit().await;
            println!("✓ Team updated: {}", id);
        }

        TeamCmd::Delete { id, cascade } => {
            ctx.admin("delete teams")?;
            ctx.league.delete_team(&id, cascade)?;
            ctx.league.recompute_player_stats();
            ctx.commit().await;
            println!("✓ Team deleted: {}", id);
        }
    }
    Ok(())
}

/// Handle the player commands
pub async fn handle_player(ctx: &mut CommandContext, cmd: PlayerCmd) -> Result<()> {
    match cmd {
        PlayerCmd::List { team } => {
            let players: Vec<&Player> = ctx
                .league
                .players
                .iter()
                .filter(|p| team.as_ref().map_or(true, |t| &p.team_id == t))
                .collect();
            if ctx.print_json(&players)? {
                return Ok(());
            }
            for p in players {
                println!("{}", player_line(ctx, p));
            }
        }

        PlayerCmd::Show { id } => {
            let player = ctx
                .league
                .player(&id)
                .ok_or_else(|| LeagueError::PlayerNotFound { id: id.to_string() })?;
            if ctx.print_json(player)? {
                return Ok(());
            }
            println!("{}", player_line(ctx, player));
            let s = &player.stats;
            println!(
                "AVG {}  PA {}  AB {}  H {}  2B {}  3B {}  HR {}  RBI {}  R {}  BB {}  K {}  SB {}",
                s.avg, s.pa, s.ab, s.h, s.doubles, s.triples, s.hr, s.rbi, s.r, s.bb, s.k, s.sb
            );
        }

        PlayerCmd::Add {
            nombre,
            team,
            fields,
            approved,
        } => {
            ctx.admin("register players")?;
            let mut draft = player_draft(Some(nombre), Some(team), fields);
            draft.verificado = Some(approved);
            let id = ctx.league.add_player(draft)?;
            ctx.commit().await;
            println!("✓ Player registered: {}", id);
        }

        PlayerCmd::Update {
            id,
            nombre,
            team,
            fields,
        } => {
            ctx.admin("edit players")?;
            ctx.league.update_player(&id, player_draft(nombre, team, fields))?;
            ctx.commit().await;
            println!("✓ Player updated: {}", id);
        }

        PlayerCmd::ToggleEstado { id } => {
            ctx.admin("change player status")?;
            if !ctx.league.toggle_estado(&id) {
                return Err(LeagueError::PlayerNotFound { id: id.to_string() });
            }
            ctx.commit().await;
            if let Some(p) = ctx.league.player(&id) {
                println!("✓ {} is now {}", p.nombre, p.estado);
            }
        }

        PlayerCmd::ToggleApproved { id } => {
            ctx.admin("approve players")?;
            if !ctx.league.toggle_verificado(&id) {
                return Err(LeagueError::PlayerNotFound { id: id.to_string() });
            }
            ctx.commit().await;
            if let Some(p) = ctx.league.player(&id) {
                let state = if p.verificado { "approved" } else { "pending approval" };
                println!("✓ {} is now {}", p.nombre, state);
            }
        }

        PlayerCmd::Delete { id } => {
            ctx.admin("delete players")?;
            ctx.league.delete_player(&id)?;
            ctx.league.recompute_player_stats();
            ctx.commit().await;
            println!("✓ Player deleted: {}", id);
        }
    }
    Ok(())
}

/// Handle roster file and summary commands
pub async fn handle_roster(ctx: &mut CommandContext, cmd: RosterCmd) -> Result<()> {
    match cmd {
        RosterCmd::Import { file } => {
            ctx.admin("import players")?;
            let rows = parse_roster_csv(BufReader::new(File::open(&file)?))?;
            if rows.is_empty() {
                return Err(LeagueError::validation("Sin datos válidos."));
            }
            let imported = ctx.league.import_roster(rows)?;
            ctx.commit().await;
            println!("✓ {} players imported", imported.len());
        }

        RosterCmd::Export { team, output } => {
            if let Some(team) = &team {
                if ctx.league.team_players(team).next().is_none() {
                    return Err(LeagueError::validation(
                        "Este equipo no tiene jugadores para exportar.",
                    ));
                }
            }
            let league = &ctx.league;
            let written = with_output(output.as_deref(), |out| {
                write_roster_csv(league, team.as_ref(), out)
            })?;
            if output.is_some() {
                println!("✓ {} players exported", written);
            }
        }

        RosterCmd::Template { output } => {
            with_output(output.as_deref(), write_roster_template)?;
        }

        RosterCmd::Summary => {
            let summary = ctx.league.roster_summary();
            if ctx.print_json(&summary)? {
                return Ok(());
            }
            println!("Players:     {}", summary.players);
            println!("Habilitados: {}", summary.habilitados);
            println!("Suspendidos: {}", summary.suspendidos);
            println!("Teams:       {}", summary.teams);
        }
    }
    Ok(())
}
