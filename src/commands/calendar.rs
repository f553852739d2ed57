//! Match calendar commands

use std::fs::File;
use std::io::BufReader;

use serde::Serialize;

use crate::{
    cli::MatchCmd,
    csv_io::{parse_box_csv, write_box_template},
    error::LeagueError,
    league::{BoxLine, League, Match, MatchDraft, MatchMvp, User},
    MatchId, Result,
};

use super::{roster::with_output, CommandContext};

/// Users allowed to score a match may also run it (status, notes).
fn require_match_editor(user: &User, m: &Match) -> Result<()> {
    if user.can_edit_lineup(&m.local) || user.can_edit_lineup(&m.visitante) {
        return Ok(());
    }
    Err(LeagueError::PermissionDenied {
        action: format!("edit match {}", m.id),
    })
}

fn find_match<'a>(league: &'a League, id: &MatchId) -> Result<&'a Match> {
    league
        .find_match(id)
        .ok_or_else(|| LeagueError::MatchNotFound { id: id.to_string() })
}

fn match_line(league: &League, m: &Match) -> String {
    format!(
        "{:<16} {} {:<5} {:>20} {:>2} - {:<2} {:<20} [{}]",
        m.id,
        m.fecha,
        m.hora,
        league.team_name(&m.local),
        m.local_score,
        m.visit_score,
        league.team_name(&m.visitante),
        m.status
    )
}

#[derive(Serialize)]
struct MatchDetail<'a> {
    #[serde(flatten)]
    game: &'a Match,
    mvp: Option<MatchMvp>,
}

/// Handle the match commands
pub async fn handle_match(ctx: &mut CommandContext, cmd: MatchCmd) -> Result<()> {
    match cmd {
        MatchCmd::List => {
            let groups = ctx.league.calendar_by_month();
            if ctx.session.json {
                let matches: Vec<&Match> = groups.iter().flat_map(|g| g.matches.clone()).collect();
                ctx.print_json(&matches)?;
                return Ok(());
            }
            if groups.is_empty() {
                println!("No matches scheduled.");
            }
            for group in groups {
                println!("== {} ==", group.label);
                for m in group.matches {
                    println!("{}", match_line(&ctx.league, m));
                }
            }
        }

        MatchCmd::Show { id } => {
            let m = find_match(&ctx.league, &id)?;
            let mvp = ctx.league.match_mvp(&id);
            if ctx.print_json(&MatchDetail { game: m, mvp: mvp.clone() })? {
                return Ok(());
            }
            println!("{}", match_line(&ctx.league, m));
            if !m.campo.is_empty() || !m.arbitro.is_empty() {
                println!("Campo: {}  Árbitro: {}", m.campo, m.arbitro);
            }
            if let Some(jornada) = &m.jornada {
                println!("Jornada {}", jornada);
            }
            if !m.player_stats.is_empty() {
                println!("\n{:<5} {:<24} {:>3} {:>3} {:>3} {:>3} {:>3}", "ID", "Jugador", "AB", "H", "HR", "RBI", "R");
                for (player_id, line) in &m.player_stats {
                    let nombre = ctx
                        .league
                        .player(player_id)
                        .map(|p| p.nombre.as_str())
                        .unwrap_or("?");
                    println!(
                        "{:<5} {:<24} {:>3} {:>3} {:>3} {:>3} {:>3}",
                        player_id, nombre, line.ab, line.h, line.hr, line.rbi, line.r
                    );
                }
            }
            if let Some(mvp) = mvp {
                if let Some(p) = ctx.league.player(&mvp.player_id) {
                    println!("\nMVP: {} ({} pts)", p.nombre, mvp.score);
                }
            }
            if !m.bitacora.is_empty() {
                println!("\nBitácora:\n{}", m.bitacora);
            }
            if !m.change_log.is_empty() {
                println!("\nChanges:");
                for entry in &m.change_log {
                    println!("  {} {}: {}", entry.at.format("%Y-%m-%d %H:%M"), entry.user, entry.action);
                }
            }
            if !m.messages.is_empty() {
                println!("\nMessages:");
                for msg in &m.messages {
                    println!("  {} {}: {}", msg.at.format("%Y-%m-%d %H:%M"), msg.user, msg.text);
                }
            }
        }

        MatchCmd::Add {
            local,
            visitante,
            fecha,
            hora,
            campo,
            jornada,
            arbitro,
        } => {
            ctx.admin("schedule matches")?;
            let id = ctx.league.add_match(MatchDraft {
                local,
                visitante,
                fecha,
                hora,
                campo,
                jornada,
                arbitro,
            })?;
            ctx.commit().await;
            println!("✓ Match scheduled: {}", id);
        }

        MatchCmd::Delete { id } => {
            ctx.admin("delete matches")?;
            ctx.league.delete_match(&id)?;
            ctx.league.recompute_player_stats();
            ctx.commit().await;
            println!("✓ Match deleted: {}", id);
        }

        MatchCmd::Status { id, status } => {
            let user = ctx.current_user()?;
            require_match_editor(&user, find_match(&ctx.league, &id)?)?;
            ctx.league.set_match_status(&id, status)?;
            ctx.league
                .log_change(&id, &user.user, format!("status set to {}", status))?;
            ctx.commit().await;
            println!("✓ Match {} is now {}", id, status);
        }

        MatchCmd::Notes { id, text } => {
            let user = ctx.current_user()?;
            require_match_editor(&user, find_match(&ctx.league, &id)?)?;
            ctx.league.set_match_notes(&id, &text)?;
            ctx.commit().await;
            println!("✓ Notes saved");
        }

        MatchCmd::Message { id, text } => {
            let user = ctx.current_user()?;
            user.require_post_message()?;
            ctx.league.post_message(&id, &user.user, &text)?;
            ctx.commit().await;
            println!("✓ Message posted");
        }

        MatchCmd::Box {
            id,
            player,
            ab,
            h,
            hr,
            rbi,
            r,
        } => {
            let user = ctx.current_user()?;
            let team = ctx
                .league
                .player(&player)
                .map(|p| p.team_id.clone())
                .ok_or_else(|| LeagueError::PlayerNotFound { id: player.to_string() })?;
            user.require_edit_lineup(&team)?;
            ctx.league
                .set_box_line(&id, &player, BoxLine { ab, h, hr, rbi, r })?;
            ctx.league.log_change(
                &id,
                &user.user,
                format!("box score for {}: {} AB {} H {} HR {} RBI {} R", player, ab, h, hr, rbi, r),
            )?;
            ctx.league.sync_lineup_to_player_stats(&id);
            ctx.league.recompute_player_stats();
            ctx.commit().await;
            println!("✓ Box score saved");
        }

        MatchCmd::BoxTemplate { id, output } => {
            let league = &ctx.league;
            let written = with_output(output.as_deref(), |out| write_box_template(league, &id, out))?;
            if output.is_some() {
                println!("✓ {} players written", written);
            }
        }

        MatchCmd::BoxImport { id, file } => {
            let user = ctx.admin("import box scores")?;
            let rows = parse_box_csv(BufReader::new(File::open(&file)?))?;
            let applied = ctx.league.import_box_score(&id, rows)?;
            ctx.league
                .log_change(&id, &user.user, format!("box score imported ({} lines)", applied))?;
            ctx.league.recompute_player_stats();
            ctx.commit().await;
            println!("✓ {} box-score lines imported", applied);
        }

        MatchCmd::Mvp { id } => {
            find_match(&ctx.league, &id)?;
            let mvp = ctx.league.match_mvp(&id);
            if ctx.print_json(&mvp)? {
                return Ok(());
            }
            match mvp.and_then(|mvp| ctx.league.player(&mvp.player_id).map(|p| (p, mvp))) {
                Some((p, mvp)) => println!(
                    "MVP: {} ({}) {} pts: {} H, {} R, {} RBI, {} HR",
                    p.nombre,
                    ctx.league.team_name(&p.team_id),
                    mvp.score,
                    mvp.line.h,
                    mvp.line.r,
                    mvp.line.rbi,
                    mvp.line.hr
                ),
                None => println!("No MVP yet."),
            }
        }
    }
    Ok(())
}
