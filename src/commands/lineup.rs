//! Lineup and scorecard commands

use serde::Serialize;

use crate::{
    cli::{LineupCmd, LineupTarget},
    error::LeagueError,
    league::{
        batting_summary, BattingSummary, DefenseTally, League, LineupEntry, TurnFlags, User,
        TURN_SLOTS,
    },
    Result,
};

use super::CommandContext;

#[derive(Serialize)]
struct LineupRow<'a> {
    #[serde(flatten)]
    entry: &'a LineupEntry,
    nombre: String,
    summary: BattingSummary,
}

fn turn_codes(entry: &LineupEntry) -> String {
    (0..TURN_SLOTS)
        .map(|slot| {
            entry
                .turns
                .get(slot)
                .and_then(|t| t.result)
                .map_or("-", |r| r.code())
        })
        .map(|code| format!("{:<5}", code))
        .collect::<Vec<_>>()
        .join(" ")
}

fn show_lineup(ctx: &CommandContext, target: &LineupTarget) -> Result<()> {
    let m = ctx
        .league
        .find_match(&target.match_id)
        .ok_or_else(|| LeagueError::MatchNotFound {
            id: target.match_id.to_string(),
        })?;
    let rows: Vec<LineupRow<'_>> = m
        .batting_order(&target.team)
        .into_iter()
        .map(|entry| LineupRow {
            entry,
            nombre: ctx
                .league
                .player(&entry.player_id)
                .map(|p| p.nombre.clone())
                .unwrap_or_else(|| entry.player_id.to_string()),
            summary: batting_summary(&entry.turns),
        })
        .collect();
    if ctx.print_json(&rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No lineup yet. Run `lineup init {} {}`.", target.match_id, target.team);
        return Ok(());
    }

    println!("{} vs {}", ctx.league.team_name(&m.local), ctx.league.team_name(&m.visitante));
    for row in &rows {
        let s = &row.summary;
        println!(
            "{:>2} {:<5} {:<22} {:<4} {:<10} {} | {}-{} {} R {} RBI {}",
            row.entry.batting_order,
            row.entry.player_id,
            row.nombre,
            row.entry.field_position,
            row.entry.status.to_string(),
            turn_codes(row.entry),
            s.h,
            s.ab,
            s.avg,
            s.r,
            s.rbi
        );
    }
    Ok(())
}

/// Handle the lineup commands
///
/// Showing a lineup needs no login. Every edit needs a user who may edit the
/// team's lineup. After a change the match box score and the season totals
/// are rebuilt before saving.
pub async fn handle_lineup(ctx: &mut CommandContext, cmd: LineupCmd) -> Result<()> {
    match cmd {
        LineupCmd::Show { target } => show_lineup(ctx, &target),
        edit => edit_lineup(ctx, edit).await,
    }
}

async fn edit_lineup(ctx: &mut CommandContext, cmd: LineupCmd) -> Result<()> {
    let user = ctx.current_user()?;
    let Some((target, changed, action)) = apply_edit(&mut ctx.league, &user, cmd)? else {
        return Ok(());
    };

    if !changed {
        println!("No changes");
        return Ok(());
    }

    ctx.league.log_change(&target.match_id, &user.user, action)?;
    ctx.league.sync_lineup_to_player_stats(&target.match_id);
    ctx.league.recompute_player_stats();
    ctx.commit().await;
    println!("✓ Lineup updated");
    Ok(())
}

/// Apply one lineup edit, returning the edited target, whether anything
/// changed and the change-log text. `Show` edits nothing.
fn apply_edit(
    league: &mut League,
    user: &User,
    cmd: LineupCmd,
) -> Result<Option<(LineupTarget, bool, String)>> {
    let edit = match cmd {
        LineupCmd::Show { .. } => return Ok(None),
        LineupCmd::Init { target } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.init_lineup(&target.match_id, &target.team);
            (target, changed, "lineup created".to_string())
        }
        LineupCmd::Cycle { target, player } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.cycle_status(&target.match_id, &target.team, &player);
            (target, changed, format!("status of {} cycled", player))
        }
        LineupCmd::Status {
            target,
            player,
            status,
        } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.set_status(&target.match_id, &target.team, &player, status);
            (target, changed, format!("{} set to {}", player, status))
        }
        LineupCmd::Sub {
            target,
            out,
            incoming,
        } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.make_substitution(&target.match_id, &target.team, &out, &incoming);
            (target, changed, format!("{} replaced by {}", out, incoming))
        }
        LineupCmd::Order {
            target,
            player,
            order,
        } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.set_batting_order(&target.match_id, &target.team, &player, order);
            (target, changed, format!("{} bats #{}", player, order))
        }
        LineupCmd::Move {
            target,
            player,
            direction,
        } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.move_entry(&target.match_id, &target.team, &player, direction);
            (target, changed, format!("{} moved {:?}", player, direction).to_lowercase())
        }
        LineupCmd::Turn {
            target,
            player,
            slot,
            result,
        } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.toggle_turn_result(
                &target.match_id,
                &target.team,
                &player,
                usize::from(slot) - 1,
                result,
            );
            (target, changed, format!("turn {} of {}: {}", slot, player, result))
        }
        LineupCmd::Flags {
            target,
            player,
            slot,
            sb,
            run,
            rbi,
            dir,
        } => {
            user.require_edit_lineup(&target.team)?;
            let flags = TurnFlags {
                stolen_base: sb,
                scored_run: run,
                rbi,
                hit_direction: dir,
            };
            let changed = league.set_turn_flags(
                &target.match_id,
                &target.team,
                &player,
                usize::from(slot) - 1,
                flags,
            );
            (target, changed, format!("turn {} flags of {}", slot, player))
        }
        LineupCmd::Position {
            target,
            player,
            position,
        } => {
            user.require_edit_lineup(&target.team)?;
            let changed =
                league.set_field_position(&target.match_id, &target.team, &player, &position);
            (target, changed, format!("{} plays {}", player, position))
        }
        LineupCmd::Swap { target, a, b } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.swap_field_positions(&target.match_id, &target.team, &a, &b);
            (target, changed, format!("positions of {} and {} swapped", a, b))
        }
        LineupCmd::Defense {
            target,
            player,
            outs,
            errors,
            assists,
        } => {
            user.require_edit_lineup(&target.team)?;
            let tally = DefenseTally {
                outs,
                errors,
                assists,
            };
            let changed = league.set_defense(&target.match_id, &target.team, &player, tally);
            (target, changed, format!("defense of {}", player))
        }
        LineupCmd::Add { target, player } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.add_to_lineup(&target.match_id, &target.team, &player);
            (target, changed, format!("{} added", player))
        }
        LineupCmd::Remove { target, player } => {
            user.require_edit_lineup(&target.team)?;
            let changed = league.remove_from_lineup(&target.match_id, &target.team, &player);
            (target, changed, format!("{} removed", player))
        }
    };
    Ok(Some(edit))
}
