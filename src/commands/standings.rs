//! Standings, leader boards and season recompute

use crate::{
    cli::StandingsCmd,
    league::{LeaderBoard, LeaderEntry},
    Result, StatCategory,
};

use super::CommandContext;

fn print_board(category: &str, entries: &[LeaderEntry]) {
    println!("== {} ==", category);
    if entries.is_empty() {
        println!("  (no qualifying players)");
    }
    for e in entries {
        println!("{:>3}. {:<24} {:<18} {:>5}", e.rank, e.nombre, e.team, e.value);
    }
}

fn print_table(ctx: &CommandContext) -> Result<()> {
    let table = ctx.league.standings();
    if ctx.print_json(&table)? {
        return Ok(());
    }
    println!(
        "{:<3} {:<24} {:>3} {:>3} {:>5} {:>5} {:>4}",
        "#", "Equipo", "G", "P", "PCT", "DIF", "CA"
    );
    for (i, row) in table.iter().enumerate() {
        println!(
            "{:<3} {:<24} {:>3} {:>3} {:>5} {:>5} {:>4}{}",
            i + 1,
            format!("{} {}", row.escudo, row.nombre).trim(),
            row.w,
            row.l,
            row.pct,
            row.dif,
            row.runs,
            if row.manual { "  *" } else { "" }
        );
    }
    if table.iter().any(|r| r.manual) {
        println!("\n* manual override");
    }
    Ok(())
}

/// Handle the standings commands; shows the table when no subcommand is given
pub async fn handle_standings(ctx: &mut CommandContext, cmd: Option<StandingsCmd>) -> Result<()> {
    match cmd.unwrap_or(StandingsCmd::Show) {
        StandingsCmd::Show => print_table(ctx)?,

        StandingsCmd::Set { team, field, value } => {
            ctx.admin("edit standings")?;
            ctx.league.set_manual_standing(&team, field, value)?;
            ctx.commit().await;
            match value {
                Some(v) => println!("✓ {} {:?} set to {}", team, field, v),
                None => println!("✓ {} {:?} override cleared", team, field),
            }
        }

        StandingsCmd::Reset => {
            ctx.admin("reset standings")?;
            ctx.league.reset_manual_standings();
            ctx.commit().await;
            println!("✓ Manual standings cleared");
        }
    }
    Ok(())
}

/// Print one leader board, or every board when no category is given
pub fn handle_leaders(
    ctx: &CommandContext,
    category: Option<StatCategory>,
    min_ab: u32,
    limit: usize,
) -> Result<()> {
    let boards = match category {
        Some(category) => vec![LeaderBoard {
            category: category.to_string(),
            entries: ctx.league.leaders(category, min_ab, limit),
        }],
        None => StatCategory::ALL
            .iter()
            .map(|&category| LeaderBoard {
                category: category.to_string(),
                entries: ctx.league.leaders(category, min_ab, limit),
            })
            .collect(),
    };
    if ctx.print_json(&boards)? {
        return Ok(());
    }
    for board in &boards {
        print_board(&board.category, &board.entries);
    }
    Ok(())
}

/// Rebuild every match box score and player season line
pub async fn handle_recompute(ctx: &mut CommandContext) -> Result<()> {
    ctx.admin("recompute stats")?;
    ctx.league.recompute_player_stats();
    ctx.commit().await;
    println!("✓ Stats recomputed for {} players", ctx.league.players.len());
    Ok(())
}
