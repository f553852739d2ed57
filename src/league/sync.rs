//! Projection of lineup scorecards into the flat match box score.
//!
//! Sync only runs lineup → box score. Matches without a lineup keep their
//! direct-entry box score; their score is still derived from it.

use crate::cli::types::MatchId;
use crate::league::models::{League, Match, Player};
use crate::league::stats::batting_summary;
use tracing::debug;

/// Runs scored by each side, summed over the box score by the player's team.
///
/// Box-score lines for players that no longer exist are skipped.
pub fn score_from_box(players: &[Player], m: &Match) -> (u32, u32) {
    let mut local = 0;
    let mut visit = 0;
    for (player_id, line) in &m.player_stats {
        let Some(player) = players.iter().find(|p| &p.id == player_id) else {
            continue;
        };
        if player.team_id == m.local {
            local += line.r;
        } else if player.team_id == m.visitante {
            visit += line.r;
        }
    }
    (local, visit)
}

fn sync_match(players: &[Player], m: &mut Match) {
    for entries in m.lineup.values() {
        for entry in entries {
            let line = batting_summary(&entry.turns).box_line();
            m.player_stats.insert(entry.player_id.clone(), line);
        }
    }
    let (local, visit) = score_from_box(players, m);
    m.local_score = local;
    m.visit_score = visit;
}

impl League {
    /// Overwrite the box-score line of every lineup player from their turns,
    /// then recompute the match score. Returns `false` for an unknown match.
    ///
    /// Running it twice without an intervening mutation changes nothing.
    pub fn sync_lineup_to_player_stats(&mut self, match_id: &MatchId) -> bool {
        let Some(m) = self.matches.iter_mut().find(|m| &m.id == match_id) else {
            debug!(%match_id, "sync on unknown match ignored");
            return false;
        };
        sync_match(&self.players, m);
        true
    }

    /// Sync every match in the league.
    pub fn sync_all_matches(&mut self) {
        for m in &mut self.matches {
            sync_match(&self.players, m);
        }
    }
}
