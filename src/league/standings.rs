//! Season aggregation: player totals, team standings and match MVP.

use crate::cli::types::{MatchId, PlayerId, TeamId};
use crate::error::{LeagueError, Result};
use crate::league::models::{BoxLine, League, SeasonStats};
use crate::league::stats::{batting_summary, format_avg};
use crate::league::sync::score_from_box;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Display value for the standings leader's games-behind column.
pub const LEADER_MARK: &str = "—";

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub nombre: String,
    pub escudo: String,
    pub w: u32,
    pub l: u32,
    /// Total runs scored across all matches
    pub runs: u32,
    /// Winning percentage formatted like a batting average
    pub pct: String,
    pub games_behind: f64,
    /// Games behind as displayed: one decimal, the leader shows "—"
    pub dif: String,
    /// Whether an admin override is in effect for W or L
    pub manual: bool,
}

/// Which standings column a manual override targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StandingField {
    W,
    L,
}

/// Best performer of a match by `H + R + 2·RBI + 3·HR`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchMvp {
    pub player_id: PlayerId,
    pub score: u32,
    pub line: BoxLine,
}

/// MVP score of a single box-score line.
pub fn mvp_score(line: &BoxLine) -> u32 {
    line.h + line.r + line.rbi * 2 + line.hr * 3
}

#[derive(Default)]
struct TeamTally {
    w: u32,
    l: u32,
    runs: u32,
}

impl League {
    /// Rebuild every player's season stats from scratch.
    ///
    /// Each match is synced first; its box score then contributes
    /// `ab/h/hr/rbi/r`. Matches with a lineup also contribute
    /// `pa/doubles/triples/bb/k/sb` from the scorecards. AVG is derived last.
    pub fn recompute_player_stats(&mut self) {
        self.sync_all_matches();

        let mut totals: HashMap<PlayerId, SeasonStats> = HashMap::new();
        for m in &self.matches {
            for (player_id, line) in &m.player_stats {
                let t = totals.entry(player_id.clone()).or_default();
                t.ab += line.ab;
                t.h += line.h;
                t.hr += line.hr;
                t.rbi += line.rbi;
                t.r += line.r;
            }
            for entries in m.lineup.values() {
                for entry in entries {
                    let s = batting_summary(&entry.turns);
                    let t = totals.entry(entry.player_id.clone()).or_default();
                    t.pa += s.pa;
                    t.doubles += s.doubles;
                    t.triples += s.triples;
                    t.bb += s.bb;
                    t.k += s.k;
                    t.sb += s.sb;
                }
            }
        }

        for player in &mut self.players {
            let mut stats = totals.remove(&player.id).unwrap_or_default();
            stats.avg = format_avg(stats.h, stats.ab);
            player.stats = stats;
        }
        info!(players = self.players.len(), matches = self.matches.len(), "season stats recomputed");
    }

    /// Standings table sorted by wins (desc) then losses (asc).
    ///
    /// Wins and losses come from comparing run totals of every match the
    /// team played; a tie records nothing. A manual override replaces the
    /// computed value field by field. Runs are always computed.
    pub fn standings(&self) -> Vec<Standing> {
        let mut tallies: HashMap<&TeamId, TeamTally> =
            self.teams.iter().map(|t| (&t.id, TeamTally::default())).collect();

        for m in &self.matches {
            let (local_runs, visit_runs) = score_from_box(&self.players, m);
            if let Some(t) = tallies.get_mut(&m.local) {
                t.runs += local_runs;
            }
            if let Some(t) = tallies.get_mut(&m.visitante) {
                t.runs += visit_runs;
            }
            if !(tallies.contains_key(&m.local) && tallies.contains_key(&m.visitante)) {
                continue;
            }
            let (winner, loser) = match local_runs.cmp(&visit_runs) {
                std::cmp::Ordering::Greater => (&m.local, &m.visitante),
                std::cmp::Ordering::Less => (&m.visitante, &m.local),
                std::cmp::Ordering::Equal => continue,
            };
            if let Some(t) = tallies.get_mut(winner) {
                t.w += 1;
            }
            if let Some(t) = tallies.get_mut(loser) {
                t.l += 1;
            }
        }

        let mut rows: Vec<Standing> = self
            .teams
            .iter()
            .map(|team| {
                let tally = tallies.remove(&team.id).unwrap_or_default();
                let w = team.manual_stats.w.unwrap_or(tally.w);
                let l = team.manual_stats.l.unwrap_or(tally.l);
                Standing {
                    team_id: team.id.clone(),
                    nombre: team.nombre.clone(),
                    escudo: team.escudo.clone(),
                    w,
                    l,
                    runs: tally.runs,
                    pct: format_avg(w, w + l),
                    games_behind: 0.0,
                    dif: String::new(),
                    manual: !team.manual_stats.is_empty(),
                }
            })
            .collect();

        rows.sort_by(|a, b| b.w.cmp(&a.w).then(a.l.cmp(&b.l)));

        let leader = rows.first().map(|r| (r.w as i64, r.l as i64));
        for (i, row) in rows.iter_mut().enumerate() {
            let (lw, ll) = leader.unwrap_or_default();
            row.games_behind = ((lw - row.w as i64) + (row.l as i64 - ll)) as f64 / 2.0;
            row.dif = if i == 0 {
                LEADER_MARK.to_string()
            } else {
                format!("{:.1}", row.games_behind)
            };
        }
        rows
    }

    /// Set or clear (`None`) one manual standings field for a team.
    pub fn set_manual_standing(
        &mut self,
        team_id: &TeamId,
        field: StandingField,
        value: Option<u32>,
    ) -> Result<()> {
        let team = self
            .team_mut(team_id)
            .ok_or_else(|| LeagueError::TeamNotFound {
                id: team_id.to_string(),
            })?;
        match field {
            StandingField::W => team.manual_stats.w = value,
            StandingField::L => team.manual_stats.l = value,
        }
        Ok(())
    }

    /// Drop every manual override so standings are computed from matches again.
    pub fn reset_manual_standings(&mut self) {
        for team in &mut self.teams {
            team.manual_stats = Default::default();
        }
    }

    /// MVP of a match, or `None` when nobody scored above zero.
    /// Ties go to the first line in box-score order.
    pub fn match_mvp(&self, match_id: &MatchId) -> Option<MatchMvp> {
        let m = self.find_match(match_id)?;
        let mut best: Option<MatchMvp> = None;
        for (player_id, line) in &m.player_stats {
            if self.player(player_id).is_none() {
                continue;
            }
            let score = mvp_score(line);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(MatchMvp {
                    player_id: player_id.clone(),
                    score,
                    line: *line,
                });
            }
        }
        best.filter(|b| b.score > 0)
    }
}
