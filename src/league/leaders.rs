//! League leader boards over season stats.

use crate::cli::types::{PlayerId, StatCategory};
use crate::league::models::{League, Player, SeasonStats};
use crate::league::stats::format_avg;
use serde::Serialize;

/// Default number of entries per leader board.
pub const LEADERS_LIMIT: usize = 10;

/// Default at-bat threshold to qualify for the batting title.
pub const DEFAULT_MIN_AT_BATS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderEntry {
    pub rank: usize,
    pub player_id: PlayerId,
    pub nombre: String,
    pub team: String,
    /// Value as displayed (".333" for AVG, an integer otherwise)
    pub value: String,
}

/// One category's board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderBoard {
    pub category: String,
    pub entries: Vec<LeaderEntry>,
}

fn counting_stat(stats: &SeasonStats, category: StatCategory) -> u32 {
    match category {
        StatCategory::Avg => stats.h,
        StatCategory::Hr => stats.hr,
        StatCategory::Rbi => stats.rbi,
        StatCategory::H => stats.h,
        StatCategory::R => stats.r,
        StatCategory::Doubles => stats.doubles,
        StatCategory::Triples => stats.triples,
        StatCategory::Bb => stats.bb,
        StatCategory::Sb => stats.sb,
        StatCategory::K => stats.k,
    }
}

/// Sort key for a player in a category, or `None` if they do not qualify.
fn qualifying_value(player: &Player, category: StatCategory, min_ab: u32) -> Option<f64> {
    let stats = &player.stats;
    match category {
        StatCategory::Avg => {
            (stats.ab > 0 && stats.ab >= min_ab).then(|| stats.h as f64 / stats.ab as f64)
        }
        _ => {
            let value = counting_stat(stats, category);
            (value > 0).then_some(value as f64)
        }
    }
}

impl League {
    /// Top `limit` approved players in a category, highest first.
    ///
    /// Ties keep roster order. AVG only counts players with at least
    /// `min_ab` at-bats; other categories leave out players at zero.
    pub fn leaders(&self, category: StatCategory, min_ab: u32, limit: usize) -> Vec<LeaderEntry> {
        let mut ranked: Vec<(&Player, f64)> = self
            .players
            .iter()
            .filter(|p| p.verificado)
            .filter_map(|p| qualifying_value(p, category, min_ab).map(|v| (p, v)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranked
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, (player, _))| LeaderEntry {
                rank: i + 1,
                player_id: player.id.clone(),
                nombre: player.nombre.clone(),
                team: self.team_name(&player.team_id),
                value: match category {
                    StatCategory::Avg => format_avg(player.stats.h, player.stats.ab),
                    _ => counting_stat(&player.stats, category).to_string(),
                },
            })
            .collect()
    }

    /// Every category's board with the default limit.
    pub fn all_leaders(&self, min_ab: u32) -> Vec<LeaderBoard> {
        StatCategory::ALL
            .iter()
            .map(|&category| LeaderBoard {
                category: category.to_string(),
                entries: self.leaders(category, min_ab, LEADERS_LIMIT),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::testing::{add_test_player, create_test_league};

    fn set_stats(league: &mut League, id: &PlayerId, ab: u32, h: u32, hr: u32) {
        let stats = &mut league.player_mut(id).unwrap().stats;
        stats.ab = ab;
        stats.h = h;
        stats.hr = hr;
    }

    #[test]
    fn test_avg_requires_min_at_bats() {
        let mut fx = create_test_league();
        set_stats(&mut fx.league, &fx.t1, 9, 9, 0);
        set_stats(&mut fx.league, &fx.t2, 12, 4, 0);
        set_stats(&mut fx.league, &fx.l1, 20, 10, 0);

        let board = fx.league.leaders(StatCategory::Avg, 10, LEADERS_LIMIT);
        let ids: Vec<&PlayerId> = board.iter().map(|e| &e.player_id).collect();
        assert_eq!(ids, vec![&fx.l1, &fx.t2]);
        assert_eq!(board[0].value, ".500");
        assert_eq!(board[0].team, "Leones");
        assert_eq!(board[1].rank, 2);

        let relaxed = fx.league.leaders(StatCategory::Avg, 0, LEADERS_LIMIT);
        assert_eq!(relaxed[0].player_id, fx.t1);
        assert_eq!(relaxed[0].value, "1.000");
    }

    #[test]
    fn test_counting_stats_drop_zeroes_and_unapproved() {
        let mut fx = create_test_league();
        set_stats(&mut fx.league, &fx.t3, 10, 5, 4);
        set_stats(&mut fx.league, &fx.l2, 10, 3, 1);

        let board = fx.league.leaders(StatCategory::Hr, 10, LEADERS_LIMIT);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].player_id, fx.l2);
        assert_eq!(board[0].value, "1");
    }

    #[test]
    fn test_ties_keep_roster_order_and_limit() {
        let mut fx = create_test_league();
        let team = fx.tigres.clone();
        let mut ids = Vec::new();
        for i in 0..12 {
            let id = add_test_player(&mut fx.league, &format!("Jugador {}", i), &team, true);
            set_stats(&mut fx.league, &id, 10, 2, 2);
            ids.push(id);
        }

        let board = fx.league.leaders(StatCategory::Hr, 10, LEADERS_LIMIT);
        assert_eq!(board.len(), LEADERS_LIMIT);
        assert_eq!(board[0].player_id, ids[0]);
        assert_eq!(board[9].player_id, ids[9]);
    }

    #[test]
    fn test_all_leaders_covers_every_category() {
        let fx = create_test_league();
        let boards = fx.league.all_leaders(DEFAULT_MIN_AT_BATS);
        let names: Vec<&str> = boards.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["AVG", "HR", "RBI", "H", "R", "2B", "3B", "BB", "SB", "K"]);
        assert!(boards.iter().all(|b| b.entries.is_empty()));
    }
}
