//! Softball League Admin Library
//!
//! Data core for an amateur softball league: teams and rosters, a match
//! calendar, per-match lineups with a turn-by-turn scorecard, and the season
//! numbers derived from them (box scores, player stats, standings, leaders).
//!
//! ## Features
//!
//! - **Lineup Store**: batting order, statuses, substitutions and scorecard turns
//! - **Stat Aggregation**: PA/AB/H/2B/3B/HR/BB/K/SB/R/RBI and AVG from turns
//! - **Match Sync**: lineup scorecards projected into the match box score
//! - **Standings & Leaders**: wins/losses from runs, games behind, leader boards
//! - **Roster CSV**: semicolon-separated import/export
//! - **Persistence**: whole-document load/save to a cloud store with a local cache
//!
//! ## Quick Start
//!
//! ```rust
//! use softball_league::league::{League, MatchDraft, PlayerDraft, TeamDraft};
//! use softball_league::TurnResult;
//!
//! # fn example() -> softball_league::Result<()> {
//! let mut league = League::default();
//! let tigres = league.add_team(TeamDraft::named("Tigres"))?;
//! let leones = league.add_team(TeamDraft::named("Leones"))?;
//! let carlos = league.add_player(PlayerDraft {
//!     nombre: Some("Carlos Mendoza".to_string()),
//!     team_id: Some(tigres.clone()),
//!     verificado: Some(true),
//!     ..PlayerDraft::default()
//! })?;
//! let game = league.add_match(MatchDraft {
//!     local: tigres.clone(),
//!     visitante: leones,
//!     fecha: chrono::NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
//!     hora: "10:00".to_string(),
//!     campo: "Campo 1".to_string(),
//!     jornada: None,
//!     arbitro: String::new(),
//! })?;
//!
//! league.init_lineup(&game, &tigres);
//! league.toggle_turn_result(&game, &tigres, &carlos, 0, TurnResult::HomeRun);
//! league.sync_lineup_to_player_stats(&game);
//! league.recompute_player_stats();
//!
//! assert_eq!(league.player(&carlos).unwrap().stats.hr, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export SOFTBALL_FIREBASE_URL=https://my-league.firebaseio.com
//! export SOFTBALL_USER=admin
//! export SOFTBALL_PASS=1234
//! ```

pub mod cli;
pub mod commands;
pub mod csv_io;
pub mod error;
pub mod league;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{
    LineupStatus, MatchId, MatchStatus, PlayerEstado, PlayerId, Role, StatCategory, TeamId,
    TurnResult, UserId,
};
pub use error::{LeagueError, Result};
pub use league::League;

/// Base URL of the remote document store. Unset means local-only.
pub const SOFTBALL_FIREBASE_URL: &str = "SOFTBALL_FIREBASE_URL";
pub const SOFTBALL_FIREBASE_AUTH: &str = "SOFTBALL_FIREBASE_AUTH";
pub const SOFTBALL_USER: &str = "SOFTBALL_USER";
pub const SOFTBALL_PASS: &str = "SOFTBALL_PASS";
