//! The league document and every operation over it.
//!
//! [`League`] is the whole application state. Operations are grouped by
//! concern into `impl League` blocks across the submodules.

pub mod calendar;
pub mod leaders;
pub mod lineup;
pub mod models;
pub mod permissions;
pub mod roster;
pub mod standings;
pub mod stats;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use calendar::{month_label, MatchDraft, MonthGroup};
pub use leaders::{LeaderBoard, LeaderEntry, DEFAULT_MIN_AT_BATS, LEADERS_LIMIT};
pub use lineup::{MoveDirection, TurnFlags};
pub use models::{
    BoxLine, ChangeLogEntry, DefenseTally, League, LineupEntry, ManualStanding, Match, Message,
    Player, SeasonStats, Team, Turn, User, MAX_RBI_PER_TURN, TURN_SLOTS,
};
pub use roster::{PlayerDraft, RosterSummary, TeamDraft};
pub use standings::{MatchMvp, Standing, StandingField};
pub use stats::{batting_summary, format_avg, BattingSummary};
pub use sync::score_from_box;
