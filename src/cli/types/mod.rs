//! Type-safe wrappers and enums for league data.

pub mod ids;
pub mod scoring;
pub mod status;

pub use ids::{MatchId, PlayerId, TeamId, UserId};
pub use scoring::{StatCategory, TurnResult};
pub use status::{LineupStatus, MatchStatus, PlayerEstado, Role};
