//! CLI argument definitions and parsing.

pub mod types;

use crate::league::{MoveDirection, StandingField, DEFAULT_MIN_AT_BATS, LEADERS_LIMIT, TURN_SLOTS};
use crate::storage::DEFAULT_SEED_PATH;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{LineupStatus, MatchId, MatchStatus, PlayerEstado, PlayerId, StatCategory, TeamId, TurnResult};

/// Session options shared by every command
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Username (or set `SOFTBALL_USER` env var).
    #[clap(long, short, global = true)]
    pub user: Option<String>,

    /// Password (or set `SOFTBALL_PASS` env var).
    #[clap(long, global = true)]
    pub pass: Option<String>,

    /// Seed file read when neither the remote nor the local cache has a league.
    #[clap(long, global = true, default_value = DEFAULT_SEED_PATH)]
    pub seed: PathBuf,

    /// Output results as JSON instead of text lines.
    #[clap(long, global = true)]
    pub json: bool,
}

/// Editable team fields
#[derive(Debug, Clone, Default, Args)]
pub struct TeamFields {
    /// Emoji or short text shown as the team shield.
    #[clap(long)]
    pub escudo: Option<String>,

    /// Primary color (hex).
    #[clap(long)]
    pub color: Option<String>,

    /// Image URL or data URL.
    #[clap(long)]
    pub imagen: Option<String>,

    #[clap(long)]
    pub entrenador: Option<String>,

    #[clap(long)]
    pub email: Option<String>,

    #[clap(long)]
    pub telefono: Option<String>,
}

/// Editable player fields
#[derive(Debug, Clone, Default, Args)]
pub struct PlayerFields {
    /// Jersey number.
    #[clap(long, short)]
    pub dorsal: Option<u32>,

    /// Fielding position (defaults to Utility).
    #[clap(long, short)]
    pub posicion: Option<String>,

    #[clap(long)]
    pub estado: Option<PlayerEstado>,

    #[clap(long)]
    pub altura: Option<String>,

    #[clap(long)]
    pub peso: Option<String>,

    #[clap(long)]
    pub edad: Option<String>,

    /// Photo URL or data URL.
    #[clap(long)]
    pub foto: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TeamCmd {
    /// List teams.
    List,

    /// Create a team.
    Add {
        nombre: String,

        #[clap(flatten)]
        fields: TeamFields,
    },

    /// Edit a team. Renaming keeps its id.
    Update {
        id: TeamId,

        /// New display name.
        #[clap(long)]
        nombre: Option<String>,

        #[clap(flatten)]
        fields: TeamFields,
    },

    /// Delete a team.
    Delete {
        id: TeamId,

        /// Also delete the team's players and matches.
        #[clap(long)]
        cascade: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// List players, optionally for one team.
    List {
        #[clap(long, short)]
        team: Option<TeamId>,
    },

    /// Show a player's card and season stats.
    Show { id: PlayerId },

    /// Register a player.
    Add {
        nombre: String,

        #[clap(long, short)]
        team: TeamId,

        #[clap(flatten)]
        fields: PlayerFields,

        /// Mark as approved right away.
        #[clap(long)]
        approved: bool,
    },

    /// Edit a player.
    Update {
        id: PlayerId,

        #[clap(long)]
        nombre: Option<String>,

        /// Move to another team.
        #[clap(long, short)]
        team: Option<TeamId>,

        #[clap(flatten)]
        fields: PlayerFields,
    },

    /// Toggle habilitado/suspendido.
    ToggleEstado { id: PlayerId },

    /// Toggle the approval flag.
    ToggleApproved { id: PlayerId },

    /// Delete a player and their match lines.
    Delete { id: PlayerId },
}

#[derive(Debug, Subcommand)]
pub enum RosterCmd {
    /// Import players from a semicolon-separated file.
    Import { file: PathBuf },

    /// Export players to a semicolon-separated file (stdout when no output).
    Export {
        #[clap(long, short)]
        team: Option<TeamId>,

        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Write an import template with one example row.
    Template {
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Player and team counters.
    Summary,
}

#[derive(Debug, Subcommand)]
pub enum MatchCmd {
    /// List matches grouped by month.
    List,

    /// Show a match: score, box score, lineups, log and messages.
    Show { id: MatchId },

    /// Schedule a match.
    Add {
        local: TeamId,
        visitante: TeamId,

        /// Date as YYYY-MM-DD.
        #[clap(long, short)]
        fecha: NaiveDate,

        #[clap(long, default_value = "")]
        hora: String,

        #[clap(long, default_value = "")]
        campo: String,

        #[clap(long)]
        jornada: Option<String>,

        #[clap(long, default_value = "")]
        arbitro: String,
    },

    /// Delete a match.
    Delete { id: MatchId },

    /// Set the match status (scheduled, live, finished).
    Status { id: MatchId, status: MatchStatus },

    /// Replace the match notes.
    Notes { id: MatchId, text: String },

    /// Post a message on the match thread.
    Message { id: MatchId, text: String },

    /// Enter a box-score line directly.
    Box {
        id: MatchId,
        player: PlayerId,

        #[clap(long, default_value_t = 0)]
        ab: u32,
        #[clap(long, default_value_t = 0)]
        h: u32,
        #[clap(long, default_value_t = 0)]
        hr: u32,
        #[clap(long, default_value_t = 0)]
        rbi: u32,
        #[clap(long, default_value_t = 0)]
        r: u32,
    },

    /// Write the box-score sheet for a match.
    BoxTemplate {
        id: MatchId,

        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Import a box-score sheet into a match.
    BoxImport { id: MatchId, file: PathBuf },

    /// Most valuable player of a match.
    Mvp { id: MatchId },
}

/// Match and team a lineup command applies to
#[derive(Debug, Clone, Args)]
pub struct LineupTarget {
    /// Match id.
    #[clap(value_name = "MATCH")]
    pub match_id: MatchId,

    /// Team id.
    pub team: TeamId,
}

#[derive(Debug, Subcommand)]
pub enum LineupCmd {
    /// Print the batting order and scorecard.
    Show {
        #[clap(flatten)]
        target: LineupTarget,
    },

    /// Build the lineup from the team's approved players.
    Init {
        #[clap(flatten)]
        target: LineupTarget,
    },

    /// Advance a player's status: titular → lesionado → suplente → ausente.
    Cycle {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
    },

    /// Set a player's status directly.
    Status {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
        status: LineupStatus,
    },

    /// Replace a starter with a bench player.
    Sub {
        #[clap(flatten)]
        target: LineupTarget,
        out: PlayerId,
        #[clap(value_name = "IN")]
        incoming: PlayerId,
    },

    /// Set a batting-order number.
    Order {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
        order: u32,
    },

    /// Move a player up or down one spot in the batting order.
    Move {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
        #[clap(value_enum)]
        direction: MoveDirection,
    },

    /// Select (or clear, when repeated) the result of a turn.
    Turn {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
        /// Turn number.
        #[clap(value_parser = clap::value_parser!(u16).range(1..=(TURN_SLOTS as i64)))]
        slot: u16,
        /// H, 2B, 3B, HR, BB, Error, K or Out.
        result: TurnResult,
    },

    /// Set the per-turn flags.
    Flags {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
        #[clap(value_parser = clap::value_parser!(u16).range(1..=(TURN_SLOTS as i64)))]
        slot: u16,

        /// Stolen base.
        #[clap(long)]
        sb: Option<bool>,

        /// Scored a run.
        #[clap(long)]
        run: Option<bool>,

        /// Runs batted in (0-4).
        #[clap(long)]
        rbi: Option<u8>,

        /// Hit direction; an empty value clears it.
        #[clap(long)]
        dir: Option<String>,
    },

    /// Set a player's fielding position.
    Position {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
        position: String,
    },

    /// Swap the fielding positions of two players.
    Swap {
        #[clap(flatten)]
        target: LineupTarget,
        a: PlayerId,
        b: PlayerId,
    },

    /// Set the fielding tally.
    Defense {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
        #[clap(long, default_value_t = 0)]
        outs: u32,
        #[clap(long, default_value_t = 0)]
        errors: u32,
        #[clap(long, default_value_t = 0)]
        assists: u32,
    },

    /// Add a roster player at the end of the order.
    Add {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
    },

    /// Remove a player from the lineup.
    Remove {
        #[clap(flatten)]
        target: LineupTarget,
        player: PlayerId,
    },
}

#[derive(Debug, Subcommand)]
pub enum StandingsCmd {
    /// Print the standings table.
    Show,

    /// Override wins or losses for a team.
    Set {
        team: TeamId,
        #[clap(value_enum)]
        field: StandingField,
        /// New value; omit to clear the override.
        value: Option<u32>,
    },

    /// Drop every manual override.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum DataCmd {
    /// Write the whole league document as JSON.
    Export {
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Delete the stored league from the cache and the remote.
    Reset {
        /// Required confirmation.
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage teams
    Team {
        #[clap(subcommand)]
        cmd: TeamCmd,
    },

    /// Manage players
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// Roster files and counters
    Roster {
        #[clap(subcommand)]
        cmd: RosterCmd,
    },

    /// Match calendar
    Match {
        #[clap(subcommand)]
        cmd: MatchCmd,
    },

    /// Lineup and scorecard editor
    Lineup {
        #[clap(subcommand)]
        cmd: LineupCmd,
    },

    /// Standings table
    Standings {
        #[clap(subcommand)]
        cmd: Option<StandingsCmd>,
    },

    /// League leader boards
    Leaders {
        /// Single category; all categories when omitted.
        #[clap(long, short, value_enum)]
        category: Option<StatCategory>,

        /// Minimum at-bats to qualify for AVG.
        #[clap(long, default_value_t = DEFAULT_MIN_AT_BATS)]
        min_ab: u32,

        #[clap(long, short, default_value_t = LEADERS_LIMIT)]
        limit: usize,
    },

    /// Rebuild every player's season stats from the matches
    Recompute,

    /// Whole-document export and reset
    Data {
        #[clap(subcommand)]
        cmd: DataCmd,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "softball-league", about = "Softball league admin CLI")]
pub struct SoftballCli {
    #[clap(flatten)]
    pub session: SessionArgs,

    #[clap(subcommand)]
    pub command: Commands,
}
