//! Lineup store: per-match, per-team batting order and scorecard.
//!
//! Every operation is a silent no-op when the match, team or entry cannot be
//! found; the return value tells whether anything changed. None of these
//! operations check permissions or lineup consistency. Two entries may share
//! a batting-order slot or a fielding position.

use crate::cli::types::{LineupStatus, MatchId, PlayerId, TeamId, TurnResult};
use crate::league::models::{
    DefenseTally, League, LineupEntry, Match, Turn, MAX_RBI_PER_TURN, TURN_SLOTS,
};
use tracing::debug;

/// Direction for [`League::move_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Independent per-turn flags. `None` leaves a flag untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnFlags {
    pub stolen_base: Option<bool>,
    pub scored_run: Option<bool>,
    pub rbi: Option<u8>,
    /// `Some("")` clears the direction.
    pub hit_direction: Option<String>,
}

impl League {
    fn lineup_match_mut(&mut self, match_id: &MatchId) -> Option<&mut Match> {
        let found = self.find_match_mut(match_id);
        if found.is_none() {
            debug!(%match_id, "lineup operation on unknown match ignored");
        }
        found
    }

    fn entry_mut(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
    ) -> Option<&mut LineupEntry> {
        let entry = self
            .lineup_match_mut(match_id)?
            .lineup_entry_mut(team_id, player_id);
        if entry.is_none() {
            debug!(%match_id, %team_id, %player_id, "lineup entry not found");
        }
        entry
    }

    /// Build a team's lineup for a match from its approved roster players,
    /// all on the bench, batting order following roster order.
    ///
    /// Does nothing if the team already has a lineup for this match, so
    /// recorded turns are never wiped.
    pub fn init_lineup(&mut self, match_id: &MatchId, team_id: &TeamId) -> bool {
        let entries: Vec<LineupEntry> = self
            .team_players(team_id)
            .filter(|p| p.verificado)
            .enumerate()
            .map(|(i, p)| LineupEntry::new(p.id.clone(), i as u32 + 1, p.posicion.clone()))
            .collect();

        let Some(m) = self.lineup_match_mut(match_id) else {
            return false;
        };
        if !m.involves(team_id) {
            debug!(%match_id, %team_id, "team does not play this match");
            return false;
        }
        if m.lineup.get(team_id).is_some_and(|e| !e.is_empty()) {
            debug!(%match_id, %team_id, "lineup already initialized");
            return false;
        }
        m.lineup.insert(team_id.clone(), entries);
        true
    }

    /// Advance an entry's status one step around the ring.
    pub fn cycle_status(&mut self, match_id: &MatchId, team_id: &TeamId, player_id: &PlayerId) -> bool {
        match self.entry_mut(match_id, team_id, player_id) {
            Some(entry) => {
                entry.status = entry.status.next();
                true
            }
            None => false,
        }
    }

    pub fn set_status(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
        status: LineupStatus,
    ) -> bool {
        match self.entry_mut(match_id, team_id, player_id) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// Replace one lineup player with another.
    ///
    /// The outgoing player becomes `lesionado` and points at the incoming
    /// player; the incoming player becomes `titular`, takes the outgoing
    /// batting order and points back. Current statuses are not checked.
    /// Both entries change or neither does.
    pub fn make_substitution(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        out_id: &PlayerId,
        in_id: &PlayerId,
    ) -> bool {
        if out_id == in_id {
            return false;
        }
        let Some(m) = self.lineup_match_mut(match_id) else {
            return false;
        };
        let Some(entries) = m.lineup.get_mut(team_id) else {
            return false;
        };
        let out_idx = entries.iter().position(|e| &e.player_id == out_id);
        let in_idx = entries.iter().position(|e| &e.player_id == in_id);
        let (Some(out_idx), Some(in_idx)) = (out_idx, in_idx) else {
            debug!(%match_id, %out_id, %in_id, "substitution with unknown player ignored");
            return false;
        };
        let order = entries[out_idx].batting_order;

        let outgoing = &mut entries[out_idx];
        outgoing.status = LineupStatus::Lesionado;
        outgoing.replaced_by = Some(in_id.clone());

        let incoming = &mut entries[in_idx];
        incoming.status = LineupStatus::Titular;
        incoming.batting_order = order;
        incoming.replaces_player = Some(out_id.clone());
        true
    }

    /// Set an arbitrary batting order. Zero is rejected; duplicates are not.
    pub fn set_batting_order(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
        order: u32,
    ) -> bool {
        if order == 0 {
            return false;
        }
        match self.entry_mut(match_id, team_id, player_id) {
            Some(entry) => {
                entry.batting_order = order;
                true
            }
            None => false,
        }
    }

    /// Swap an entry with its neighbour in batting order.
    pub fn move_entry(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
        direction: MoveDirection,
    ) -> bool {
        let Some(m) = self.lineup_match_mut(match_id) else {
            return false;
        };
        let Some(entries) = m.lineup.get_mut(team_id) else {
            return false;
        };

        let mut sorted: Vec<usize> = (0..entries.len()).collect();
        sorted.sort_by_key(|&i| entries[i].batting_order);

        let Some(pos) = sorted.iter().position(|&i| &entries[i].player_id == player_id) else {
            return false;
        };
        let neighbour = match direction {
            MoveDirection::Up if pos > 0 => pos - 1,
            MoveDirection::Down if pos + 1 < sorted.len() => pos + 1,
            _ => return false,
        };

        let (a, b) = (sorted[pos], sorted[neighbour]);
        let (order_a, order_b) = (entries[a].batting_order, entries[b].batting_order);
        entries[a].batting_order = order_b;
        entries[b].batting_order = order_a;
        if order_a == order_b {
            // Equal orders sort by list position, so swap the entries themselves.
            entries.swap(a, b);
        }
        true
    }

    /// Select a result for a turn slot, or clear it when the same result is
    /// selected again.
    pub fn toggle_turn_result(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
        slot: usize,
        result: TurnResult,
    ) -> bool {
        let Some(entry) = self.entry_mut(match_id, team_id, player_id) else {
            return false;
        };
        let Some(turn) = turn_slot(entry, slot) else {
            return false;
        };
        turn.result = if turn.result == Some(result) {
            None
        } else {
            Some(result)
        };
        true
    }

    pub fn set_turn_flags(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
        slot: usize,
        flags: TurnFlags,
    ) -> bool {
        let Some(entry) = self.entry_mut(match_id, team_id, player_id) else {
            return false;
        };
        let Some(turn) = turn_slot(entry, slot) else {
            return false;
        };
        if let Some(sb) = flags.stolen_base {
            turn.stolen_base = sb;
        }
        if let Some(run) = flags.scored_run {
            turn.scored_run = run;
        }
        if let Some(rbi) = flags.rbi {
            turn.rbi = rbi.min(MAX_RBI_PER_TURN);
        }
        if let Some(dir) = flags.hit_direction {
            turn.hit_direction = if dir.trim().is_empty() {
                None
            } else {
                Some(dir.trim().to_string())
            };
        }
        true
    }

    pub fn set_field_position(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
        position: &str,
    ) -> bool {
        match self.entry_mut(match_id, team_id, player_id) {
            Some(entry) => {
                entry.field_position = position.trim().to_string();
                true
            }
            None => false,
        }
    }

    /// Exchange the fielding positions of two entries.
    pub fn swap_field_positions(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        a: &PlayerId,
        b: &PlayerId,
    ) -> bool {
        let Some(m) = self.lineup_match_mut(match_id) else {
            return false;
        };
        let Some(entries) = m.lineup.get_mut(team_id) else {
            return false;
        };
        let ia = entries.iter().position(|e| &e.player_id == a);
        let ib = entries.iter().position(|e| &e.player_id == b);
        let (Some(ia), Some(ib)) = (ia, ib) else {
            return false;
        };
        if ia == ib {
            return false;
        }
        let pa = std::mem::take(&mut entries[ia].field_position);
        let pb = std::mem::replace(&mut entries[ib].field_position, pa);
        entries[ia].field_position = pb;
        true
    }

    pub fn set_defense(
        &mut self,
        match_id: &MatchId,
        team_id: &TeamId,
        player_id: &PlayerId,
        tally: DefenseTally,
    ) -> bool {
        match self.entry_mut(match_id, team_id, player_id) {
            Some(entry) => {
                entry.defense = tally;
                true
            }
            None => false,
        }
    }

    /// Add a roster player to an existing lineup at the end of the order.
    pub fn add_to_lineup(&mut self, match_id: &MatchId, team_id: &TeamId, player_id: &PlayerId) -> bool {
        let Some(position) = self
            .player(player_id)
            .filter(|p| &p.team_id == team_id)
            .map(|p| p.posicion.clone())
        else {
            debug!(%player_id, %team_id, "player is not on this team");
            return false;
        };
        let Some(m) = self.lineup_match_mut(match_id) else {
            return false;
        };
        if !m.involves(team_id) {
            return false;
        }
        let entries = m.lineup.entry(team_id.clone()).or_default();
        if entries.iter().any(|e| &e.player_id == player_id) {
            return false;
        }
        let order = entries.iter().map(|e| e.batting_order).max().unwrap_or(0) + 1;
        entries.push(LineupEntry::new(player_id.clone(), order, position));
        true
    }

    pub fn remove_from_lineup(&mut self, match_id: &MatchId, team_id: &TeamId, player_id: &PlayerId) -> bool {
        let Some(m) = self.lineup_match_mut(match_id) else {
            return false;
        };
        let Some(entries) = m.lineup.get_mut(team_id) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| &e.player_id != player_id);
        entries.len() != before
    }
}

/// Mutable access to a turn slot, padding the list with unrecorded turns.
///
/// Padding stops at [`TURN_SLOTS`]; slots past both the editor range and the
/// stored turns are `None`.
fn turn_slot(entry: &mut LineupEntry, slot: usize) -> Option<&mut Turn> {
    if entry.turns.len() <= slot {
        if slot >= TURN_SLOTS {
            debug!(player_id = %entry.player_id, slot, "turn slot out of range");
            return None;
        }
        entry.turns.resize_with(slot + 1, Turn::default);
    }
    entry.turns.get_mut(slot)
}
