//! Batting summary derived from a player's recorded turns.
//!
//! Softball scoring rule used throughout: a walk is a plate appearance but not
//! an at-bat, so `pa == ab + bb` always holds.

use crate::cli::types::TurnResult;
use crate::league::models::{BoxLine, Turn};
use serde::Serialize;

/// Derived batting line for one lineup entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BattingSummary {
    pub pa: u32,
    pub ab: u32,
    pub h: u32,
    pub doubles: u32,
    pub triples: u32,
    pub hr: u32,
    pub bb: u32,
    pub k: u32,
    /// Outs in play (`Out` results; strikeouts are counted in `k`)
    pub o: u32,
    pub sb: u32,
    pub r: u32,
    pub rbi: u32,
    pub avg: String,
}

impl BattingSummary {
    /// The part of the summary that lands in a match box score.
    pub fn box_line(&self) -> BoxLine {
        BoxLine {
            ab: self.ab,
            h: self.h,
            hr: self.hr,
            rbi: self.rbi,
            r: self.r,
        }
    }
}

/// Summarize a turn list. Unrecorded turns are ignored entirely, including
/// their stolen-base, run and RBI flags.
pub fn batting_summary(turns: &[Turn]) -> BattingSummary {
    let mut s = BattingSummary::default();

    for turn in turns {
        let Some(result) = turn.result else {
            continue;
        };
        s.pa += 1;
        match result {
            TurnResult::Single => {}
            TurnResult::Double => s.doubles += 1,
            TurnResult::Triple => s.triples += 1,
            TurnResult::HomeRun => s.hr += 1,
            TurnResult::Walk => s.bb += 1,
            TurnResult::Strikeout => s.k += 1,
            TurnResult::Out => s.o += 1,
            TurnResult::Error => {}
        }
        if result.is_hit() {
            s.h += 1;
        }
        if turn.stolen_base {
            s.sb += 1;
        }
        if turn.scored_run {
            s.r += 1;
        }
        s.rbi += turn.rbi as u32;
    }

    s.ab = s.pa - s.bb;
    s.avg = format_avg(s.h, s.ab);
    s
}

/// Format a rate to three decimals with a leading `0` stripped.
///
/// ```rust
/// use softball_league::league::stats::format_avg;
///
/// assert_eq!(format_avg(1, 3), ".333");
/// assert_eq!(format_avg(2, 2), "1.000");
/// assert_eq!(format_avg(0, 0), ".000");
/// ```
pub fn format_avg(h: u32, ab: u32) -> String {
    if ab == 0 {
        return ".000".to_string();
    }
    let formatted = format!("{:.3}", h as f64 / ab as f64);
    match formatted.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => formatted,
    }
}

#[cfg(test)]
mod tests;
