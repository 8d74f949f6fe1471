//! Scoring module - line clear tables and the level/speed ratchet
//!
//! Two line clear tables exist:
//! - Tiered: 100 / 300 / 500 / 800 for 1-4 rows cleared in one sweep.
//! - Flat: a fixed number of points per cleared row.
//!
//! Level progression is optional. When enabled, every time the cumulative
//! score reaches `level * threshold` the level goes up and the gravity
//! interval shrinks by a fixed step, never below a floor.

use crate::types::{
    DROP_INTERVAL_STEP_MS, FLAT_LINE_SCORE, LEVEL_UP_SCORE, LINE_SCORES, MIN_DROP_INTERVAL_MS,
};

/// Points awarded per sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTable {
    /// Lookup by rows cleared; counts past the end use the last entry.
    Tiered([u32; 5]),
    /// Same points for every cleared row.
    Flat(u32),
}

impl ScoreTable {
    pub fn tiered() -> Self {
        ScoreTable::Tiered(LINE_SCORES)
    }

    pub fn flat() -> Self {
        ScoreTable::Flat(FLAT_LINE_SCORE)
    }

    /// Points for `lines` rows cleared in a single sweep (0 lines → 0 points).
    pub fn points(&self, lines: u32) -> u32 {
        if lines == 0 {
            return 0;
        }
        match self {
            ScoreTable::Tiered(table) => {
                let idx = (lines as usize).min(table.len() - 1);
                table[idx]
            }
            ScoreTable::Flat(per_line) => per_line.saturating_mul(lines),
        }
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::tiered()
    }
}

/// Score-driven speedup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgression {
    pub score_per_level: u32,
    pub interval_step_ms: u32,
    pub min_interval_ms: u32,
}

impl Default for LevelProgression {
    fn default() -> Self {
        Self {
            score_per_level: LEVEL_UP_SCORE,
            interval_step_ms: DROP_INTERVAL_STEP_MS,
            min_interval_ms: MIN_DROP_INTERVAL_MS,
        }
    }
}

impl LevelProgression {
    /// Apply every level up earned by `score`.
    ///
    /// Returns the number of levels gained; `level` and `interval_ms` are
    /// updated in place and only ever move one way.
    pub fn apply(&self, score: u32, level: &mut u32, interval_ms: &mut u32) -> u32 {
        if self.score_per_level == 0 {
            return 0;
        }
        let mut gained = 0;
        while *level < u32::MAX && score >= level.saturating_mul(self.score_per_level) {
            *level += 1;
            *interval_ms = interval_ms
                .saturating_sub(self.interval_step_ms)
                .max(self.min_interval_ms);
            gained += 1;
        }
        gained
    }
}
