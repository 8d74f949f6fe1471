//! Game rules configuration.
//!
//! The web variants this game descends from disagree on board width, score
//! table and speedup; all of those are configuration here.

use crate::scoring::{LevelProgression, ScoreTable};
use crate::types::{
    BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_DIM, SOFT_DROP_INTERVAL_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub score_table: ScoreTable,
    /// `None` keeps level 1 and a constant gravity interval.
    pub progression: Option<LevelProgression>,
    pub base_drop_ms: u32,
    pub soft_drop_ms: u32,
}

impl GameConfig {
    /// 10x20, tiered scoring, level speedup.
    pub fn classic() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            score_table: ScoreTable::tiered(),
            progression: Some(LevelProgression::default()),
            base_drop_ms: BASE_DROP_MS,
            soft_drop_ms: SOFT_DROP_INTERVAL_MS,
        }
    }

    /// 10x20, 10 points per line, constant speed.
    pub fn simple() -> Self {
        Self {
            score_table: ScoreTable::flat(),
            progression: None,
            ..Self::classic()
        }
    }

    pub fn with_board_size(mut self, width: u8, height: u8) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Clamp values into the supported ranges.
    pub fn validated(mut self) -> Self {
        self.board_width = self.board_width.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM);
        self.board_height = self.board_height.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM);
        self.base_drop_ms = self.base_drop_ms.max(1);
        self.soft_drop_ms = self.soft_drop_ms.max(1);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_clamps_dimensions() {
        let cfg = GameConfig::classic().with_board_size(2, 200).validated();
        assert_eq!(cfg.board_width, MIN_BOARD_DIM);
        assert_eq!(cfg.board_height, MAX_BOARD_DIM);
    }

    #[test]
    fn simple_preset_is_flat_and_constant() {
        let cfg = GameConfig::simple();
        assert_eq!(cfg.score_table, ScoreTable::Flat(10));
        assert!(cfg.progression.is_none());
    }
}
