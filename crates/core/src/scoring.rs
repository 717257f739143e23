//! Scoring module - score, line count, level and fall pacing
//!
//! Scoring is a pure transformation: an event applied to a [`ScoreState`] yields
//! the next state. Level and fall period are recomputed from the line total after
//! every event rather than tracked incrementally.
//!
//! | Event | Score | Lines |
//! |---|---|---|
//! | piece landed | +25 | 0 |
//! | 1 row | +100 | +1 |
//! | 2 rows | +200 | +2 |
//! | 3 rows | +400 | +3 |
//! | 4 rows | +800 | +4 |

use crate::error::GameError;
use crate::types::{
    BASE_FALL_PERIOD, FALL_PERIOD_STEP, LANDING_SCORE, LINES_PER_LEVEL, LINE_SCORES,
    MIN_FALL_PERIOD,
};

/// Something that earns points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// A piece was fixed onto the board
    Landed,
    /// This many rows were removed at once
    LinesCleared(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    lines: u32,
    level: u32,
    fall_period: u32,
}

impl ScoreState {
    /// Fresh session: no score, no lines, level 1
    pub fn new() -> Self {
        Self::from_totals(0, 0)
    }

    fn from_totals(score: u32, lines: u32) -> Self {
        let level = calculate_level(lines);
        Self {
            score,
            lines,
            level,
            fall_period: fall_period(level),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Ticks between automatic descend/clear steps at the current level
    pub fn fall_period(&self) -> u32 {
        self.fall_period
    }

    /// Apply one event and return the resulting state
    pub fn apply(self, event: ScoreEvent) -> Result<Self, GameError> {
        let (points, lines) = match event {
            ScoreEvent::Landed => (LANDING_SCORE, 0),
            ScoreEvent::LinesCleared(rows) => (line_clear_score(rows)?, rows as u32),
        };
        Ok(Self::from_totals(
            self.score.saturating_add(points),
            self.lines.saturating_add(lines),
        ))
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

/// Points for removing `rows` rows in one go
pub fn line_clear_score(rows: usize) -> Result<u32, GameError> {
    match rows {
        1..=4 => Ok(LINE_SCORES[rows]),
        _ => Err(GameError::UnscorableClear { rows }),
    }
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Ticks per automatic step for a level, never below 1
pub fn fall_period(level: u32) -> u32 {
    BASE_FALL_PERIOD
        .saturating_sub(FALL_PERIOD_STEP.saturating_mul(level))
        .max(MIN_FALL_PERIOD)
}
