//! Game state module - the state machine driving a session
//!
//! This module ties together all core components: board, pieces, randomizer and
//! scoring. The shell calls [`GameState::tick`] on a fixed cadence and forwards
//! player commands through [`GameState::apply`]; both run to completion before
//! returning, so ticks and commands are applied strictly in submission order.
//!
//! ```text
//!            start                  landed, no full rows
//! GameOver ---------> Descending ------------------------> SpawningNext
//!    ^                 |      ^                               |    |
//!    |  spawn blocked  |      +-------- spawn ok -------------+    |
//!    +-----------------|-------------------------------------------+
//!                      | landed, full rows        qualifying tick  ^
//!                      +-----------------> ClearingLines ----------+
//! ```
//!
//! `Paused` can be entered from `Descending` or `ClearingLines` and returns to
//! whichever it came from.

use log::{debug, info, trace};

use crate::board::{Board, FullRows};
use crate::error::GameError;
use crate::piece::{ActivePiece, Move, NextPiece};
use crate::rng::{Randomizer, SimpleRng};
use crate::scoring::{ScoreEvent, ScoreState};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, PieceKind, Status};

/// Session-independent knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Pre-rotate each next piece by a random number of quarter turns
    pub random_rotation: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            random_rotation: true,
        }
    }
}

/// Result of a command: whether it took effect, and the state afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub applied: bool,
    pub snapshot: GameSnapshot,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    active: Option<ActivePiece>,
    next: NextPiece,
    score: ScoreState,
    status: Status,
    /// Status restored when leaving `Paused`
    resume_status: Status,
    tick_counter: u32,
    /// Rows flashed on landing, removed on the next qualifying tick
    pending_rows: FullRows,
    settings: GameSettings,
    rng: R,
}

impl<R: Randomizer> GameState<R> {
    /// A machine waiting in `GameOver` for a start command
    pub fn new(rng: R, settings: GameSettings) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            next: NextPiece::new(PieceKind::I, 0),
            score: ScoreState::new(),
            status: Status::GameOver,
            resume_status: Status::GameOver,
            tick_counter: 0,
            pending_rows: FullRows::new(),
            settings,
            rng,
        };
        state.next = state.draw_next();
        state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> NextPiece {
        self.next
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Ticks counted toward the next qualifying tick
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Rows waiting to be removed while `ClearingLines`
    pub fn pending_rows(&self) -> &[u8] {
        &self.pending_rows
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.status = self.status;
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.score = self.score.score();
        out.lines = self.score.lines();
        out.level = self.score.level();
        out.fall_period = self.score.fall_period();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance one engine frame
    pub fn tick(&mut self) -> Result<GameSnapshot, GameError> {
        match self.status {
            Status::GameOver | Status::Paused => {}
            Status::SpawningNext => self.spawn_next(),
            Status::Descending => {
                if self.qualifying_tick() {
                    self.descend()?;
                }
            }
            Status::ClearingLines => {
                if self.qualifying_tick() {
                    self.clear_lines()?;
                }
            }
        }
        Ok(self.snapshot())
    }

    /// Apply a player command. Commands that are illegal in the current status,
    /// or moves that would collide, report `applied == false` and change nothing.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, GameError> {
        let applied = match (command, self.status) {
            (Command::Start, Status::GameOver) => {
                self.start_session();
                true
            }
            (Command::TogglePause, Status::Descending | Status::ClearingLines) => {
                self.resume_status = self.status;
                self.status = Status::Paused;
                debug!("paused from {}", self.resume_status.as_str());
                true
            }
            (Command::TogglePause, Status::Paused) => {
                self.status = self.resume_status;
                debug!("resumed into {}", self.status.as_str());
                true
            }
            (Command::MoveLeft, Status::Descending) => self.try_move(Move::LEFT)?,
            (Command::MoveRight, Status::Descending) => self.try_move(Move::RIGHT)?,
            (Command::RotateCcw, Status::Descending) => self.try_move(Move::ROTATE_CCW)?,
            (Command::RotateCw, Status::Descending) => self.try_move(Move::ROTATE_CW)?,
            (Command::HardDrop, Status::Descending) => {
                self.drop_and_land()?;
                true
            }
            _ => false,
        };

        Ok(Outcome {
            applied,
            snapshot: self.snapshot(),
        })
    }

    pub fn start(&mut self) -> Result<Outcome, GameError> {
        self.apply(Command::Start)
    }

    pub fn move_left(&mut self) -> Result<Outcome, GameError> {
        self.apply(Command::MoveLeft)
    }

    pub fn move_right(&mut self) -> Result<Outcome, GameError> {
        self.apply(Command::MoveRight)
    }

    pub fn rotate_cw(&mut self) -> Result<Outcome, GameError> {
        self.apply(Command::RotateCw)
    }

    pub fn rotate_ccw(&mut self) -> Result<Outcome, GameError> {
        self.apply(Command::RotateCcw)
    }

    pub fn hard_drop(&mut self) -> Result<Outcome, GameError> {
        self.apply(Command::HardDrop)
    }

    pub fn toggle_pause(&mut self) -> Result<Outcome, GameError> {
        self.apply(Command::TogglePause)
    }

    fn draw_next(&mut self) -> NextPiece {
        let kind = self.rng.next_kind();
        let turns = if self.settings.random_rotation {
            self.rng.next_rotation() % 4
        } else {
            0
        };
        NextPiece::new(kind, turns)
    }

    fn start_session(&mut self) {
        self.board.reset();
        self.score = ScoreState::new();
        self.tick_counter = 0;
        self.pending_rows.clear();
        self.active = None;
        self.next = self.draw_next();
        info!("session started");
        self.spawn_next();
    }

    /// Count a tick; true once the counter reaches the fall period
    fn qualifying_tick(&mut self) -> bool {
        self.tick_counter += 1;
        if self.tick_counter >= self.score.fall_period() {
            self.tick_counter = 0;
            trace!("qualifying tick in {}", self.status.as_str());
            return true;
        }
        false
    }

    /// Promote the next piece, then either keep falling or end the session
    fn spawn_next(&mut self) {
        let upcoming = self.draw_next();
        let piece = std::mem::replace(&mut self.next, upcoming).into_active();

        if piece.collides(&self.board) {
            self.board
                .stamp(&piece.shape, piece.kind, piece.row, piece.col);
            self.active = None;
            self.status = Status::GameOver;
            info!(
                "game over: score={} lines={} level={}",
                self.score.score(),
                self.score.lines(),
                self.score.level()
            );
            return;
        }

        debug!("spawned {} at col {}", piece.kind.as_str(), piece.col);
        self.active = Some(piece);
        self.status = Status::Descending;
    }

    fn try_move(&mut self, mv: Move) -> Result<bool, GameError> {
        let active = self.active.as_mut().ok_or(GameError::NoActivePiece)?;
        Ok(active.try_move(&self.board, mv))
    }

    fn descend(&mut self) -> Result<(), GameError> {
        if self.try_move(Move::DOWN)? {
            return Ok(());
        }
        self.land()
    }

    fn drop_and_land(&mut self) -> Result<(), GameError> {
        let active = self.active.as_mut().ok_or(GameError::NoActivePiece)?;
        let distance = active.drop_distance(&self.board);
        active.row += distance;
        self.tick_counter = 0;
        self.land()
    }

    /// Fix the active piece, score it and look for full rows
    fn land(&mut self) -> Result<(), GameError> {
        let piece = self.active.ok_or(GameError::NoActivePiece)?;
        self.board
            .fix(&piece.shape, piece.kind, piece.row, piece.col)?;
        self.active = None;
        self.score = self.score.apply(ScoreEvent::Landed)?;
        debug!(
            "landed {} at row {} col {}",
            piece.kind.as_str(),
            piece.row,
            piece.col
        );

        self.pending_rows = self.board.full_rows();
        if self.pending_rows.is_empty() {
            self.status = Status::SpawningNext;
        } else {
            self.board.mark_flash(&self.pending_rows);
            debug!("full rows {:?}", self.pending_rows.as_slice());
            self.status = Status::ClearingLines;
        }
        Ok(())
    }

    fn clear_lines(&mut self) -> Result<(), GameError> {
        let score = self
            .score
            .apply(ScoreEvent::LinesCleared(self.pending_rows.len()))?;
        self.board.collapse(&self.pending_rows)?;
        debug!("cleared {} rows", self.pending_rows.len());
        self.pending_rows.clear();
        self.score = score;
        self.status = Status::SpawningNext;
        Ok(())
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default(), GameSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Sequence;
    use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

    fn scripted(kinds: &[PieceKind]) -> GameState<Sequence> {
        GameState::new(
            Sequence::new(kinds.iter().copied()),
            GameSettings {
                random_rotation: false,
            },
        )
    }

    fn tick_until(state: &mut GameState<Sequence>, status: Status, limit: usize) {
        for _ in 0..limit {
            if state.status() == status {
                return;
            }
            state.tick().unwrap();
        }
        assert_eq!(state.status(), status, "not reached within {} ticks", limit);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::default();
        assert_eq!(state.status(), Status::GameOver);
        assert!(state.active().is_none());
        assert_eq!(state.score().score(), 0);
        assert_eq!(state.score().level(), 1);
        assert_eq!(state.tick_counter(), 0);
    }

    #[test]
    fn test_tick_in_game_over_does_nothing() {
        let mut state = GameState::default();
        for _ in 0..100 {
            state.tick().unwrap();
        }
        assert_eq!(state.status(), Status::GameOver);
        assert_eq!(state.tick_counter(), 0);
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut state = GameState::default();
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::RotateCw,
            Command::RotateCcw,
            Command::HardDrop,
            Command::TogglePause,
        ] {
            let outcome = state.apply(cmd).unwrap();
            assert!(!outcome.applied, "{:?}", cmd);
            assert_eq!(outcome.snapshot.status, Status::GameOver);
        }
    }

    #[test]
    fn test_start_regenerates_preview() {
        let mut state = scripted(&[PieceKind::T, PieceKind::O]);
        let previewed = state.next();

        let outcome = state.start().unwrap();
        assert!(outcome.applied);
        assert_eq!(state.status(), Status::Descending);

        let active = state.active().unwrap();
        // The preview drawn at construction is replaced on start.
        assert_ne!(active.kind, previewed.kind);
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!(active.row, 0);
        assert_eq!(state.next().kind, PieceKind::T);
    }

    #[test]
    fn test_start_only_from_game_over() {
        let mut state = scripted(&[PieceKind::T]);
        state.start().unwrap();
        let before = state.snapshot();
        assert!(!state.start().unwrap().applied);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_descend_waits_for_fall_period() {
        let mut state = scripted(&[PieceKind::T]);
        state.start().unwrap();
        let period = state.score().fall_period();
        assert_eq!(period, 25);

        for _ in 0..period - 1 {
            state.tick().unwrap();
        }
        assert_eq!(state.active().unwrap().row, 0);
        assert_eq!(state.tick_counter(), period - 1);

        state.tick().unwrap();
        assert_eq!(state.active().unwrap().row, 1);
        assert_eq!(state.tick_counter(), 0);
    }

    #[test]
    fn test_moves_stop_at_walls() {
        let mut state = scripted(&[PieceKind::O]);
        state.start().unwrap();
        assert_eq!(state.active().unwrap().col, 4);

        let mut moved = 0;
        while state.move_left().unwrap().applied {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active().unwrap().col, 0);

        let mut moved = 0;
        while state.move_right().unwrap().applied {
            moved += 1;
        }
        assert_eq!(moved, 8);
        assert_eq!(state.status(), Status::Descending);
    }

    #[test]
    fn test_rotate_ccw_then_cw_restores_shape() {
        let mut state = scripted(&[PieceKind::T]);
        state.start().unwrap();
        state.tick().unwrap();
        let before = state.active().unwrap();

        assert!(state.rotate_ccw().unwrap().applied);
        assert_ne!(state.active().unwrap().shape, before.shape);
        assert!(state.rotate_cw().unwrap().applied);
        assert_eq!(state.active().unwrap(), before);
    }

    #[test]
    fn test_hard_drop_lands_and_scores() {
        let mut state = scripted(&[PieceKind::O]);
        state.start().unwrap();
        for _ in 0..5 {
            state.tick().unwrap();
        }
        assert_eq!(state.tick_counter(), 5);

        let outcome = state.hard_drop().unwrap();
        assert!(outcome.applied);
        assert_eq!(state.status(), Status::SpawningNext);
        assert!(state.active().is_none());
        assert_eq!(state.tick_counter(), 0);
        assert_eq!(state.score().score(), 25);
        assert_eq!(state.board().get(17, 4), Cell::Block(PieceKind::O));
        assert_eq!(state.board().get(16, 5), Cell::Block(PieceKind::O));

        // Spawning ignores pacing.
        state.tick().unwrap();
        assert_eq!(state.status(), Status::Descending);
        assert!(state.active().is_some());
    }

    #[test]
    fn test_natural_landing_matches_hard_drop() {
        let mut natural = scripted(&[PieceKind::O]);
        natural.start().unwrap();
        tick_until(&mut natural, Status::SpawningNext, 25 * 20);

        let mut dropped = scripted(&[PieceKind::O]);
        dropped.start().unwrap();
        dropped.hard_drop().unwrap();

        assert_eq!(natural.board(), dropped.board());
        assert_eq!(natural.score(), dropped.score());
    }

    #[test]
    fn test_single_row_clear_with_flash() {
        let mut state = scripted(&[PieceKind::O]);
        state.start().unwrap();
        for col in 0..8 {
            state.board_mut().set(17, col, Cell::Block(PieceKind::I));
        }
        while state.move_right().unwrap().applied {}
        assert_eq!(state.active().unwrap().col, 8);

        state.hard_drop().unwrap();
        assert_eq!(state.status(), Status::ClearingLines);
        assert_eq!(state.pending_rows(), &[17]);
        for col in 0..BOARD_WIDTH as i8 {
            assert_eq!(state.board().get(17, col), Cell::Flash);
        }
        assert_eq!(state.board().get(16, 8), Cell::Block(PieceKind::O));

        tick_until(&mut state, Status::SpawningNext, 25);
        let score = state.score();
        assert_eq!(score.score(), 25 + 100);
        assert_eq!(score.lines(), 1);
        assert_eq!(score.level(), 1);
        assert_eq!(state.board().get(17, 8), Cell::Block(PieceKind::O));
        assert_eq!(state.board().get(17, 9), Cell::Block(PieceKind::O));
        assert_eq!(state.board().occupied_count(), 2);
    }

    #[test]
    fn test_four_row_clear() {
        let mut state = scripted(&[PieceKind::I]);
        state.start().unwrap();
        for row in 14..18 {
            for col in 0..9 {
                state.board_mut().set(row, col, Cell::Block(PieceKind::T));
            }
        }
        // The catalog I is vertical in column 1 of its box.
        while state.move_right().unwrap().applied {}
        assert_eq!(state.active().unwrap().col, 8);

        state.hard_drop().unwrap();
        assert_eq!(state.pending_rows(), &[14, 15, 16, 17]);

        tick_until(&mut state, Status::SpawningNext, 25);
        assert_eq!(state.score().score(), 25 + 800);
        assert_eq!(state.score().lines(), 4);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_blocked_spawn_goes_straight_to_game_over() {
        let mut state = scripted(&[PieceKind::O]);
        state.start().unwrap();
        state.hard_drop().unwrap();
        assert_eq!(state.status(), Status::SpawningNext);

        // Fill the spawn area without completing a row.
        for col in 0..BOARD_WIDTH as i8 - 1 {
            state.board_mut().set(1, col, Cell::Block(PieceKind::J));
        }
        let before = state.board().occupied_count();

        state.tick().unwrap();
        assert_eq!(state.status(), Status::GameOver);
        assert!(state.active().is_none());
        // The blocked piece is still written into the free cells it covers.
        assert_eq!(state.board().get(0, 4), Cell::Block(PieceKind::O));
        assert_eq!(state.board().occupied_count(), before + 2);
        assert!(state.board().is_fence_intact());
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = scripted(&[PieceKind::T, PieceKind::S]);
        state.start().unwrap();
        for _ in 0..30 {
            state.tick().unwrap();
        }
        let before = state.snapshot();
        let counter = state.tick_counter();

        assert!(state.toggle_pause().unwrap().applied);
        assert_eq!(state.status(), Status::Paused);
        for _ in 0..200 {
            state.tick().unwrap();
        }
        assert!(!state.move_left().unwrap().applied);
        assert!(!state.hard_drop().unwrap().applied);
        assert!(!state.start().unwrap().applied);

        assert!(state.toggle_pause().unwrap().applied);
        assert_eq!(state.status(), Status::Descending);
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.tick_counter(), counter);
    }

    #[test]
    fn test_pause_during_clear_resumes_clearing() {
        let mut state = scripted(&[PieceKind::O]);
        state.start().unwrap();
        for col in 0..8 {
            state.board_mut().set(17, col, Cell::Block(PieceKind::I));
        }
        while state.move_right().unwrap().applied {}
        state.hard_drop().unwrap();
        assert_eq!(state.status(), Status::ClearingLines);

        state.toggle_pause().unwrap();
        state.toggle_pause().unwrap();
        assert_eq!(state.status(), Status::ClearingLines);
    }

    #[test]
    fn test_pause_not_accepted_while_spawning() {
        let mut state = scripted(&[PieceKind::O]);
        state.start().unwrap();
        state.hard_drop().unwrap();
        assert!(!state.toggle_pause().unwrap().applied);
        assert_eq!(state.status(), Status::SpawningNext);
    }

    #[test]
    fn test_restart_after_game_over_resets_session() {
        let mut state = scripted(&[PieceKind::O]);
        state.start().unwrap();
        for _ in 0..BOARD_HEIGHT {
            if state.status() == Status::GameOver {
                break;
            }
            state.hard_drop().unwrap();
            state.tick().unwrap();
        }
        assert_eq!(state.status(), Status::GameOver);
        assert!(state.score().score() > 0);

        assert!(state.start().unwrap().applied);
        assert_eq!(state.status(), Status::Descending);
        assert_eq!(state.score().score(), 0);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_fixed_rotation_setting_keeps_catalog_shape() {
        let state = GameState::new(
            SimpleRng::new(5),
            GameSettings {
                random_rotation: false,
            },
        );
        let next = state.next();
        assert_eq!(next.shape, crate::pieces::get_shape(next.kind));
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut state = GameState::new(SimpleRng::new(2024), GameSettings::default());
        let mut rng = SimpleRng::new(77);
        let commands = [
            Command::MoveLeft,
            Command::MoveRight,
            Command::RotateCw,
            Command::RotateCcw,
            Command::HardDrop,
        ];
        state.start().unwrap();
        let mut last = state.score();
        for _ in 0..20_000 {
            if state.status() == Status::GameOver {
                state.start().unwrap();
                last = state.score();
            }
            if rng.next_range(4) == 0 {
                let cmd = commands[rng.next_range(commands.len() as u32) as usize];
                state.apply(cmd).unwrap();
            }
            state.tick().unwrap();

            assert!(state.board().is_fence_intact());
            let score = state.score();
            assert!(score.score() >= last.score());
            assert!(score.lines() >= last.lines());
            last = score;
            if let Some(active) = state.active() {
                assert!(!active.collides(state.board()));
            }
        }
    }
}
