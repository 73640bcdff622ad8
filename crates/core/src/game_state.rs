//! Game state module - one play session and its tick-driven state machine
//!
//! A [`Session`] owns the board, the active and next pieces, the score and the
//! terminal flag. Each call to [`Session::tick`] runs, in order:
//!
//! 1. the batch of player intents, each applied speculatively (move, validate,
//!    undo on collision)
//! 2. gravity, once the accumulated time reaches the fall interval
//! 3. if the piece could not descend: lock, clear rows and score, spawn the
//!    next piece, and end the session if the new piece does not fit
//!
//! Step 3 always runs to completion inside the tick that triggered it.

use serde::Serialize;

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::rng::PieceGenerator;
use crate::scoring::clear_score;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{ColorId, ConfigError, GameConfig, Intent, ShapeId, Turn};

/// Where the session is in the lock/clear/spawn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Falling,
    Locking,
    Clearing,
    Spawning,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// The freshly spawned piece overlaps locked cells or the walls.
    SpawnBlocked,
    /// The piece could not descend while its anchor was still above the board.
    Stuck,
    /// A locked cell reached row 0 (only with `ceiling_loss`).
    Ceiling,
}

/// Something that happened during the most recent tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    Spawned {
        shape: ShapeId,
        color: ColorId,
    },
    Locked {
        color: ColorId,
        lines_cleared: u32,
        score_delta: u32,
    },
    GameOver {
        score: u32,
        reason: GameOverReason,
    },
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Moves and rotations undone because they collided.
    pub rejected_intents: u32,
    pub locked: bool,
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub terminal: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    active: ActivePiece,
    next: ActivePiece,
    generator: PieceGenerator,
    phase: Phase,
    score: u32,
    terminal: bool,
    fall_timer_ms: u32,
    soft_drop: bool,
    ticks: u64,
    pieces_spawned: u32,
    /// Events of the current tick; cleared when the next tick starts.
    events: Vec<SessionEvent>,
}

impl Session {
    /// Start a session on an empty board.
    ///
    /// The configuration is validated first, so a palette with fewer than two
    /// piece colors is rejected here rather than stalling the spawner later.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut generator = PieceGenerator::new(seed, config.piece_color_count());
        let (shape, color) = generator.draw();
        let active = ActivePiece::spawn(shape, color, config.cols, config.spawn_row);
        let (shape, color) = generator.draw_distinct(active.color);
        let next = ActivePiece::spawn(shape, color, config.cols, config.spawn_row);

        let mut session = Self {
            board: Board::from_config(&config),
            config,
            active,
            next,
            generator,
            phase: Phase::Falling,
            score: 0,
            terminal: false,
            fall_timer_ms: 0,
            soft_drop: false,
            ticks: 0,
            pieces_spawned: 1,
            events: Vec::with_capacity(4),
        };
        session.events.push(SessionEvent::Spawned {
            shape: active.shape,
            color: active.color,
        });
        if !session.board.is_placement_valid(&session.active) {
            session.end(GameOverReason::SpawnBlocked);
        }
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next(&self) -> &ActivePiece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Ticks processed so far (ticks after game over are not counted)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Events produced by the most recent tick (or by construction, before the first tick)
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Current gravity interval
    pub fn fall_interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.config.fall_interval_soft_ms
        } else {
            self.config.fall_interval_normal_ms
        }
    }

    /// Advance the session by `elapsed_ms` after applying `intents` in order.
    ///
    /// Once the session is terminal this does nothing.
    pub fn tick<I>(&mut self, elapsed_ms: u32, intents: I) -> TickOutcome
    where
        I: IntoIterator<Item = Intent>,
    {
        self.events.clear();
        if self.terminal {
            return TickOutcome {
                terminal: true,
                ..TickOutcome::default()
            };
        }
        self.ticks += 1;

        let mut outcome = TickOutcome::default();
        for intent in intents {
            if !self.apply_intent(intent) {
                outcome.rejected_intents = outcome.rejected_intents.saturating_add(1);
            }
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms >= self.fall_interval_ms() {
            self.fall_timer_ms = 0;
            self.apply_gravity();
        }

        loop {
            match self.phase {
                Phase::Falling | Phase::GameOver => break,
                Phase::Locking => self.lock_active(&mut outcome),
                Phase::Clearing => self.clear_rows(&mut outcome),
                Phase::Spawning => self.spawn_next(),
            }
        }
        outcome.terminal = self.terminal;
        outcome
    }

    /// Like [`Session::tick`], with intents given by name. Unrecognized names are skipped.
    pub fn tick_named(&mut self, elapsed_ms: u32, names: &[&str]) -> TickOutcome {
        let intents: Vec<Intent> = names
            .iter()
            .filter_map(|name| Intent::from_str(name))
            .collect();
        self.tick(elapsed_ms, intents)
    }

    /// Returns false when the intent was rolled back.
    fn apply_intent(&mut self, intent: Intent) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        match intent {
            Intent::MoveLeft => self.try_shift(-1, 0),
            Intent::MoveRight => self.try_shift(1, 0),
            Intent::RotateCw => self.try_turn(Turn::Cw),
            Intent::SoftDropOn => {
                self.soft_drop = true;
                true
            }
            Intent::SoftDropOff => {
                self.soft_drop = false;
                true
            }
        }
    }

    /// Move the active piece, undoing the move if it collides
    fn try_shift(&mut self, dcol: i16, drow: i16) -> bool {
        self.active.translate(dcol, drow);
        if self.board.is_placement_valid(&self.active) {
            return true;
        }
        self.active.translate(-dcol, -drow);
        false
    }

    /// Rotate the active piece, undoing the rotation if it collides
    fn try_turn(&mut self, turn: Turn) -> bool {
        self.active.rotate(turn);
        if self.board.is_placement_valid(&self.active) {
            return true;
        }
        self.active.rotate(turn.reversed());
        false
    }

    fn apply_gravity(&mut self) {
        if self.try_shift(0, 1) {
            return;
        }
        // The anchor row the piece would have reached.
        if self.active.anchor.row + 1 > 0 {
            self.phase = Phase::Locking;
        } else {
            self.end(GameOverReason::Stuck);
        }
    }

    fn lock_active(&mut self, outcome: &mut TickOutcome) {
        self.board.lock(&self.active);
        outcome.locked = true;
        self.phase = Phase::Clearing;
    }

    fn clear_rows(&mut self, outcome: &mut TickOutcome) {
        let cleared = self.board.clear_full_rows();
        let delta = clear_score(cleared, self.config.row_score);
        self.score = self.score.saturating_add(delta);

        let lines_cleared = u32::try_from(cleared).unwrap_or(u32::MAX);
        outcome.lines_cleared = outcome.lines_cleared.saturating_add(lines_cleared);
        outcome.score_delta = outcome.score_delta.saturating_add(delta);
        self.events.push(SessionEvent::Locked {
            color: self.active.color,
            lines_cleared,
            score_delta: delta,
        });

        if self.config.ceiling_loss && self.board.is_game_lost() {
            self.end(GameOverReason::Ceiling);
            return;
        }
        self.phase = Phase::Spawning;
    }

    fn spawn_next(&mut self) {
        self.active = self.next;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        let (shape, color) = self.generator.draw_distinct(self.active.color);
        self.next = ActivePiece::spawn(shape, color, self.config.cols, self.config.spawn_row);

        self.events.push(SessionEvent::Spawned {
            shape: self.active.shape,
            color: self.active.color,
        });

        if self.board.is_placement_valid(&self.active) {
            self.phase = Phase::Falling;
        } else {
            self.end(GameOverReason::SpawnBlocked);
        }
    }

    fn end(&mut self, reason: GameOverReason) {
        self.terminal = true;
        self.phase = Phase::GameOver;
        self.events.push(SessionEvent::GameOver {
            score: self.score,
            reason,
        });
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cols = self.board.cols();
        out.rows = self.board.rows();
        self.board.write_grid(&mut out.grid);

        out.active_cells.clear();
        let cols = usize::from(out.cols);
        for cell in self.active.occupied_cells() {
            out.active_cells.push(cell);
            if self.board.in_bounds(cell) {
                out.grid[cell.row as usize * cols + cell.col as usize] = self.active.color;
            }
        }

        out.active = Some(PieceSnapshot::from(self.active));
        out.next = Some(PieceSnapshot::from(self.next));
        out.score = self.score;
        out.terminal = self.terminal;
        out.ceiling_reached = self.board.is_game_lost();
        out.phase = self.phase;
        out.seed = self.generator.seed();
        out.pieces_spawned = self.pieces_spawned;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Rgb};

    const NO_INTENTS: [Intent; 0] = [];

    fn session(seed: u64) -> Session {
        Session::new(GameConfig::default(), seed).unwrap()
    }

    fn place(session: &mut Session, shape: ShapeId, color: ColorId) {
        let (cols, spawn_row) = (session.config.cols, session.config.spawn_row);
        session.active = ActivePiece::spawn(shape, color, cols, spawn_row);
    }

    /// Run gravity ticks until the current piece locks.
    fn drop_until_lock(session: &mut Session) -> TickOutcome {
        let interval = session.config.fall_interval_normal_ms;
        for _ in 0..100 {
            let outcome = session.tick(interval, NO_INTENTS);
            if outcome.locked || outcome.terminal {
                return outcome;
            }
        }
        panic!("piece never locked");
    }

    #[test]
    fn new_session_starts_falling() {
        let s = session(12345);
        assert_eq!(s.phase(), Phase::Falling);
        assert!(!s.is_terminal());
        assert_eq!(s.score(), 0);
        assert!(s.board().is_empty());
        assert_ne!(s.active().color, s.next().color);
        assert_eq!(s.active().anchor, Coord::new(3, 0));
        assert_eq!(s.pieces_spawned(), 1);
    }

    #[test]
    fn one_color_palette_is_rejected() {
        let config = GameConfig {
            palette: vec![Rgb::new(0, 0, 0), Rgb::new(1, 2, 3)],
            ..GameConfig::default()
        };
        assert!(matches!(
            Session::new(config, 1),
            Err(ConfigError::PaletteTooSmall(2))
        ));
    }

    #[test]
    fn gravity_waits_for_interval() {
        let mut s = session(1);
        let start = s.active().anchor;
        s.tick(100, NO_INTENTS);
        s.tick(100, NO_INTENTS);
        assert_eq!(s.active().anchor, start);
        s.tick(70, NO_INTENTS);
        assert_eq!(s.active().anchor, start.offset(0, 1));
        // Accumulator was reset.
        s.tick(100, NO_INTENTS);
        assert_eq!(s.active().anchor, start.offset(0, 1));
    }

    #[test]
    fn soft_drop_shortens_interval() {
        let mut s = session(1);
        let start = s.active().anchor;
        s.tick(50, [Intent::SoftDropOn]);
        assert!(s.soft_drop());
        assert_eq!(s.fall_interval_ms(), 50);
        assert_eq!(s.active().anchor, start.offset(0, 1));

        s.tick(0, [Intent::SoftDropOff]);
        assert_eq!(s.fall_interval_ms(), 270);
        s.tick(50, NO_INTENTS);
        assert_eq!(s.active().anchor, start.offset(0, 1));
    }

    #[test]
    fn intents_apply_before_gravity() {
        let mut s = session(5);
        place(&mut s, ShapeId::O, 1);
        let start = s.active().anchor;
        s.tick(270, [Intent::MoveLeft, Intent::MoveLeft]);
        assert_eq!(s.active().anchor, start.offset(-2, 1));
    }

    #[test]
    fn move_left_clamps_at_wall() {
        let mut s = session(8);
        place(&mut s, ShapeId::O, 1);
        for _ in 0..10 {
            s.tick(0, [Intent::MoveLeft]);
        }
        let min_col = s.active().occupied_cells().iter().map(|c| c.col).min().unwrap();
        assert_eq!(min_col, 0);
        // O occupies mask columns 1..=2.
        assert_eq!(s.active().anchor.col, -1);
    }

    #[test]
    fn blocked_rotation_is_rolled_back() {
        let mut s = session(2);
        place(&mut s, ShapeId::I, 1);
        // Vertical I sits in mask column 2; push it against the left wall.
        for _ in 0..10 {
            s.tick(0, [Intent::MoveLeft]);
        }
        assert_eq!(s.active().anchor.col, -2);
        let before = *s.active();
        let outcome = s.tick(0, [Intent::RotateCw]);
        // Horizontal frame would start at column -2.
        assert_eq!(*s.active(), before);
        assert_eq!(outcome.rejected_intents, 1);
    }

    #[test]
    fn rejected_moves_are_counted() {
        let mut s = session(8);
        place(&mut s, ShapeId::O, 1);
        // O starts in columns 4..=5: four steps reach the wall, two more collide.
        let outcome = s.tick(0, [Intent::MoveLeft; 6]);
        assert_eq!(outcome.rejected_intents, 2);

        let outcome = s.tick(0, [Intent::SoftDropOn, Intent::MoveRight]);
        assert_eq!(outcome.rejected_intents, 0);
    }

    #[test]
    fn piece_locks_on_floor_and_next_spawns() {
        let mut s = session(42);
        place(&mut s, ShapeId::O, 3);
        let next_before = *s.next();

        let outcome = drop_until_lock(&mut s);
        assert!(outcome.locked);
        assert!(!outcome.terminal);
        assert_eq!(outcome.lines_cleared, 0);

        for col in 4..=5 {
            assert_eq!(s.board().get(Coord::new(col, 18)), Some(3));
            assert_eq!(s.board().get(Coord::new(col, 19)), Some(3));
        }
        assert_eq!(*s.active(), next_before);
        assert_ne!(s.next().color, s.active().color);
        assert_eq!(s.phase(), Phase::Falling);
        assert_eq!(s.pieces_spawned(), 2);
        assert!(matches!(s.events()[0], SessionEvent::Locked { color: 3, .. }));
        assert!(matches!(s.events()[1], SessionEvent::Spawned { .. }));
    }

    #[test]
    fn completing_two_rows_scores_per_row() {
        let mut s = session(9);
        // Row 19 full except columns 4 and 5, row 18 likewise.
        for row in 18..=19 {
            for col in (0..10).filter(|c| *c != 4 && *c != 5) {
                s.board.set(Coord::new(col, row), 1);
            }
        }
        place(&mut s, ShapeId::O, 2);

        let outcome = drop_until_lock(&mut s);
        assert_eq!(outcome.lines_cleared, 2);
        assert_eq!(outcome.score_delta, 20);
        assert_eq!(s.score(), 20);
        assert!(s.board().is_empty());
    }

    #[test]
    fn blocked_spawn_ends_session() {
        let mut s = session(11);
        // Wall off the spawn area so no next piece fits.
        for row in 1..=4 {
            for col in 0..10 {
                if col != 0 {
                    s.board.set(Coord::new(col, row), 1);
                }
            }
        }
        // Current piece sits where it can lock in place immediately.
        s.active = ActivePiece {
            shape: ShapeId::I,
            rotation: 0,
            anchor: Coord::new(-2, 10),
            color: 4,
        };
        let outcome = drop_until_lock(&mut s);
        assert!(outcome.terminal);
        assert!(s.is_terminal());
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(s.events().iter().any(|e| matches!(
            e,
            SessionEvent::GameOver {
                reason: GameOverReason::SpawnBlocked,
                ..
            }
        )));

        // Further ticks are no-ops.
        let frozen = s.snapshot();
        let outcome = s.tick(10_000, [Intent::MoveLeft, Intent::RotateCw]);
        assert!(outcome.terminal);
        assert_eq!(s.snapshot(), frozen);
    }

    #[test]
    fn stuck_in_spawn_buffer_ends_session() {
        let config = GameConfig {
            spawn_row: -4,
            ..GameConfig::default()
        };
        let mut s = Session::new(config, 3).unwrap();
        place(&mut s, ShapeId::O, 1);
        // O cells are at rows -2 and -1; block row 0 under it.
        for col in 0..10 {
            s.board.set(Coord::new(col, 0), 2);
        }
        let outcome = s.tick(270, NO_INTENTS);
        assert!(outcome.terminal);
        assert!(!outcome.locked);
        assert!(matches!(
            s.events().last(),
            Some(SessionEvent::GameOver {
                reason: GameOverReason::Stuck,
                ..
            })
        ));
    }

    #[test]
    fn ceiling_loss_is_opt_in() {
        let config = GameConfig {
            ceiling_loss: true,
            ..GameConfig::default()
        };
        let mut s = Session::new(config, 4).unwrap();
        s.board.set(Coord::new(0, 0), 1);
        place(&mut s, ShapeId::O, 2);
        let outcome = drop_until_lock(&mut s);
        assert!(outcome.terminal);
        assert!(matches!(
            s.events().last(),
            Some(SessionEvent::GameOver {
                reason: GameOverReason::Ceiling,
                ..
            })
        ));
    }

    #[test]
    fn unknown_intent_names_are_ignored() {
        let mut s = session(6);
        place(&mut s, ShapeId::T, 1);
        let start = s.active().anchor;
        let outcome = s.tick_named(0, &["hardDrop", "moveRight", "", "explode"]);
        assert!(!outcome.terminal);
        assert_eq!(s.active().anchor, start.offset(1, 0));
    }

    #[test]
    fn consecutive_active_pieces_differ_in_color() {
        for seed in 0..20 {
            let mut s = session(seed);
            let mut previous = s.active().color;
            for _ in 0..400 {
                if s.is_terminal() {
                    break;
                }
                let outcome = s.tick(270, NO_INTENTS);
                if outcome.locked && !outcome.terminal {
                    assert_ne!(s.active().color, previous);
                    previous = s.active().color;
                }
            }
        }
    }

    #[test]
    fn snapshot_blends_active_piece() {
        let mut s = session(10);
        place(&mut s, ShapeId::O, 5);
        s.board.set(Coord::new(0, 19), 2);
        let snap = s.snapshot();
        assert_eq!(snap.cell(0, 19), 2);
        for cell in s.active().occupied_cells() {
            assert_eq!(snap.cell(cell.col as u16, cell.row as u16), 5);
        }
        assert_eq!(snap.active_cells.len(), 4);
        assert_eq!(snap.grid.len(), 200);
        assert!(!snap.ceiling_reached);
    }

    #[test]
    fn events_reset_each_tick() {
        let mut s = session(13);
        assert_eq!(s.events().len(), 1);
        s.tick(1, NO_INTENTS);
        assert!(s.events().is_empty());
    }
}
