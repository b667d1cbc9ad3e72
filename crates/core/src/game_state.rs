//! Game state module - the complete engine state machine
//!
//! Owns the board, the active and next pieces, scoring counters, and the
//! gravity timer. All mutation goes through the operation methods here;
//! rendering and input stay outside and talk to this via [`GameAction`]
//! and [`GameSnapshot`].
//!
//! Gravity is driven by [`GameState::tick`]: callers report elapsed wall
//! time, the state accumulates it, and one gravity step fires when the
//! accumulator exceeds the current drop interval.

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Difficulty, GameAction, PieceKind};

/// Complete game state, generic over the piece source so tests can
/// script exact sequences.
#[derive(Debug, Clone)]
pub struct GameState<S: PieceSource = UniformPieces> {
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    pieces: S,
    difficulty: Difficulty,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState<UniformPieces> {
    /// Create a new game with the default difficulty.
    pub fn new(seed: u32) -> Self {
        Self::new_with_difficulty(seed, Difficulty::default())
    }

    /// Create a new game at the given starting difficulty.
    pub fn new_with_difficulty(seed: u32, difficulty: Difficulty) -> Self {
        Self::with_source(UniformPieces::new(seed), difficulty)
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a game drawing pieces from an explicit source.
    pub fn with_source(mut pieces: S, difficulty: Difficulty) -> Self {
        let next = pieces.next_piece();
        Self {
            board: Board::new(),
            active: None,
            next,
            pieces,
            difficulty,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: difficulty.start_interval_ms(),
            drop_timer_ms: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game: spawn the first piece and begin gravity.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for tests and tooling.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Promote the preview piece to active and draw a new preview.
    ///
    /// If the freshly spawned piece already collides with the stack the
    /// game is over; the colliding piece stays visible where it spawned.
    fn spawn_next(&mut self) {
        let piece = Piece::spawn(self.next);
        self.next = self.pieces.next_piece();
        if piece.collides(&self.board) {
            self.game_over = true;
        }
        self.active = Some(piece);
    }

    /// Try to translate the active piece; reverts on collision.
    /// Returns true if the piece moved.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        let moved = piece.moved(dx, dy);
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Move the active piece one row down by player input.
    ///
    /// Awards one point per descended row. A rejected soft drop (piece
    /// resting on floor or stack) does nothing: no points, no lock. The
    /// piece locks only through gravity or a hard drop.
    pub fn soft_drop(&mut self) -> bool {
        if self.try_move(0, 1) {
            self.score += scoring::drop_points(1, false);
            return true;
        }
        false
    }

    /// Drop the active piece straight down and lock it immediately.
    ///
    /// Awards two points per descended row, then runs the full lock
    /// sequence even when the piece did not move at all.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.playable() {
            return 0;
        }
        let Some(mut piece) = self.active else {
            return 0;
        };

        let mut rows = 0u32;
        while !piece.moved(0, 1).collides(&self.board) {
            piece = piece.moved(0, 1);
            rows += 1;
        }
        self.score += scoring::drop_points(rows, true);
        self.active = Some(piece);
        self.lock_active();
        rows
    }

    /// Rotate the active piece clockwise with a horizontal kick search.
    ///
    /// The rotated bitmap is tried at the current column first, then
    /// nudged right one, left one, right two, left two and so on, out to
    /// the rotated bitmap's width. The first non-colliding position
    /// wins; if none fits the piece is left untouched.
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotated = piece.rotated_cw();
        let max_kick = rotated.shape.width() as i8;
        let kicks = std::iter::once(0).chain((1..=max_kick).flat_map(|m| [m, -m]));
        for dx in kicks {
            let candidate = rotated.moved(dx, 0);
            if !candidate.collides(&self.board) {
                self.active = Some(candidate);
                return true;
            }
        }
        false
    }

    /// Advance time. One gravity step fires when the accumulated elapsed
    /// time strictly exceeds the drop interval; the accumulator then
    /// resets to zero. Returns true if the state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.started || self.paused || self.game_over {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms <= self.drop_interval_ms {
            return false;
        }
        self.drop_timer_ms = 0;

        // Gravity step: descend one row, or lock if resting.
        let Some(piece) = self.active else {
            return false;
        };
        let below = piece.moved(0, 1);
        if below.collides(&self.board) {
            self.lock_active();
        } else {
            self.active = Some(below);
        }
        true
    }

    /// Lock the active piece into the stack and resolve the turn:
    /// merge, clear lines, score them at the pre-clear level, then
    /// recompute level and speed, and spawn the next piece.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.board
            .merge(&piece.shape.offsets(), piece.x, piece.y, piece.kind);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            // Score first: the multiplier is the level these lines were
            // cleared at, not the one they may promote the player to.
            self.score += scoring::line_clear_points(cleared, self.level);
            self.lines += cleared;

            let new_level = scoring::level_for_lines(self.lines);
            if new_level > self.level {
                self.level = new_level;
                self.drop_interval_ms = scoring::next_drop_interval(self.drop_interval_ms);
            }
        }

        self.spawn_next();
    }

    /// Toggle pause. Resuming resets the gravity accumulator so the
    /// piece does not fall the instant the game unfreezes. Ignored
    /// before start and after game over.
    pub fn toggle_pause(&mut self) {
        if !self.started || self.game_over {
            return;
        }
        self.paused = !self.paused;
        if !self.paused {
            self.drop_timer_ms = 0;
        }
    }

    /// Reset everything except the piece source and difficulty, and
    /// start the new game immediately.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = self.pieces.next_piece();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = self.difficulty.start_interval_ms();
        self.drop_timer_ms = 0;
        self.paused = false;
        self.game_over = false;
        self.started = true;
        self.spawn_next();
    }

    /// Row where the active piece's anchor would land if dropped now.
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active?;
        let mut ghost = piece;
        while !ghost.moved(0, 1).collides(&self.board) {
            ghost = ghost.moved(0, 1);
        }
        Some(ghost.y)
    }

    fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Apply a player action. Returns true if the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if !self.playable() || self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => {
                let before = self.paused;
                self.toggle_pause();
                self.paused != before
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Fill a caller-owned snapshot without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

impl Default for GameState<UniformPieces> {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedPieces;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn started(kinds: Vec<PieceKind>) -> GameState<ScriptedPieces> {
        let mut game = GameState::with_source(ScriptedPieces::new(kinds), Difficulty::Easy);
        game.start();
        game
    }

    #[test]
    fn new_game_defaults() {
        let game = GameState::new(1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.drop_interval_ms(), 1000);
        assert!(!game.started());
        assert!(game.active().is_none());
    }

    #[test]
    fn difficulty_sets_start_interval() {
        let game = GameState::new_with_difficulty(1, Difficulty::Hard);
        assert_eq!(game.drop_interval_ms(), 400);
    }

    #[test]
    fn start_spawns_active_and_preview() {
        let mut game = started(vec![PieceKind::T, PieceKind::I]);
        assert!(game.started());
        let active = game.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(game.next_piece(), PieceKind::I);
        // Starting twice does not respawn.
        let before = game.active();
        game.start();
        assert_eq!(game.active(), before);
    }

    #[test]
    fn moves_are_ignored_before_start() {
        let mut game = GameState::new(1);
        assert!(!game.apply_action(GameAction::MoveLeft));
        assert!(!game.apply_action(GameAction::SoftDrop));
        assert_eq!(game.hard_drop(), 0);
    }

    #[test]
    fn horizontal_movement_stops_at_walls() {
        let mut game = started(vec![PieceKind::O]);
        let mut moved = 0;
        while game.try_move(-1, 0) {
            moved += 1;
        }
        assert_eq!(game.active().unwrap().x, 0);
        assert!(moved > 0);
        assert!(!game.try_move(-1, 0));
    }

    #[test]
    fn tick_below_interval_does_nothing() {
        let mut game = started(vec![PieceKind::T]);
        let y0 = game.active().unwrap().y;
        assert!(!game.tick(999));
        assert_eq!(game.active().unwrap().y, y0);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn tick_at_exact_interval_does_not_step() {
        // The threshold is strict: accumulated time must exceed the interval.
        let mut game = started(vec![PieceKind::T]);
        let y0 = game.active().unwrap().y;
        assert!(!game.tick(1000));
        assert_eq!(game.active().unwrap().y, y0);
        assert!(game.tick(1));
        assert_eq!(game.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn tick_accumulates_across_calls() {
        let mut game = started(vec![PieceKind::T]);
        let y0 = game.active().unwrap().y;
        for _ in 0..62 {
            game.tick(16);
        }
        // 62 * 16 = 992ms: not yet. One more frame crosses the line.
        assert_eq!(game.active().unwrap().y, y0);
        assert!(game.tick(16));
        assert_eq!(game.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn gravity_step_resets_accumulator() {
        let mut game = started(vec![PieceKind::T]);
        assert!(game.tick(1500));
        // Overshoot is discarded, so the next step needs a full interval.
        assert!(!game.tick(999));
        assert!(game.tick(2));
    }

    #[test]
    fn soft_drop_moves_and_scores() {
        let mut game = started(vec![PieceKind::T]);
        let y0 = game.active().unwrap().y;
        assert!(game.soft_drop());
        assert_eq!(game.active().unwrap().y, y0 + 1);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn rejected_soft_drop_neither_scores_nor_locks() {
        let mut game = started(vec![PieceKind::O, PieceKind::T]);
        // Drive the piece to the floor manually.
        while game.try_move(0, 1) {}
        let piece = game.active().unwrap();
        assert!(!game.soft_drop());
        // Still the same active piece, unmerged, no points.
        assert_eq!(game.active().unwrap(), piece);
        assert_eq!(game.score(), 0);
        assert!(game.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn hard_drop_scores_and_locks() {
        let mut game = started(vec![PieceKind::O, PieceKind::T]);
        // O spawns occupying rows 0..2; the floor rest row is 18, so it
        // descends 18 rows for 36 points.
        let rows = game.hard_drop();
        assert_eq!(rows, 18);
        assert_eq!(game.score(), 36);
        // Merged into the stack and the preview was promoted.
        assert!(game.board().is_occupied(4, 19));
        assert_eq!(game.active().unwrap().kind, PieceKind::T);
    }

    #[test]
    fn hard_drop_with_no_room_still_locks() {
        let mut game = started(vec![PieceKind::O, PieceKind::T, PieceKind::I]);
        // Tower right under the spawn footprint.
        for y in 2..BOARD_HEIGHT as i8 {
            for x in [4, 5] {
                game.board_mut().set(x, y, Some(PieceKind::I));
            }
        }
        let rows = game.hard_drop();
        assert_eq!(rows, 0);
        // Zero rows means zero drop points, but the lock still ran.
        assert_eq!(game.score(), 0);
        assert!(game.board().is_occupied(4, 0));
    }

    #[test]
    fn gravity_locks_resting_piece() {
        let mut game = started(vec![PieceKind::O, PieceKind::T]);
        while game.try_move(0, 1) {}
        assert!(game.tick(1001));
        assert!(game.board().is_occupied(4, 19));
        assert_eq!(game.active().unwrap().kind, PieceKind::T);
    }

    #[test]
    fn rotation_near_wall_kicks_back_inside() {
        let mut game = started(vec![PieceKind::I, PieceKind::T]);
        // Stand the I piece up, push it against the right wall, rotate.
        assert!(game.rotate());
        while game.try_move(1, 0) {}
        let x_before = game.active().unwrap().x;
        assert!(game.rotate());
        let piece = game.active().unwrap();
        // The kick shifted the anchor left so every cell stays in bounds.
        assert!(piece.x < x_before);
        assert!(!piece.collides(game.board()));
        for (dx, _) in piece.shape.offsets() {
            assert!(piece.x + dx < BOARD_WIDTH as i8);
        }
    }

    #[test]
    fn blocked_rotation_leaves_piece_unchanged() {
        let mut game = started(vec![PieceKind::I, PieceKind::T]);
        // Stand the I up against the left wall, then wall it in so no
        // horizontal nudge can make the flat orientation fit.
        assert!(game.rotate());
        while game.try_move(-1, 0) {}
        while game.try_move(0, 1) {}
        let piece = game.active().unwrap();
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let own = piece
                    .shape
                    .offsets()
                    .iter()
                    .any(|&(dx, dy)| piece.x + dx == x && piece.y + dy == y);
                if !own {
                    game.board_mut().set(x, y, Some(PieceKind::J));
                }
            }
        }
        assert!(!game.rotate());
        assert_eq!(game.active().unwrap(), piece);
    }

    #[test]
    fn single_line_clear_scores_at_current_level() {
        let mut game = started(vec![PieceKind::I, PieceKind::O, PieceKind::T]);
        // Leave a 4-wide gap at columns 3..=6 on the bottom row.
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&x) {
                game.board_mut().set(x, 19, Some(PieceKind::J));
            }
        }
        game.hard_drop();
        // 18 rows descended (I rests flat on the floor) plus one line at
        // level 1: 36 + 100.
        assert_eq!(game.lines(), 1);
        assert_eq!(game.score(), 36 + 100);
        assert_eq!(game.level(), 1);
        assert!(game.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn level_up_after_ten_lines_speeds_gravity() {
        let mut game = started(vec![PieceKind::I]);
        // Clear nine single lines, each by dropping an I into a prepared gap.
        for _ in 0..9 {
            for x in 0..BOARD_WIDTH as i8 {
                if !(3..=6).contains(&x) {
                    game.board_mut().set(x, 19, Some(PieceKind::J));
                }
            }
            game.hard_drop();
        }
        assert_eq!(game.lines(), 9);
        assert_eq!(game.level(), 1);
        assert_eq!(game.drop_interval_ms(), 1000);

        for x in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&x) {
                game.board_mut().set(x, 19, Some(PieceKind::J));
            }
        }
        let score_before = game.score();
        game.hard_drop();
        assert_eq!(game.lines(), 10);
        assert_eq!(game.level(), 2);
        assert_eq!(game.drop_interval_ms(), 950);
        // The tenth line still pays at level 1.
        assert_eq!(game.score(), score_before + 36 + 100);
    }

    #[test]
    fn pause_freezes_everything() {
        let mut game = started(vec![PieceKind::T]);
        game.toggle_pause();
        assert!(game.paused());
        let y0 = game.active().unwrap().y;
        assert!(!game.tick(5000));
        assert!(!game.try_move(-1, 0));
        assert!(!game.rotate());
        assert!(!game.soft_drop());
        assert_eq!(game.hard_drop(), 0);
        assert_eq!(game.active().unwrap().y, y0);
    }

    #[test]
    fn resume_resets_gravity_accumulator() {
        let mut game = started(vec![PieceKind::T]);
        game.tick(900);
        game.toggle_pause();
        game.toggle_pause();
        // The 900ms banked before the pause is gone.
        assert!(!game.tick(900));
        assert!(game.tick(200));
    }

    /// Stack a tower in the spawn columns so rows stay partial and the
    /// next spawn collides.
    fn block_spawn_columns(game: &mut GameState<ScriptedPieces>) {
        for y in 0..BOARD_HEIGHT as i8 {
            for x in [4, 5] {
                game.board_mut().set(x, y, Some(PieceKind::I));
            }
        }
    }

    #[test]
    fn pause_ignored_after_game_over() {
        let mut game = started(vec![PieceKind::O]);
        block_spawn_columns(&mut game);
        game.hard_drop();
        assert!(game.game_over());
        game.toggle_pause();
        assert!(!game.paused());
    }

    #[test]
    fn spawn_collision_ends_game() {
        let mut game = started(vec![PieceKind::O, PieceKind::O, PieceKind::O]);
        block_spawn_columns(&mut game);
        game.hard_drop();
        assert!(game.game_over());
        // The colliding piece remains visible at its spawn position.
        let active = game.active().unwrap();
        assert_eq!(active.y, 0);
        // And the dead game refuses further mutation.
        let snapshot = game.snapshot();
        assert!(!game.tick(10_000));
        assert!(!game.apply_action(GameAction::MoveLeft));
        assert!(!game.apply_action(GameAction::HardDrop));
        assert_eq!(game.snapshot(), snapshot);
    }

    #[test]
    fn restart_resets_state_but_keeps_difficulty() {
        let mut game = GameState::new_with_difficulty(9, Difficulty::Medium);
        game.start();
        game.hard_drop();
        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.drop_interval_ms(), 700);
        assert!(!game.game_over());
        assert!(game.started());
        assert!(game.active().is_some());
        assert!(game.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn restart_recovers_from_game_over() {
        let mut game = started(vec![PieceKind::O]);
        block_spawn_columns(&mut game);
        game.hard_drop();
        assert!(game.game_over());
        assert!(game.apply_action(GameAction::Restart));
        assert!(!game.game_over());
        assert!(game.tick(1001));
    }

    #[test]
    fn ghost_tracks_landing_row() {
        let mut game = started(vec![PieceKind::O, PieceKind::T]);
        assert_eq!(game.ghost_y(), Some(18));
        game.board_mut().fill_row(19, PieceKind::I);
        assert_eq!(game.ghost_y(), Some(17));
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut game = started(vec![PieceKind::O, PieceKind::T]);
        game.hard_drop();
        let snap = game.snapshot();
        assert_eq!(snap.score, 36);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.next, game.next_piece());
        assert_eq!(snap.board[19][4], PieceKind::O.cell_id());
        assert_eq!(snap.board[0][0], 0);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert!(snap.playable());
    }
}
