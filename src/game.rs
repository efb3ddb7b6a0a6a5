//! Game session: gravity, movement, rotation, line clears, levels, game over.

use crate::board::{BOARD_WIDTH, Board, TOTAL_ROWS};
use crate::piece::{Bag, Direction, PieceKind, Tetromino};
use crate::theme::Theme;
use rand::{SeedableRng as _, rngs::StdRng};

/// Horizontal auto-repeat interval while a direction is held.
const HORIZONTAL_TICK: f32 = 0.2;
/// Gravity interval while the soft-drop input is held.
const SOFT_DROP_TICK: f32 = 0.1;
/// Points awarded per cleared line.
const POINTS_PER_LINE: u64 = 10;
/// A level-up fires when score per level reaches this.
const LEVEL_UP_SCORE: u64 = 50;
/// Each level-up shortens the gravity interval by this much.
const TICK_DECREMENT: f32 = 0.05;
/// The gravity interval never drops below this.
const MIN_TICK: f32 = 0.1;
/// Total duration of the row-blink animation before rows are removed.
const CLEAR_ANIMATION_SECS: f32 = 0.6;
/// Blink sub-interval: full rows alternate empty/filled at this rate.
const CLEAR_BLINK_SECS: f32 = 0.1;
/// Interval consumed per occupied cell during the game-over wipe.
const WIPE_CELL_SECS: f32 = 0.004;

/// Input facts for one frame, as delivered by the windowing layer.
///
/// `rotate`/`left`/`right` are just-pressed events; the `_held` fields are
/// continuous queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    pub rotate: bool,
    pub left: bool,
    pub right: bool,
    pub left_held: bool,
    pub right_held: bool,
    pub soft_drop_held: bool,
}

/// What the per-frame update is currently driving.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    /// Gravity and input act on the falling piece.
    Normal,
    /// Full rows blink before being removed; no gravity, no input.
    ClearingLines { rows: Vec<usize>, elapsed: f32 },
    /// The board overflowed; occupied cells are wiped one by one.
    GameOver { cursor: usize, elapsed: f32 },
}

/// The whole session: board, active piece, bag, timers, score and level.
///
/// Owns every piece of mutable game state so the engine stays testable; the
/// frame loop only hands it elapsed time and input facts.
#[derive(Debug)]
pub struct GameState {
    pub board: Board,
    pub piece: Tetromino,
    pub theme: Theme,
    pub score: u64,
    pub level: u32,
    bag: Bag,
    rng: StdRng,
    phase: Phase,
    /// Gravity accumulator; a gravity step fires when it reaches the
    /// current tick interval.
    fall_timer: f32,
    /// Horizontal auto-repeat accumulator.
    horizontal_timer: f32,
    /// Current gravity interval; shrinks as the level rises.
    tick_interval: f32,
    base_tick: f32,
    initial_theme: Theme,
}

impl GameState {
    pub fn new(config: &crate::GameConfig) -> Self {
        let (bag, rng) = match config.seed {
            Some(seed) => (
                Bag::with_rng(StdRng::seed_from_u64(seed)),
                StdRng::seed_from_u64(seed),
            ),
            None => (Bag::new(), StdRng::from_os_rng()),
        };
        let mut state = Self {
            board: Board::new(),
            piece: Tetromino::new(PieceKind::O, (0, 0)),
            theme: config.initial_theme,
            score: 0,
            level: 1,
            bag,
            rng,
            phase: Phase::Normal,
            fall_timer: 0.0,
            horizontal_timer: 0.0,
            tick_interval: config.base_tick,
            base_tick: config.base_tick,
            initial_theme: config.initial_theme,
        };
        state.spawn_next();
        state
    }

    /// Advances the whole game by one frame.
    ///
    /// Within one frame at most one gravity-driven lock/clear/spawn
    /// transition occurs, and input-driven moves apply after the gravity
    /// check. The clear and wipe animations swallow the frame entirely,
    /// except that a finished wipe falls through to normal play.
    pub fn update(&mut self, dt: f32, input: &InputFrame) {
        if matches!(self.phase, Phase::ClearingLines { .. }) {
            self.update_clearing(dt);
            return;
        }
        if matches!(self.phase, Phase::GameOver { .. }) && !self.update_wipe(dt) {
            return;
        }
        self.update_normal(dt, input);
    }

    /// Rows currently blinking, with whether they render filled right now.
    pub fn clearing_rows(&self) -> Option<(&[usize], bool)> {
        match &self.phase {
            Phase::ClearingLines { rows, elapsed } => {
                let filled = (*elapsed / CLEAR_BLINK_SECS) as u32 % 2 == 1;
                Some((rows, filled))
            }
            _ => None,
        }
    }

    fn update_normal(&mut self, dt: f32, input: &InputFrame) {
        self.fall_timer += dt;
        if self.fall_timer >= self.tick_interval {
            self.fall_timer = 0.0;
            if self.is_grounded() {
                if self.board.overflow_detected() {
                    self.phase = Phase::GameOver {
                        cursor: 0,
                        elapsed: 0.0,
                    };
                    return;
                }
                let rows = self.board.full_rows();
                if !rows.is_empty() {
                    self.phase = Phase::ClearingLines { rows, elapsed: 0.0 };
                    return;
                }
                self.spawn_next();
            } else {
                self.attempt_move(Direction::Down);
            }
        }
        self.handle_input(dt, input);
    }

    fn handle_input(&mut self, dt: f32, input: &InputFrame) {
        if input.left {
            self.horizontal_timer = 0.0;
            self.attempt_move(Direction::Left);
        }
        if input.right {
            self.horizontal_timer = 0.0;
            self.attempt_move(Direction::Right);
        }
        if input.rotate {
            self.attempt_rotate();
        }

        // Holding both directions cancels auto-repeat instead of favouring a side.
        if input.left_held && input.right_held {
            self.horizontal_timer = 0.0;
        }
        if input.left_held {
            self.horizontal_timer += dt;
            if self.horizontal_timer >= HORIZONTAL_TICK {
                self.horizontal_timer = 0.0;
                self.attempt_move(Direction::Left);
            }
        }
        if input.right_held {
            self.horizontal_timer += dt;
            if self.horizontal_timer >= HORIZONTAL_TICK {
                self.horizontal_timer = 0.0;
                self.attempt_move(Direction::Right);
            }
        }

        // Soft drop rides the gravity accumulator, so holding Down simply
        // makes the piece fall at the fast interval.
        if input.soft_drop_held && !self.is_grounded() {
            self.fall_timer += dt;
            if self.fall_timer >= SOFT_DROP_TICK {
                self.fall_timer = 0.0;
                self.attempt_move(Direction::Down);
                if self.is_grounded() {
                    // Land almost a full tick in, so the lock check comes quickly.
                    self.fall_timer = (self.tick_interval - SOFT_DROP_TICK).max(0.0);
                }
            }
        }
    }

    fn update_clearing(&mut self, dt: f32) {
        let Phase::ClearingLines { rows, elapsed } = &mut self.phase else {
            return;
        };
        *elapsed += dt;
        if *elapsed < CLEAR_ANIMATION_SECS {
            return;
        }
        let rows = std::mem::take(rows);
        self.board.clear_rows(&rows);
        self.score += rows.len() as u64 * POINTS_PER_LINE;
        self.phase = Phase::Normal;
        self.maybe_level_up();
        self.spawn_next();
    }

    /// Advances the game-over wipe; true once the session has been reset.
    fn update_wipe(&mut self, dt: f32) -> bool {
        let Phase::GameOver { cursor, elapsed } = &mut self.phase else {
            return false;
        };
        *elapsed += dt;
        let total = BOARD_WIDTH * TOTAL_ROWS;
        while *elapsed >= WIPE_CELL_SECS && *cursor < total {
            let (col, row) = (*cursor % BOARD_WIDTH, *cursor / BOARD_WIDTH);
            *cursor += 1;
            // Empty cells are skipped for free; only a clear consumes the interval.
            if self.board.cell(col, row) {
                self.board.set(col, row, false);
                *elapsed -= WIPE_CELL_SECS;
            }
        }
        if *cursor < total {
            return false;
        }
        self.reset_session();
        true
    }

    /// Fresh session after a wipe: empty board, initial speed and theme.
    fn reset_session(&mut self) {
        self.board = Board::new();
        self.score = 0;
        self.level = 1;
        self.tick_interval = self.base_tick;
        self.theme = self.initial_theme;
        self.fall_timer = 0.0;
        self.horizontal_timer = 0.0;
        self.phase = Phase::Normal;
        self.spawn_next();
    }

    /// Levels up while score per level sits at the threshold: gravity gets
    /// faster (down to a floor) and a fresh random theme is picked.
    fn maybe_level_up(&mut self) {
        while self.score / u64::from(self.level) >= LEVEL_UP_SCORE {
            self.level += 1;
            self.tick_interval = (self.tick_interval - TICK_DECREMENT).max(MIN_TICK);
            self.theme = Theme::random(&mut self.rng);
        }
    }

    /// Pulls the next kind from the bag and spawns it horizontally centred
    /// at the top hidden row, replacing the previous active piece.
    fn spawn_next(&mut self) {
        let kind = self.bag.next();
        let col = (BOARD_WIDTH as i32 - kind.max_width()) / 2;
        self.piece = Tetromino::new(kind, (col, 0));
        self.board.add_piece(&self.piece);
    }

    /// Moves the piece one cell in `dir` if all 4 target cells are in
    /// bounds and collision-free; otherwise nothing changes. The board gets
    /// the piece's cells back either way.
    pub fn attempt_move(&mut self, dir: Direction) -> bool {
        let (dx, dy) = dir.step();
        self.board.remove_piece(&self.piece);
        let mut target = self.piece.parts;
        for cell in &mut target {
            cell.0 += dx;
            cell.1 += dy;
        }
        let accepted = self.cells_free(&target);
        if accepted {
            self.piece.pos.0 += dx;
            self.piece.pos.1 += dy;
            self.piece.parts = target;
        }
        self.board.add_piece(&self.piece);
        accepted
    }

    /// Advances to the next rotation state under the same all-or-nothing
    /// rule as movement. No wall kicks: a blocked rotation just fails.
    pub fn attempt_rotate(&mut self) -> bool {
        let next = (self.piece.state + 1) % self.piece.kind.state_count();
        self.board.remove_piece(&self.piece);
        let offsets = self.piece.kind.offsets(next);
        let mut target = [(0_i32, 0_i32); 4];
        for (cell, &(dx, dy)) in target.iter_mut().zip(offsets) {
            *cell = (self.piece.pos.0 + dx, self.piece.pos.1 + dy);
        }
        let accepted = self.cells_free(&target);
        if accepted {
            self.piece.state = next;
            self.piece.parts = target;
        }
        self.board.add_piece(&self.piece);
        accepted
    }

    fn cells_free(&self, cells: &[(i32, i32); 4]) -> bool {
        cells
            .iter()
            .all(|&cell| Board::is_within_bounds(cell) && !self.board.occupied(cell))
    }

    /// True when any cell directly below the piece is out of bounds or
    /// occupied by the settled stack (the piece's own cells don't count).
    pub fn is_grounded(&self) -> bool {
        self.piece.parts.iter().any(|&(x, y)| {
            let below = (x, y + 1);
            if !Board::is_within_bounds(below) {
                return true;
            }
            self.board.occupied(below) && !self.piece.contains(below)
        })
    }
}
