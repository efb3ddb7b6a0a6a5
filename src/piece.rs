//! Piece catalog: the 7 tetromino kinds, their rotation states, and the 7-bag.

use rand::seq::SliceRandom;
use rand::{SeedableRng as _, rngs::StdRng};

/// Movement directions for the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step (dx, dy) in board coordinates; y grows downward.
    pub fn step(self) -> (i32, i32) {
        match self {
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// The 4 cell offsets of one rotation state, relative to the piece origin.
pub type CellOffsets = [(i32, i32); 4];

const I_STATES: [CellOffsets; 2] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(1, -1), (1, 0), (1, 1), (1, 2)],
];
const L_STATES: [CellOffsets; 4] = [
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(-1, 1), (0, 1), (1, 1), (1, 0)],
    [(-1, 0), (0, 0), (0, 1), (0, 2)],
    [(-1, 2), (-1, 1), (0, 1), (1, 1)],
];
const J_STATES: [CellOffsets; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (0, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
];
const T_STATES: [CellOffsets; 4] = [
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (0, 1)],
];
const S_STATES: [CellOffsets; 2] = [
    [(1, 0), (2, 0), (1, 1), (0, 1)],
    [(1, -1), (1, 0), (2, 0), (2, 1)],
];
const Z_STATES: [CellOffsets; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, -1), (1, 0), (1, 1), (2, 0)],
];
const O_STATES: [CellOffsets; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

/// Tetromino kinds (I, L, J, T, S, Z, O).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    L,
    J,
    T,
    S,
    Z,
    O,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [
        Self::I,
        Self::L,
        Self::J,
        Self::T,
        Self::S,
        Self::Z,
        Self::O,
    ];

    /// Number of distinct rotation states. The O piece has one, so rotating
    /// it is a no-op.
    pub fn state_count(self) -> usize {
        self.states().len()
    }

    /// Cell offsets for a rotation state. Pure lookup into static tables.
    pub fn offsets(self, state: usize) -> &'static CellOffsets {
        &self.states()[state]
    }

    fn states(self) -> &'static [CellOffsets] {
        match self {
            Self::I => &I_STATES,
            Self::L => &L_STATES,
            Self::J => &J_STATES,
            Self::T => &T_STATES,
            Self::S => &S_STATES,
            Self::Z => &Z_STATES,
            Self::O => &O_STATES,
        }
    }

    /// Widest horizontal footprint across all rotation states, used to
    /// centre the spawn column.
    pub fn max_width(self) -> i32 {
        match self {
            Self::I => 4,
            Self::O => 2,
            _ => 3,
        }
    }
}

/// The active falling piece: origin, absolute cell positions, kind, state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    pub pos: (i32, i32),
    pub parts: CellOffsets,
    pub kind: PieceKind,
    pub state: usize,
}

impl Tetromino {
    /// New piece at the given origin, in its spawn rotation state.
    pub fn new(kind: PieceKind, pos: (i32, i32)) -> Self {
        let mut parts = *kind.offsets(0);
        for cell in &mut parts {
            cell.0 += pos.0;
            cell.1 += pos.1;
        }
        Self {
            pos,
            parts,
            kind,
            state: 0,
        }
    }

    /// True when `cell` is one of the piece's own 4 cells.
    pub fn contains(&self, cell: (i32, i32)) -> bool {
        self.parts.contains(&cell)
    }
}

/// 7-bag randomizer: every refill deals each kind exactly once in a fresh
/// uniform order, so no kind repeats before all 7 have appeared.
#[derive(Debug, Clone)]
pub struct Bag {
    rng: StdRng,
    kinds: [PieceKind; 7],
    used: usize,
}

impl Bag {
    /// Bag seeded from the OS random source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Bag over a caller-supplied generator (seeded runs, tests).
    pub fn with_rng(rng: StdRng) -> Self {
        let mut bag = Self {
            rng,
            kinds: PieceKind::ALL,
            used: 0,
        };
        bag.refill();
        bag
    }

    /// Reshuffles all 7 kinds (Fisher–Yates) and resets the cursor.
    fn refill(&mut self) {
        self.kinds = PieceKind::ALL;
        self.kinds.shuffle(&mut self.rng);
        self.used = 0;
    }

    /// Next kind from the bag, refilling once all 7 have been dealt.
    pub fn next(&mut self) -> PieceKind {
        if self.used == self.kinds.len() {
            self.refill();
        }
        let kind = self.kinds[self.used];
        self.used += 1;
        kind
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;

    #[test]
    fn test_state_counts() {
        assert_eq!(PieceKind::I.state_count(), 2);
        assert_eq!(PieceKind::S.state_count(), 2);
        assert_eq!(PieceKind::Z.state_count(), 2);
        assert_eq!(PieceKind::L.state_count(), 4);
        assert_eq!(PieceKind::J.state_count(), 4);
        assert_eq!(PieceKind::T.state_count(), 4);
        assert_eq!(PieceKind::O.state_count(), 1);
    }

    #[test]
    fn test_states_have_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for state in 0..kind.state_count() {
                let offsets = kind.offsets(state);
                for (i, a) in offsets.iter().enumerate() {
                    for b in &offsets[i + 1..] {
                        assert_ne!(a, b, "{kind:?} state {state} repeats a cell");
                    }
                }
            }
        }
    }

    #[test]
    fn test_max_width_matches_tables() {
        for kind in PieceKind::ALL {
            let widest = (0..kind.state_count())
                .map(|state| {
                    let xs = kind.offsets(state).iter().map(|&(x, _)| x);
                    xs.clone().max().unwrap() - xs.min().unwrap() + 1
                })
                .max()
                .unwrap();
            assert_eq!(widest, kind.max_width(), "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_parts_are_offset_by_origin() {
        let piece = Tetromino::new(PieceKind::Z, (4, 0));
        assert_eq!(piece.parts, [(4, 0), (5, 0), (5, 1), (6, 1)]);
        assert!(piece.contains((5, 1)));
        assert!(!piece.contains((4, 1)));
    }

    #[test]
    fn test_bag_deals_each_kind_once_per_seven() {
        let mut bag = Bag::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..4 {
            let draws: Vec<_> = (0..7).map(|_| bag.next()).collect();
            for kind in PieceKind::ALL {
                assert_eq!(draws.iter().filter(|&&k| k == kind).count(), 1);
            }
        }
    }

    #[test]
    fn test_bag_is_deterministic_for_a_seed() {
        let mut a = Bag::with_rng(StdRng::seed_from_u64(99));
        let mut b = Bag::with_rng(StdRng::seed_from_u64(99));
        for _ in 0..21 {
            assert_eq!(a.next(), b.next());
        }
    }
}
