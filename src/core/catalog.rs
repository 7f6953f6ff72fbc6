//! Piece catalog - polyomino templates and weighted random draws
//!
//! The catalog is a fixed static table of shapes. Each shape is a
//! rectangular 0/1 matrix plus a relative spawn weight; heavier shapes are
//! drawn more often. Drawing attaches a uniformly random palette color and
//! is a pure function of the injected RNG: no hidden state, no allocation,
//! so it is safe from real-time contexts when paired with [`SimpleRng`].
//!
//! [`SimpleRng`]: crate::core::rng::SimpleRng

use rand::Rng;

use crate::types::{Color, PIECE_PALETTE};

/// A polyomino template: occupancy matrix plus spawn weight
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeDef {
    /// Row-major matrix, 1 = occupied
    rows: &'static [&'static [u8]],
    /// Relative selection weight
    weight: u32,
}

impl ShapeDef {
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Whether the matrix cell at (x, y) is occupied
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.rows[y][x] == 1
    }

    /// Number of occupied cells
    pub fn block_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&v| v == 1).count())
            .sum()
    }

    /// Iterate occupied (x, y) offsets in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v == 1)
                .map(move |(x, _)| (x, y))
        })
    }
}

/// A concrete drawn piece: shape template plus cosmetic color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub shape: &'static ShapeDef,
    pub color: Color,
}

impl Piece {
    pub fn block_count(&self) -> usize {
        self.shape.block_count()
    }
}

macro_rules! shape {
    ($weight:expr, [$([$($v:expr),+ $(,)?]),+ $(,)?]) => {
        ShapeDef {
            rows: &[$(&[$($v),+]),+],
            weight: $weight,
        }
    };
}

/// The fixed shape table. Weights reflect desired spawn frequency: the 2x2
/// square is common (6), the 3x3 square and S/Z pieces are rare (3), the
/// lone 1x1 filler rarer still (2), everything else sits at 4.
pub static SHAPES: [ShapeDef; 25] = [
    // L/J corner variants
    shape!(4, [[1, 0, 0], [1, 1, 1]]),
    shape!(4, [[1, 1], [1, 0], [1, 0]]),
    shape!(4, [[1, 1, 1], [0, 0, 1]]),
    shape!(4, [[0, 1], [0, 1], [1, 1]]),
    shape!(4, [[0, 0, 1], [1, 1, 1]]),
    shape!(4, [[1, 0], [1, 0], [1, 1]]),
    shape!(4, [[1, 1, 1], [1, 0, 0]]),
    shape!(4, [[1, 1], [0, 1], [0, 1]]),
    // Triangles (T in four orientations)
    shape!(4, [[1, 1, 1], [0, 1, 0]]),
    shape!(4, [[1, 0], [1, 1], [1, 0]]),
    shape!(4, [[0, 1, 0], [1, 1, 1]]),
    shape!(4, [[0, 1], [1, 1], [0, 1]]),
    // S/Z
    shape!(3, [[0, 1, 1], [1, 1, 0]]),
    shape!(3, [[1, 0], [1, 1], [0, 1]]),
    shape!(3, [[1, 1, 0], [0, 1, 1]]),
    shape!(3, [[0, 1], [1, 1], [1, 0]]),
    // Bars
    shape!(2, [[1]]),
    shape!(4, [[1, 1]]),
    shape!(4, [[1], [1]]),
    shape!(4, [[1, 1, 1]]),
    shape!(4, [[1], [1], [1]]),
    shape!(4, [[1, 1, 1, 1]]),
    shape!(4, [[1], [1], [1], [1]]),
    // Squares
    shape!(6, [[1, 1], [1, 1]]),
    shape!(3, [[1, 1, 1], [1, 1, 1], [1, 1, 1]]),
];

const fn total_weight(shapes: &[ShapeDef]) -> u32 {
    let mut sum = 0;
    let mut i = 0;
    while i < shapes.len() {
        sum += shapes[i].weight;
        i += 1;
    }
    sum
}

/// Sum of all catalog weights
pub const TOTAL_WEIGHT: u32 = total_weight(&SHAPES);

/// Draw a random piece: cumulative-weight scan over the shape table against
/// a uniform roll in [0, TOTAL_WEIGHT), then a uniform palette color.
///
/// Allocation-free; pass a [`SimpleRng`] from restricted/real-time contexts
/// or any other `Rng` elsewhere.
///
/// [`SimpleRng`]: crate::core::rng::SimpleRng
pub fn draw_piece<R: Rng + ?Sized>(rng: &mut R) -> Piece {
    let mut roll = rng.gen_range(0..TOTAL_WEIGHT);
    let mut shape = &SHAPES[0];
    for candidate in SHAPES.iter() {
        if roll < candidate.weight {
            shape = candidate;
            break;
        }
        roll -= candidate.weight;
    }

    let color = PIECE_PALETTE[rng.gen_range(0..PIECE_PALETTE.len())];
    Piece { shape, color }
}

/// General-use draw over the thread-local RNG
pub fn draw_piece_thread() -> Piece {
    draw_piece(&mut rand::thread_rng())
}
