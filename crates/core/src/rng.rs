//! RNG module - seeded piece generation
//!
//! Shapes are drawn uniformly from the seven tetrominoes, colors uniformly from the
//! palette's piece colors. The same seed always yields the same sequence.
//!
//! Consecutive pieces must not share a color. The generator re-rolls the whole
//! piece until the color differs, which terminates because configuration
//! validation guarantees at least two piece colors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{ColorId, ShapeId};

#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    /// Piece colors are `1..=max_color`
    max_color: ColorId,
    seed: u64,
}

impl PieceGenerator {
    /// `piece_colors` is the number of non-background palette entries.
    pub fn new(seed: u64, piece_colors: usize) -> Self {
        let max_color = piece_colors.clamp(1, usize::from(ColorId::MAX)) as ColorId;
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_color,
            seed,
        }
    }

    /// Seed the generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw any shape in any piece color
    pub fn draw(&mut self) -> (ShapeId, ColorId) {
        let shape = ShapeId::ALL[self.rng.random_range(0..ShapeId::ALL.len())];
        let color = self.rng.random_range(1..=self.max_color);
        (shape, color)
    }

    /// Draw until the color differs from `previous`.
    ///
    /// With a single piece color there is nothing to differ from, so the first
    /// draw is returned as is.
    pub fn draw_distinct(&mut self, previous: ColorId) -> (ShapeId, ColorId) {
        loop {
            let drawn = self.draw();
            if drawn.1 != previous || self.max_color < 2 {
                return drawn;
            }
        }
    }
}
