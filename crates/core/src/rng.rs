//! RNG module - uniform random piece selection
//!
//! Every draw picks one of the seven piece kinds uniformly at random,
//! with replacement. There is no bag: long runs and droughts of a kind
//! are possible and intentional.
//!
//! The [`PieceSource`] trait is the seam for tests, which substitute a
//! scripted sequence for the real generator.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Source of the next piece kind.
///
/// The engine draws from this whenever a piece spawns; swapping the
/// implementation is how tests script exact piece sequences.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform independent draws over all seven kinds.
#[derive(Debug, Clone)]
pub struct UniformPieces {
    rng: SimpleRng,
    seed: u32,
}

impl UniformPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl PieceSource for UniformPieces {
    fn next_piece(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Fixed piece sequence for tests; repeats from the start when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    sequence: Vec<PieceKind>,
    pos: usize,
}

impl ScriptedPieces {
    /// Panics on an empty sequence.
    pub fn new(sequence: Vec<PieceKind>) -> Self {
        assert!(!sequence.is_empty(), "piece sequence must not be empty");
        Self { sequence, pos: 0 }
    }
}

impl PieceSource for ScriptedPieces {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.sequence[self.pos];
        self.pos = (self.pos + 1) % self.sequence.len();
        kind
    }
}
