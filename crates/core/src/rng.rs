//! RNG module - 7-bag piece generation
//!
//! Every seven consecutive draws from a reshuffle boundary contain each piece
//! kind exactly once. The bag reshuffles the moment it runs out.
//!
//! Shuffling uses a small LCG so a seed reproduces the same sequence.

use crate::types::{PieceKind, PIECE_KIND_COUNT};

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

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Shuffled bag of the seven kinds.
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceKind; PIECE_KIND_COUNT],
    /// Index of the next piece to hand out
    index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a freshly shuffled bag.
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.shuffle();
        bag
    }

    fn shuffle(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.index = 0;
    }

    /// Hand out the next piece, reshuffling as soon as the bag is empty.
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.bag[self.index];
        self.index += 1;
        if self.index >= PIECE_KIND_COUNT {
            self.shuffle();
        }
        piece
    }

    /// Start a new bag. The RNG is not reseeded, so a restart deals a new
    /// sequence.
    pub fn reset(&mut self) {
        self.shuffle();
    }

    /// Position inside the current bag (0 right after a reshuffle).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pieces left in the current bag, in draw order.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.index..]
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
