//! RNG module - deterministic randomness for spawns and food placement
//!
//! A small LCG is enough here: the world only needs uniform picks over the
//! seven shapes and the 200 board cells, and tests need identical sequences
//! for identical seeds.

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max). Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform cell in `[0, width) x [0, height)`
    pub fn next_cell(&mut self, width: i32, height: i32) -> (i32, i32) {
        let x = self.next_range(width.max(0) as u32) as i32;
        let y = self.next_range(height.max(0) as u32) as i32;
        (x, y)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
