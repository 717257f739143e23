//! RNG module - where new pieces come from
//!
//! The state machine draws pieces through the [`Randomizer`] trait. Every
//! `rand_core::RngCore` is a randomizer (uniform kind, uniform quarter-turn
//! count), so the deterministic [`SimpleRng`] and any `rand` generator plug in
//! directly. [`Sequence`] replays a fixed list of kinds for tests and demos.

use rand_core::{impls, Error, RngCore};

use crate::types::PieceKind;

/// Source of upcoming pieces
pub trait Randomizer {
    /// Kind of the next piece
    fn next_kind(&mut self) -> PieceKind;

    /// Quarter turns (0-3, counter-clockwise) applied to the next piece when
    /// random initial rotation is enabled
    fn next_rotation(&mut self) -> u8;
}

impl<R: RngCore> Randomizer for R {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.next_u32() % PieceKind::ALL.len() as u32;
        PieceKind::ALL[idx as usize]
    }

    fn next_rotation(&mut self) -> u8 {
        (self.next_u32() % 4) as u8
    }
}

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

    /// Generate random value in range [0, max); always 0 when `max` is 0
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32().checked_rem(max).unwrap_or(0)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of a power-of-two LCG cycle quickly; hand out the high half.
        self.state.rotate_left(16)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Replays a fixed list of kinds, cycling when exhausted.
///
/// Rotation is always 0 so scripted pieces keep their catalog orientation.
#[derive(Debug, Clone)]
pub struct Sequence {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl Sequence {
    /// An empty list behaves like `[PieceKind::O]`.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::O);
        }
        Self { kinds, pos: 0 }
    }

    /// The same kind forever
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl Randomizer for Sequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }

    fn next_rotation(&mut self) -> u8 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        for _ in 0..10 {
            assert_eq!(zero.next_u32(), one.next_u32());
        }
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_next_range_zero_is_zero() {
        let mut rng = SimpleRng::new(7);
        assert_eq!(rng.next_range(0), 0);
        assert_eq!(rng.next_range(1), 0);
    }

    #[test]
    fn test_randomizer_covers_all_kinds_and_rotations() {
        let mut rng = SimpleRng::new(99);
        let mut kinds = [false; 7];
        let mut rotations = [false; 4];
        for _ in 0..500 {
            kinds[rng.next_kind().index() as usize] = true;
            rotations[rng.next_rotation() as usize] = true;
        }
        assert!(kinds.iter().all(|&seen| seen));
        assert!(rotations.iter().all(|&seen| seen));
    }

    #[test]
    fn test_any_rng_core_is_a_randomizer() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
            assert!(a.next_rotation() < 4);
            b.next_rotation();
        }
    }

    #[test]
    fn test_sequence_cycles() {
        let mut seq = Sequence::new([PieceKind::I, PieceKind::T]);
        assert_eq!(seq.next_kind(), PieceKind::I);
        assert_eq!(seq.next_kind(), PieceKind::T);
        assert_eq!(seq.next_kind(), PieceKind::I);
        assert_eq!(seq.next_rotation(), 0);
    }

    #[test]
    fn test_empty_sequence_falls_back_to_o() {
        let mut seq = Sequence::new([]);
        assert_eq!(seq.next_kind(), PieceKind::O);
    }
}
