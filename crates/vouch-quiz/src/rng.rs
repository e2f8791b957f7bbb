//! # Mulberry32 Generator
//!
//! The standard 32-bit mulberry32 mixing generator. State advances by a
//! fixed odd increment, then two xor/multiply rounds whiten the output
//! before it is scaled to `[0, 1)`.
//!
//! All arithmetic is wrapping 32-bit, matching the reference
//! formulation's `Math.imul` / `>>> 0` semantics bit for bit, so seeds
//! shared with a JavaScript client order questions identically.

/// Deterministic 32-bit PRNG producing uniform `f64` draws in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Fixed odd increment of the state sequence.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// The next draw scaled to `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Mulberry32::new(0xdeadbeef);
        let mut b = Mulberry32::new(0xdeadbeef);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Mulberry32::new(1);
        let mut b = Mulberry32::new(2);
        assert_ne!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn draws_are_in_unit_interval() {
        let mut rng = Mulberry32::new(42);
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    /// Reference vector: first three outputs for seed 1, computed from
    /// the canonical JavaScript implementation. Pins the mixing rounds
    /// so a refactor that changes them fails loudly.
    #[test]
    fn matches_reference_outputs_for_seed_one() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(rng.next_u32(), 2_693_262_067);
        assert_eq!(rng.next_u32(), 11_749_833);
        assert_eq!(rng.next_u32(), 2_265_367_787);
    }
}
