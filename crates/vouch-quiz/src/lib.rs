//! # vouch-quiz — Deterministic Quiz Ordering
//!
//! Seed-driven question ordering for skill quizzes. Everything here is a
//! pure function of `(question set, seed)` — no clocks, no I/O, no
//! global state — so a client and the server derive the identical
//! ordering from the same seed.
//!
//! ## Algorithm
//!
//! The 32-bit PRNG seed is the first four bytes of the seed's hex
//! payload (1 if that value is zero). A [`Mulberry32`] generator drives
//! a Fisher-Yates shuffle: for `i` from the last index down to 1, draw
//! `j = floor(rand * (i + 1))` and swap `i` and `j`.
//!
//! ## Selection Rule
//!
//! The product serves single-question quizzes: one attempt presents the
//! FIRST element of the shuffled ordering. [`first_question`] is that
//! rule; it is a deliberate product simplification, not a shortcut.

use vouch_core::Seed;

pub mod rng;

pub use rng::Mulberry32;

/// Shuffle `questions` deterministically under `seed`.
///
/// Returns a new vector containing the same elements in the seeded
/// Fisher-Yates order. Referentially transparent: equal inputs produce
/// equal outputs.
pub fn shuffle<T: Clone>(questions: &[T], seed: &Seed) -> Vec<T> {
    let mut out = questions.to_vec();
    let mut rng = Mulberry32::new(seed.prng_seed());
    for i in (1..out.len()).rev() {
        let j = (rng.next_f64() * (i as f64 + 1.0)) as usize;
        out.swap(i, j);
    }
    out
}

/// The question presented for one attempt: the first element of the
/// shuffled ordering. Returns `None` for an empty question set.
pub fn first_question<T: Clone>(questions: &[T], seed: &Seed) -> Option<T> {
    shuffle(questions, seed).into_iter().next()
}
