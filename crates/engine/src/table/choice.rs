//! Picking one bid when several accept the hand.

use crate::system::Bid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses among accepting candidates, returning an index into `candidates`.
///
/// Only called with two or more candidates.
pub trait ChoiceStrategy {
    fn choose(&mut self, candidates: &[&Bid]) -> usize;
}

/// Uniformly random choice.
pub struct RandomChoice<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChoice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomChoice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ChoiceStrategy for RandomChoice<R> {
    fn choose(&mut self, candidates: &[&Bid]) -> usize {
        if candidates.is_empty() {
            return 0;
        }
        self.rng.gen_range(0..candidates.len())
    }
}

/// The first candidate in system order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl ChoiceStrategy for FirstChoice {
    fn choose(&mut self, _candidates: &[&Bid]) -> usize {
        0
    }
}

impl<F> ChoiceStrategy for F
where
    F: FnMut(&[&Bid]) -> usize,
{
    fn choose(&mut self, candidates: &[&Bid]) -> usize {
        self(candidates)
    }
}
