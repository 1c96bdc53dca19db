//! Randomness used by a match: who moves first, whether the computer
//! blunders, and which heap a fallback move touches.
//!
//! Production matches draw from an entropy-seeded [`SmallRng`]; tests and the
//! self-play tooling inject seeded or scripted sources instead.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait Dice: Send {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;
    /// Uniform draw in `0..n`. Callers guarantee `n > 0`.
    fn below(&mut self, n: usize) -> usize;
}

pub struct SystemDice {
    rng: SmallRng,
}

impl SystemDice {
    pub fn from_entropy() -> Self { Self { rng: SmallRng::from_entropy() } }

    pub fn seeded(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }
}

impl Default for SystemDice {
    fn default() -> Self { Self::from_entropy() }
}

impl Dice for SystemDice {
    fn unit(&mut self) -> f64 { self.rng.gen::<f64>() }

    fn below(&mut self, n: usize) -> usize { self.rng.gen_range(0..n) }
}

/// Replays fixed draws. Once the unit queue runs dry the last unit value
/// repeats; an empty pick queue yields index 0.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    units: VecDeque<f64>,
    picks: VecDeque<usize>,
    last_unit: f64,
}

impl Scripted {
    pub fn new(units: impl IntoIterator<Item = f64>, picks: impl IntoIterator<Item = usize>) -> Self {
        Self { units: units.into_iter().collect(), picks: picks.into_iter().collect(), last_unit: 0.0 }
    }

    /// Every unit draw returns `unit`, every pick returns 0.
    pub fn always(unit: f64) -> Self { Self { last_unit: unit, ..Self::default() } }
}

impl Dice for Scripted {
    fn unit(&mut self) -> f64 {
        if let Some(u) = self.units.pop_front() { self.last_unit = u; }
        self.last_unit
    }

    fn below(&mut self, n: usize) -> usize { self.picks.pop_front().unwrap_or(0) % n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_are_deterministic() {
        let mut a = SystemDice::seeded(7);
        let mut b = SystemDice::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.below(10), b.below(10));
            assert_eq!(a.unit().to_bits(), b.unit().to_bits());
        }
    }

    #[test]
    fn system_draws_stay_in_range() {
        let mut d = SystemDice::seeded(99);
        for n in 1..50 {
            let u = d.unit();
            assert!((0.0..1.0).contains(&u));
            assert!(d.below(n) < n);
        }
    }

    #[test]
    fn scripted_replays_then_repeats_last_unit() {
        let mut d = Scripted::new([0.1, 0.9], [3, 7]);
        assert_eq!(d.unit(), 0.1);
        assert_eq!(d.unit(), 0.9);
        assert_eq!(d.unit(), 0.9);
        assert_eq!(d.below(5), 3);
        // 7 wraps into range
        assert_eq!(d.below(5), 2);
        assert_eq!(d.below(5), 0);
    }
}
