//! Randomness for the effect simulations.
//!
//! The simulations only see [`Entropy`], so tests can feed them fixed sequences.
//! In the page it is backed by `rand`'s `SmallRng`.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use web_sys::window;

/// Source of uniform samples in `[0, 1)`.
pub trait Entropy {
    fn next_f64(&mut self) -> f64;

    /// Uniform pick from `items`; `None` when empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = ((self.next_f64() * items.len() as f64) as usize).min(items.len() - 1);
        items.get(idx)
    }
}

/// Visual-only generator; not crypto secure.
#[derive(Clone, Debug)]
pub struct FrameRng(SmallRng);

impl FrameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Seed from the browser crypto source, or the clock without the `rng` feature.
    #[cfg(feature = "rng")]
    pub fn from_entropy() -> Self {
        match SmallRng::from_rng(rand::rngs::OsRng) {
            Ok(rng) => Self(rng),
            Err(err) => {
                log::warn!("os entropy unavailable ({err}); seeding from clock");
                Self::seeded(clock_seed())
            }
        }
    }

    #[cfg(not(feature = "rng"))]
    pub fn from_entropy() -> Self {
        Self::seeded(clock_seed())
    }
}

impl Entropy for FrameRng {
    fn next_f64(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}

fn clock_seed() -> u64 {
    if !cfg!(target_arch = "wasm32") {
        return 0x5EED;
    }
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now * 1000.0) as u64 ^ 0x5EED
}


#[cfg(test)]
mod tests {
    use super::testing::Sequence;
    use super::*;

    #[test]
    fn samples_stay_in_unit_interval() {
        let mut rng = FrameRng::seeded(42);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = FrameRng::seeded(7);
        let mut b = FrameRng::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn seeded_picks_come_from_the_slice() {
        let items = ['a', 'b', 'c'];
        let mut rng = FrameRng::seeded(3);
        for _ in 0..100 {
            assert!(items.contains(rng.pick(&items).unwrap()));
        }
        assert_eq!(rng.pick::<char>(&[]), None);
    }

    #[test]
    fn sequence_pick_clamps_to_last_item() {
        let items = [10, 20, 30, 40];
        let mut rng = Sequence::new(&[0.0, 0.5, 0.999_999_999]);
        assert_eq!(rng.pick(&items), Some(&10));
        assert_eq!(rng.pick(&items), Some(&30));
        assert_eq!(rng.pick(&items), Some(&40));
        assert_eq!(rng.pick::<i32>(&[]), None);
    }

    #[test]
    fn from_entropy_yields_usable_stream() {
        let mut rng = FrameRng::from_entropy();
        assert!((0.0..1.0).contains(&rng.next_f64()));
    }
}
