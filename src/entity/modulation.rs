use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Decides, tick by tick, whether an entity running below full speed gets to move.
///
/// An entity with speed `s` in `[0, 1]` moves on a tick with probability `s`, so over
/// time it covers `s` strides per tick on average. Each modulator owns its own
/// generator so the draws of one entity never shift those of another.
#[derive(Debug, Clone)]
pub struct SpeedModulator {
    rng: SmallRng,
}

impl SpeedModulator {
    pub fn new(seed: u64) -> Self {
        SpeedModulator {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns true if an entity moving at `speed` should move this tick.
    pub fn next(&mut self, speed: f32) -> bool {
        if speed >= 1.0 {
            true
        } else if speed <= 0.0 {
            false
        } else {
            self.rng.random::<f32>() < speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_deterministic() {
        let mut modulator = SpeedModulator::new(7);
        assert!((0..100).all(|_| modulator.next(1.0)));
        assert!((0..100).all(|_| !modulator.next(0.0)));
    }

    #[test]
    fn test_rate_tracks_speed() {
        let mut modulator = SpeedModulator::new(42);
        let moves = (0..10_000).filter(|_| modulator.next(0.75)).count();
        assert!((7000..8000).contains(&moves), "moved {moves} times");
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SpeedModulator::new(3);
        let mut b = SpeedModulator::new(3);
        for _ in 0..50 {
            assert_eq!(a.next(0.5), b.next(0.5));
        }
    }
}
