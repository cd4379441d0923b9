//! Random helpers for game code.

/// Nominal tick rate used to turn a period into a per-tick probability.
const TICKS_PER_SECOND: f32 = 60.0;

/// Seedable random source owned by the registry.
#[derive(Debug, Clone)]
pub struct Rand {
    rng: fastrand::Rng,
}

impl Default for Rand {
    fn default() -> Self {
        Self::new()
    }
}

impl Rand {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic sequence for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Integer in `min..=max`. The bounds are swapped if given in reverse.
    pub fn between(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.i32(lo..=hi)
    }

    /// Float in `min..max`.
    pub fn between_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.f32() * (max - min)
    }

    /// True roughly once every `seconds` seconds when polled once per tick.
    pub fn once_every(&mut self, seconds: f32) -> bool {
        let ticks = (seconds * TICKS_PER_SECOND) as u32;
        if ticks <= 1 {
            return true;
        }
        self.rng.u32(0..ticks) == 0
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.rng.f32() < probability
    }
}
