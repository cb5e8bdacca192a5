/// Time curves used by the controllers' animations.
///
/// `t` is the normalized elapsed time in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolator {
    Linear,
    /// Starts fast and slows down; `factor` controls how strongly (`1.0` is a quadratic ease-out).
    Decelerate { factor: f32 },
    /// Slow at both ends.
    SmoothStep,
}

impl Interpolator {
    /// The curve used for the settle and return-to-start animations.
    pub const DECELERATE: Self = Self::Decelerate { factor: 2.0 };

    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate { factor } => {
                // 1 - (1 - t)^(2 * factor); the exponent is rounded down to an integer.
                let inv = 1.0 - t;
                let n = ((2.0 * factor) as u32).max(1);
                let mut p = 1.0;
                for _ in 0..n {
                    p *= inv;
                }
                1.0 - p
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A fixed-duration animation clock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    pub start_ms: u64,
    pub duration_ms: u64,
    pub interpolator: Interpolator,
}

impl Timing {
    pub fn new(start_ms: u64, duration_ms: u64, interpolator: Interpolator) -> Self {
        Self {
            start_ms,
            duration_ms: duration_ms.max(1),
            interpolator,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Interpolated progress in `[0, 1]`.
    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.interpolator.sample(t)
    }
}
