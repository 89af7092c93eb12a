//! Release boost and chromatic pulse ramps.
//!
//! Both are plain state advanced by the tick and sampled as a pure function
//! of elapsed time, so they stay deterministic without a tween scheduler.

use engine_core::{ease_out_quad, lerp};

use crate::config::BoostTuning;

/// Boost earned by releasing a drift. Consumed once by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostRequest {
    pub tier: u8,
    pub multiplier: f32,
    pub duration_seconds: f32,
}

impl BoostRequest {
    /// Boost for a drift released at `tier`; tier 0 earns nothing.
    pub fn for_tier(tier: u8, tuning: &BoostTuning) -> Option<Self> {
        if tier == 0 {
            return None;
        }
        Some(Self {
            tier,
            multiplier: tuning.multiplier,
            duration_seconds: tier as f32 * tuning.seconds_per_tier,
        })
    }
}

/// Speed ramp from `base * multiplier` down to `base` over the boost duration.
#[derive(Debug, Clone, Copy)]
pub struct BoostRamp {
    base_speed: f32,
    multiplier: f32,
    duration: f32,
    elapsed: f32,
}

impl BoostRamp {
    /// Start a ramp for `request` on top of `base_speed`.
    pub fn new(request: BoostRequest, base_speed: f32) -> Self {
        Self {
            base_speed,
            multiplier: request.multiplier,
            duration: request.duration_seconds,
            elapsed: 0.0,
        }
    }

    /// Multiplier on the base speed `elapsed` seconds into the ramp.
    pub fn multiplier_at(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let t = ease_out_quad(elapsed / self.duration);
        lerp(self.multiplier, 1.0, t)
    }

    /// Advance by `dt` and return the speed to drive this tick.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.base_speed * self.multiplier_at(self.elapsed)
    }

    /// Check if the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Post-processing pulse: 0 → 1 over the rise time, then back to 0 over the fall time.
#[derive(Debug, Clone, Copy)]
pub struct ChromaticPulse {
    rise: f32,
    fall: f32,
    elapsed: f32,
}

impl ChromaticPulse {
    /// Start a pulse at zero intensity.
    pub fn new(tuning: &BoostTuning) -> Self {
        Self {
            rise: tuning.chromatic_rise,
            fall: tuning.chromatic_fall,
            elapsed: 0.0,
        }
    }

    /// Rise plus fall time.
    pub fn duration(&self) -> f32 {
        self.rise + self.fall
    }

    /// Intensity `elapsed` seconds into the pulse.
    pub fn intensity_at(&self, elapsed: f32) -> f32 {
        if elapsed <= 0.0 {
            return 0.0;
        }
        if elapsed < self.rise {
            return ease_out_quad(elapsed / self.rise);
        }
        if self.fall <= 0.0 {
            return 0.0;
        }
        1.0 - ease_out_quad((elapsed - self.rise) / self.fall)
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration());
    }

    /// Intensity at the current time.
    pub fn intensity(&self) -> f32 {
        self.intensity_at(self.elapsed)
    }

    /// Check if the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }
}
