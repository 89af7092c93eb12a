//! Smoothing of per-tick drive requests into continuous speed and turn rate.

use engine_core::{lerp, smoothstep};

use crate::config::DriveTuning;

/// Turns one-tick speed/turn impulses into smoothed drive values.
///
/// Speed uses a smoothstep blend so it ramps in and decays with zero slope at
/// the target; turn rate uses a plain lerp at a slower rate so steering feels
/// heavier than the throttle. Both blends clamp `dt * rate` to 1, so a long
/// frame lands on the target instead of overshooting it.
#[derive(Debug, Clone)]
pub struct ControlSmoother {
    current_speed: f32,
    current_turn_rate: f32,
    speed_rate: f32,
    turn_rate: f32,
}

impl ControlSmoother {
    /// Create a smoother at rest with the given blend rates (per second).
    pub fn new(speed_rate: f32, turn_rate: f32) -> Self {
        Self {
            current_speed: 0.0,
            current_turn_rate: 0.0,
            speed_rate,
            turn_rate,
        }
    }

    /// Create a smoother from the drive tuning's smoothing rates.
    pub fn from_tuning(tuning: &DriveTuning) -> Self {
        Self::new(tuning.speed_smoothing, tuning.turn_smoothing)
    }

    /// Blend toward this tick's requests and return `(current_speed, current_turn_rate)`.
    pub fn update(&mut self, requested_speed: f32, requested_turn_rate: f32, dt: f32) -> (f32, f32) {
        self.current_speed = smoothstep(self.current_speed, requested_speed, dt * self.speed_rate);
        self.current_turn_rate =
            lerp(self.current_turn_rate, requested_turn_rate, dt * self.turn_rate);
        (self.current_speed, self.current_turn_rate)
    }

    /// Drive the smoothed speed directly (boost ramp).
    pub fn override_speed(&mut self, speed: f32) {
        self.current_speed = speed;
    }

    /// Smoothed speed.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Smoothed turn rate, degrees.
    pub fn current_turn_rate(&self) -> f32 {
        self.current_turn_rate
    }
}
