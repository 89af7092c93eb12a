//! Visual model frame: the body's displayed yaw relative to the chassis.
//!
//! While idle the body leans into the steer input; while drifting a second
//! offset swings it out toward the slide. The model frame is also the drive
//! direction when not drifting, so it is simulation state, not just looks.

use engine_core::{ease_out_back, frame_blend, lerp, lerp_angle, remap};

use crate::config::VisualTuning;
use crate::drift::DriftDirection;

/// Drift yaw returning to zero after a drift ends.
#[derive(Debug, Clone, Copy)]
struct Settle {
    from: f32,
    elapsed: f32,
}

#[derive(Debug, Clone)]
pub struct VisualModel {
    tuning: VisualTuning,
    /// Lean from steering, degrees.
    steer_yaw: f32,
    /// Swing from drifting, degrees.
    drift_yaw: f32,
    settle: Option<Settle>,
}

impl VisualModel {
    /// Create a model with no lean or swing.
    pub fn new(tuning: VisualTuning) -> Self {
        Self {
            tuning,
            steer_yaw: 0.0,
            drift_yaw: 0.0,
            settle: None,
        }
    }

    /// Yaw of the model relative to the chassis, in degrees.
    pub fn yaw_offset(&self) -> f32 {
        self.steer_yaw + self.drift_yaw
    }

    /// Drift swing alone, degrees.
    pub fn drift_yaw(&self) -> f32 {
        self.drift_yaw
    }

    /// Follow the steer input (not drifting).
    pub fn follow_steer(&mut self, steer: f32, dt: f32) {
        let t = frame_blend(self.tuning.follow_factor, self.tuning.reference_hz, dt);
        self.steer_yaw = lerp(self.steer_yaw, steer * self.tuning.steer_yaw, t);
        self.advance_settle(dt);
    }

    /// Swing out toward the slide (drifting).
    pub fn follow_drift(&mut self, direction: DriftDirection, counter_steer: f32, dt: f32) {
        self.settle = None;
        let control = remap(
            counter_steer,
            -1.0,
            1.0,
            self.tuning.max_drift_control,
            self.tuning.min_drift_control,
        );
        let target = control * self.tuning.drift_yaw * direction.sign();
        let t = frame_blend(self.tuning.follow_factor, self.tuning.reference_hz, dt);
        self.drift_yaw = lerp_angle(self.drift_yaw, target, t);
    }

    /// Start returning the drift swing to zero.
    pub fn begin_settle(&mut self) {
        self.settle = Some(Settle {
            from: self.drift_yaw,
            elapsed: 0.0,
        });
    }

    fn advance_settle(&mut self, dt: f32) {
        let Some(settle) = &mut self.settle else {
            return;
        };
        settle.elapsed += dt;
        let t = if self.tuning.settle_seconds > 0.0 {
            (settle.elapsed / self.tuning.settle_seconds).min(1.0)
        } else {
            1.0
        };
        self.drift_yaw = settle.from * (1.0 - ease_out_back(t));
        if t >= 1.0 {
            self.drift_yaw = 0.0;
            self.settle = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steer_lean_approaches_full_yaw() {
        let mut model = VisualModel::new(VisualTuning::default());
        for _ in 0..120 {
            model.follow_steer(1.0, 1.0 / 60.0);
        }
        assert!((model.yaw_offset() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn lean_is_frame_rate_independent() {
        let mut fast = VisualModel::new(VisualTuning::default());
        let mut slow = VisualModel::new(VisualTuning::default());
        for _ in 0..12 {
            fast.follow_steer(-1.0, 1.0 / 120.0);
        }
        for _ in 0..3 {
            slow.follow_steer(-1.0, 1.0 / 30.0);
        }
        assert!((fast.yaw_offset() - slow.yaw_offset()).abs() < 1e-3);
    }

    #[test]
    fn drift_swing_is_wider_when_steering_into_the_drift() {
        let mut into = VisualModel::new(VisualTuning::default());
        let mut counter = VisualModel::new(VisualTuning::default());
        for _ in 0..200 {
            into.follow_drift(DriftDirection::Right, -1.0, 1.0 / 60.0);
            counter.follow_drift(DriftDirection::Right, 1.0, 1.0 / 60.0);
        }
        assert!((into.drift_yaw() - 30.0).abs() < 1e-2);
        assert!((counter.drift_yaw() - 7.5).abs() < 1e-2);

        let mut left = VisualModel::new(VisualTuning::default());
        for _ in 0..200 {
            left.follow_drift(DriftDirection::Left, -1.0, 1.0 / 60.0);
        }
        assert!((left.drift_yaw() + 30.0).abs() < 1e-2);
    }

    #[test]
    fn drift_swing_settles_back_to_zero() {
        let mut model = VisualModel::new(VisualTuning::default());
        for _ in 0..200 {
            model.follow_drift(DriftDirection::Right, 0.0, 1.0 / 60.0);
        }
        model.begin_settle();
        let mut overshot = false;
        for _ in 0..40 {
            model.follow_steer(0.0, 1.0 / 60.0);
            overshot |= model.drift_yaw() < 0.0;
        }
        assert!(overshot, "ease-out-back should swing slightly past zero");
        assert_eq!(model.drift_yaw(), 0.0);
    }
}
