//! Scalar interpolation, angle and easing helpers.
//!
//! Interpolators clamp their blend factor to `[0, 1]`, so callers can pass
//! `dt * rate` directly without overshooting the target on long frames.

use glam::Quat;

/// Overshoot used by [`ease_out_back`].
const BACK_OVERSHOOT: f32 = 1.70158;

/// Linear interpolation from `from` to `to` with `t` clamped to `[0, 1]`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Hermite interpolation from `from` to `to`: zero slope at both ends of `t`.
pub fn smoothstep(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = t * t * (3.0 - 2.0 * t);
    from + (to - from) * t
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]` (unclamped).
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Interpolate between two angles in degrees along the shortest arc.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    from + delta * t.clamp(0.0, 1.0)
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Convert a per-frame blend `factor` tuned at `reference_hz` into the
/// equivalent blend for a step of `dt` seconds.
pub fn frame_blend(factor: f32, reference_hz: f32, dt: f32) -> f32 {
    let keep = (1.0 - factor.clamp(0.0, 1.0)).powf(dt * reference_hz);
    1.0 - keep
}

/// Rotation about +Y for a heading in degrees, clockwise seen from above,
/// so a positive heading turns the -Z forward axis toward +X.
pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// Quadratic ease-out over `t ∈ [0, 1]`.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Ease-out with a short overshoot past 1 before settling.
pub fn ease_out_back(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * ((BACK_OVERSHOOT + 1.0) * t + BACK_OVERSHOOT) + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_hits_endpoints_and_midpoint() {
        assert_eq!(smoothstep(2.0, 10.0, 0.0), 2.0);
        assert_eq!(smoothstep(2.0, 10.0, 1.0), 10.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        // Clamped past the end.
        assert_eq!(smoothstep(0.0, 4.0, 3.0), 4.0);
    }

    #[test]
    fn remap_is_linear_and_can_invert_ranges() {
        assert!((remap(0.0, -1.0, 1.0, 0.2, 1.0) - 0.6).abs() < 1e-6);
        assert!((remap(-1.0, -1.0, 1.0, 2.0, 0.0) - 2.0).abs() < 1e-6);
        assert!((remap(1.0, -1.0, 1.0, 2.0, 0.0)).abs() < 1e-6);
    }

    #[test]
    fn lerp_angle_takes_the_short_way_round() {
        assert!((lerp_angle(350.0, 10.0, 0.5) - 360.0).abs() < 1e-4);
        assert!((lerp_angle(10.0, 350.0, 0.5) - 0.0).abs() < 1e-4);
    }

    #[test]
    fn frame_blend_matches_factor_at_reference_rate() {
        assert!((frame_blend(0.2, 60.0, 1.0 / 60.0) - 0.2).abs() < 1e-5);
        // Two half-length steps compound to one full step.
        let half = frame_blend(0.2, 60.0, 1.0 / 120.0);
        let compounded = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((compounded - 0.2).abs() < 1e-5);
    }

    #[test]
    fn easing_curves_start_and_end_on_target() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!(ease_out_back(0.0).abs() < 1e-6);
        assert!((ease_out_back(1.0) - 1.0).abs() < 1e-6);
        assert!(ease_out_back(0.8) > 1.0);
    }
}
